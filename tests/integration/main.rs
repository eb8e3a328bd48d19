//! Integration tests for kask

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn kask() -> Command {
        cargo_bin_cmd!("kask")
    }

    #[test]
    fn no_args_prints_usage_and_exits_nonzero() {
        kask()
            .assert()
            .failure()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("install"))
            .stdout(predicate::str::contains("refresh"));
    }

    #[test]
    fn lone_help_flag_prints_usage_and_exits_nonzero() {
        kask()
            .arg("--help")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Admin Commands:"));

        kask()
            .arg("-h")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn unreachable_dist_host_fails_with_download_error() {
        let home = tempfile::tempdir().unwrap();
        kask()
            .arg("version")
            .env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path().join("config"))
            // port 1 is never listening, so the fetch fails immediately
            .env("KUI_DIST", "http://127.0.0.1:1/dist")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Download failed"));
    }
}

#[cfg(unix)]
mod end_to_end {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::path::Path;

    fn kask() -> Command {
        cargo_bin_cmd!("kask")
    }

    /// Zip distribution whose root "executable" is a shell script
    fn dist_zip() -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options =
                zip::write::SimpleFileOptions::default().unix_permissions(0o755);
            zip.start_file("Kui-base-linux-x64/Kui", options).unwrap();
            zip.write_all(b"#!/bin/sh\necho \"kui $KUI_COMMAND_CONTEXT headless=$KUI_HEADLESS\"\n")
                .unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    /// Serve `requests` GETs of the distribution zip, one connection each
    fn serve_dist(requests: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let body = dist_zip();
        std::thread::spawn(move || {
            for _ in 0..requests {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let header = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(header.as_bytes());
                let _ = stream.write_all(&body);
            }
        });
        format!("http://{}/dist", addr)
    }

    fn run_headless(home: &Path, dist: &str, arg: &str) -> assert_cmd::assert::Assert {
        kask()
            .arg(arg)
            .env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join("config"))
            .env("KUI_DIST", dist)
            .assert()
    }

    #[test]
    fn first_run_fetches_and_launches_the_distribution() {
        let home = tempfile::tempdir().unwrap();
        let dist = serve_dist(1);

        run_headless(home.path(), &dist, "list")
            .success()
            .stdout(predicate::str::contains("kui plugin headless=true"));

        let cache = home.path().join(".kask").join("cache-dev");
        assert!(cache.join("success").is_file());
        assert!(cache.join("extract/Kui-base-linux-x64/Kui").is_file());
    }

    #[test]
    fn second_run_reuses_the_cache() {
        let home = tempfile::tempdir().unwrap();
        // the server only answers once; a second fetch would hang or fail
        let dist = serve_dist(1);

        run_headless(home.path(), &dist, "list").success();
        run_headless(home.path(), &dist, "list")
            .success()
            .stdout(predicate::str::contains("kui plugin"));
    }

    #[test]
    fn refresh_refetches_and_reports_versions() {
        let home = tempfile::tempdir().unwrap();
        let dist = serve_dist(2);

        run_headless(home.path(), &dist, "list").success();
        run_headless(home.path(), &dist, "refresh")
            .success()
            // our own version line precedes the child's output
            .stdout(predicate::str::contains("dev"))
            .stdout(predicate::str::contains("kui plugin"));
    }
}
