//! Distribution locator: where to fetch the Kui archive for a given
//! version and OS, and where the root executable lives once extracted.

use crate::version::Version;
use std::path::{Path, PathBuf};

/// Default host template; `{version}` namespaces the bucket per release
const DEFAULT_HOST: &str = "https://s3-api.us-geo.objectstorage.softlayer.net/kui-";

/// Environment variable that replaces the download host wholesale
pub const DIST_HOST_ENV: &str = "KUI_DIST";

/// Operating systems Kui ships distributions for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
}

impl Os {
    /// Detect the OS this launcher is running on
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Linux,
        }
    }
}

/// Archive filename suffix for a given OS, independent of version
pub fn archive_suffix(os: Os) -> &'static str {
    match os {
        Os::Windows => "-base-win32-x64.zip",
        Os::MacOs => "-base-darwin-x64.tar.bz2",
        Os::Linux => "-base-linux-x64.zip",
    }
}

/// Compute the download URL for a version/OS pair.
///
/// `host_override` (from `KUI_DIST` or the config file) replaces the host
/// entirely, not just the scheme. The result always has exactly one `/`
/// between host and filename.
pub fn dist_url(version: &Version, os: Os, host_override: Option<&str>) -> String {
    let mut host = match host_override {
        Some(h) => h.to_string(),
        None => format!("{}{}", DEFAULT_HOST, version),
    };
    if !host.ends_with('/') {
        host.push('/');
    }
    format!("{}Kui{}", host, archive_suffix(os))
}

/// Path of the root executable inside the extracted distribution.
///
/// These are fixed per-OS bundle layouts: an app bundle on macOS, a flat
/// binary on Linux, an `.exe` on Windows.
pub fn root_executable(extracted_dir: &Path, os: Os) -> PathBuf {
    match os {
        Os::Windows => extracted_dir.join("Kui-base-win32-x64").join("Kui.exe"),
        Os::MacOs => extracted_dir
            .join("Kui-base-darwin-x64")
            .join("Kui.app")
            .join("Contents")
            .join("MacOS")
            .join("Kui"),
        Os::Linux => extracted_dir.join("Kui-base-linux-x64").join("Kui"),
    }
}
