//! kask - Krew launcher for the Kui graphical kubectl plugin
//!
//! CLI entry point: classify the invocation, make the pinned Kui version
//! ready in the local cache, then launch it.

use clap::Parser;
use console::style;
use kask::cache::CacheManager;
use kask::cli::{self, Cli, Intent};
use kask::config::ConfigManager;
use kask::error::KaskResult;
use kask::version::Version;
use kask::{launch, runner};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> KaskResult<ExitCode> {
    // DEBUG in the environment enables verbose logging
    let filter = if std::env::var_os("DEBUG").is_some() {
        EnvFilter::new("kask=debug")
    } else {
        EnvFilter::new("kask=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    let intent = cli.intent();

    let (force_refresh, kui_args) = match intent {
        Intent::Usage => {
            cli::print_usage();
            return Ok(ExitCode::FAILURE);
        }
        // a refresh re-fetches the distribution, then asks it for its version
        Intent::Refresh => (true, vec!["version".to_string()]),
        Intent::Forward(args) => (false, args),
    };
    debug!("refresh requested? {}", force_refresh);

    let config = ConfigManager::new().load().await?;
    let version = Version::current()?;

    let manager = CacheManager::from_config(&config)?;
    let root = manager.ensure_ready(&version, force_refresh).await?;
    if force_refresh {
        debug!("refresh done");
    }

    let invoked_as = std::env::args()
        .next()
        .unwrap_or_else(|| launch::CANONICAL_NAME.to_string());
    let plan = launch::plan(root, &invoked_as, kui_args.clone());

    // `version` also reports the launcher's own version, on a line ahead
    // of the child's
    let reporting_version = kui_args.first().map(String::as_str) == Some("version");
    if reporting_version {
        let base = Path::new(&invoked_as)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| launch::CANONICAL_NAME.to_string());
        print!(
            "{}\t{}\n{}\t",
            style(base).blue(),
            version,
            style("kui").blue()
        );
        let _ = std::io::stdout().flush();
    }

    let code = runner::execute(plan).await?;

    if reporting_version {
        // the child omits its trailing newline
        println!();
    }

    Ok(match code {
        0 => ExitCode::SUCCESS,
        c => ExitCode::from(u8::try_from(c).unwrap_or(1)),
    })
}
