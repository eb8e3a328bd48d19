//! CLI argument definitions using clap derive
//!
//! Everything after the program name is forwardable to Kui, so the usual
//! clap help/version flags are disabled; `-h`/`--help` are handled as an
//! explicit intent instead.

use clap::Parser;

/// kask - Krew launcher for the Kui graphical kubectl plugin
#[derive(Parser, Debug)]
#[command(name = "kask")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Kui sub-command and arguments, forwarded verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// What the invocation asks of the launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Print usage and exit non-zero
    Usage,
    /// Invalidate the cache, re-fetch, then report the child's version
    Refresh,
    /// Hand the arguments to Kui
    Forward(Vec<String>),
}

impl Cli {
    /// Classify the raw argument list
    pub fn intent(&self) -> Intent {
        match self.args.as_slice() {
            [] => Intent::Usage,
            [flag] if flag == "-h" || flag == "--help" => Intent::Usage,
            [first, ..] if first == "refresh" => Intent::Refresh,
            _ => Intent::Forward(self.args.clone()),
        }
    }
}
