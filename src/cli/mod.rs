//! CLI surface: argument classification and usage rendering

pub mod args;

pub use args::{Cli, Intent};

use console::style;

/// Print the colored usage summary.
///
/// Mirrors the command set Kui itself offers in headless mode, plus the
/// launcher-local admin commands.
pub fn print_usage() {
    println!("Usage: {}\n", style("kask <command>").cyan());

    println!("{}", style("Commands:").yellow());
    println!("{}\t\tList installed plugins", style("list").blue());
    println!(
        "{}\tShow commands offered by a plugin",
        style("commands").blue()
    );
    println!("{}\t\tInstall a plugin", style("install").blue());
    println!(
        "{}\tRemove a previously installed plugin",
        style("uninstall").blue()
    );

    println!("\n{}", style("Admin Commands:").yellow());
    println!("{}\t\tUpdate the local UI code", style("refresh").blue());
    println!("{}\t\tPrint the current version", style("version").blue());
}
