//! Launch planning
//!
//! Turns a ready [`RootCommand`] plus the user's sub-arguments into the
//! final child-process descriptor: argv, injected environment, and
//! whether to block on the child or fire and forget.

use crate::cache::{RootCommand, KUBECTL_PLUGIN_PREFIX};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canonical name of this launcher; a derived command context equal to it
/// is meaningless and falls back to the default
pub const CANONICAL_NAME: &str = "kask";

/// Command context used when none can be inferred from the executable name
/// (whereby "kubectl-foo" implies a command context of "foo")
pub const DEFAULT_COMMAND_CONTEXT: &str = "plugin";

/// Sub-commands that run headless unless `--ui` follows them
const HEADLESS_COMMANDS: [&str; 5] = ["install", "uninstall", "list", "version", "commands"];

/// How the child process is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStyle {
    /// Spawn and return immediately; the GUI outlives the launcher
    StartDetached,
    /// Spawn and wait for completion (headless sub-commands)
    RunBlocking,
}

/// Fully resolved child-process descriptor
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub style: ExecStyle,
}

/// Compose the launch plan for the Kui root command.
///
/// `invoked_as` is our own argv[0]; its basename drives command-context
/// derivation. `kui_args` are forwarded verbatim to the child.
pub fn plan(root: RootCommand, invoked_as: &str, kui_args: Vec<String>) -> LaunchPlan {
    let mut env = root.env;

    let context = command_context(invoked_as);
    debug!("command context: {}", context);
    env.push(("KUI_COMMAND_CONTEXT".into(), context));

    let style = exec_style(&kui_args);
    if style == ExecStyle::RunBlocking {
        debug!("using headless mode");
        env.push(("KUI_HEADLESS".into(), "true".into()));
    }

    LaunchPlan {
        program: root.program,
        args: kui_args,
        env,
        style,
    }
}

/// Derive the command context from the name we were invoked under
pub fn command_context(invoked_as: &str) -> String {
    let base = Path::new(invoked_as)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match base.strip_prefix(KUBECTL_PLUGIN_PREFIX) {
        Some(context) if context != CANONICAL_NAME && !context.is_empty() => context.to_string(),
        _ => DEFAULT_COMMAND_CONTEXT.to_string(),
    }
}

fn exec_style(kui_args: &[String]) -> ExecStyle {
    let Some(first) = kui_args.first() else {
        return ExecStyle::StartDetached;
    };

    if HEADLESS_COMMANDS.contains(&first.as_str())
        && kui_args.get(1).map(String::as_str) != Some("--ui")
    {
        ExecStyle::RunBlocking
    } else {
        ExecStyle::StartDetached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> RootCommand {
        RootCommand {
            program: PathBuf::from("/cache/extract/Kui-base-linux-x64/Kui"),
            env: vec![("KUI_BIN_DIR".into(), "/home/user/.kask/bin".into())],
        }
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn headless_commands_run_blocking() {
        for cmd in ["install", "uninstall", "list", "version", "commands"] {
            let plan = plan(root(), "kask", args(&[cmd]));
            assert_eq!(plan.style, ExecStyle::RunBlocking, "{}", cmd);
            assert!(plan
                .env
                .iter()
                .any(|(k, v)| k == "KUI_HEADLESS" && v == "true"));
        }
    }

    #[test]
    fn ui_flag_suppresses_headless_mode() {
        let plan = plan(root(), "kask", args(&["install", "--ui"]));
        assert_eq!(plan.style, ExecStyle::StartDetached);
        assert!(!plan.env.iter().any(|(k, _)| k == "KUI_HEADLESS"));
    }

    #[test]
    fn forwarded_commands_start_detached() {
        let plan = plan(root(), "kask", args(&["get", "pods"]));
        assert_eq!(plan.style, ExecStyle::StartDetached);
        assert_eq!(plan.args, args(&["get", "pods"]));
    }

    #[test]
    fn context_from_kubectl_prefixed_name() {
        assert_eq!(command_context("/usr/local/bin/kubectl-foo"), "foo");
        assert_eq!(command_context("kubectl-wsk"), "wsk");
    }

    #[test]
    fn context_falls_back_for_self_reference() {
        // kubectl-kask derives our own name, which is not a usable context
        assert_eq!(command_context("kubectl-kask"), DEFAULT_COMMAND_CONTEXT);
    }

    #[test]
    fn context_falls_back_without_prefix() {
        assert_eq!(command_context("myplugin"), DEFAULT_COMMAND_CONTEXT);
        assert_eq!(command_context("/opt/bin/kask"), DEFAULT_COMMAND_CONTEXT);
    }

    #[test]
    fn root_env_is_preserved_in_the_plan() {
        let plan = plan(root(), "kask", args(&["list"]));
        assert!(plan.env.iter().any(|(k, _)| k == "KUI_BIN_DIR"));
        assert!(plan
            .env
            .iter()
            .any(|(k, v)| k == "KUI_COMMAND_CONTEXT" && v == DEFAULT_COMMAND_CONTEXT));
    }
}
