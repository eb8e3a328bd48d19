//! Child process execution
//!
//! Thin wrapper over [`tokio::process::Command`]: either start the child
//! detached and return immediately, or run it to completion and surface
//! its exit code.

use crate::error::{KaskError, KaskResult};
use crate::launch::{ExecStyle, LaunchPlan};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Execute the planned child process.
///
/// Standard output and error are attached to our own. Returns the child's
/// exit code for [`ExecStyle::RunBlocking`], `0` for a successful detached
/// start. A child killed by a signal reports as exit code 1.
pub async fn execute(plan: LaunchPlan) -> KaskResult<i32> {
    debug!("launching {} with args {:?}", plan.program.display(), plan.args);

    let mut command = Command::new(&plan.program);
    command
        .args(&plan.args)
        .envs(plan.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let launch_failed = |e: std::io::Error| KaskError::ChildProcessLaunchFailed {
        command: plan.program.display().to_string(),
        source: e,
    };

    match plan.style {
        ExecStyle::StartDetached => {
            // the child keeps running after we exit; no wait, no monitoring
            command.spawn().map_err(launch_failed)?;
            Ok(0)
        }
        ExecStyle::RunBlocking => {
            let status = command.status().await.map_err(launch_failed)?;
            Ok(status.code().unwrap_or(1))
        }
    }
}
