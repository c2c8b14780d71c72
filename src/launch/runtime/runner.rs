use std::process::ExitStatus;

use tracing::info;

use super::LaunchPlan;
use crate::lib::errors::LaunchError;

/// How the runner ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerOutcome {
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
}

impl RunnerOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
            signal: termination_signal(&status),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code the launcher should report: the runner's own code, `128 + n`
    /// for a runner killed by signal `n`, otherwise 1.
    pub fn launcher_exit_code(&self) -> u8 {
        match (self.exit_code, self.signal) {
            (Some(code), _) => u8::try_from(code).unwrap_or(1),
            (None, Some(signal)) => u8::try_from(128 + signal).unwrap_or(1),
            (None, None) => 1,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match (self.exit_code, self.signal) {
            (Some(0), _) => "succeeded",
            (Some(_), _) => "failed",
            (None, Some(_)) => "signaled",
            (None, None) => "unknown",
        }
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Start the runner and wait for it. Stdio is inherited, so nothing is
/// captured here.
pub async fn run_runner(plan: &LaunchPlan) -> Result<RunnerOutcome, LaunchError> {
    let mut command = plan.command();

    info!(
        target: "cmn_launch::runner",
        launch_id = %plan.launch_id,
        program = %plan.program.display(),
        run_mode = %plan.run_mode,
        use_simulator = plan.use_simulator,
        show_live_viz = plan.show_live_viz,
        "Spawning runner"
    );

    let mut child = command
        .spawn()
        .map_err(|source| LaunchError::RunnerSpawnFailed {
            program: plan.program.clone(),
            source,
        })?;

    let status = child
        .wait()
        .await
        .map_err(|source| LaunchError::RunnerWaitFailed {
            program: plan.program.clone(),
            source,
        })?;

    Ok(RunnerOutcome::from_status(status))
}
