//! Shared helpers for building the runner command.

use std::{path::Path, process::Stdio};

use tokio::process::Command;

pub struct RunnerCommandConfig<'a> {
    pub program: &'a Path,
    pub fixed_args: &'a [String],
    pub working_dir: Option<&'a Path>,
}

/// Build the runner command. The runner inherits the launcher's environment
/// and stdio; its argv ends with the three positional launch values.
pub fn build_runner_command(config: RunnerCommandConfig<'_>, positional: &[String]) -> Command {
    let mut command = Command::new(config.program);
    if let Some(dir) = config.working_dir {
        command.current_dir(dir);
    }
    command.args(config.fixed_args);
    command.args(positional);
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    command
}
