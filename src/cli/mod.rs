//! CLI entrypoint module structure.
use anyhow::Result;
use serde_json::json;

use crate::launch::{config::launcher_file_schema, settings::RunMode};

pub mod args;
pub mod profile;

pub use args::{parse_override, CliCommand, LaunchArgs, ParsedCommand};
pub use profile::{
    process_env, resolve_config_path, resolve_runner, resolve_settings, CommandLineSettings,
    LaunchProfile, LaunchRequest, ResolvedSettings, SettingSources, RUNNER_ENV_KEY,
};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand) -> Result<String> {
    match command {
        CliCommand::Modes => describe_modes(),
        CliCommand::Schema => Ok(serde_json::to_string_pretty(&launcher_file_schema())?),
    }
}

fn describe_modes() -> Result<String> {
    let modes: Vec<_> = RunMode::ALL.iter().map(RunMode::profile).collect();
    let payload = json!({
        "default": RunMode::Discrete,
        "modes": modes,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}
