//! CLI argument definitions and `LaunchRequest` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::{process_env, resolve_config_path, CommandLineSettings, LaunchRequest};
use crate::{
    launch::settings::{SettingField, SettingSource},
    lib::errors::LaunchError,
};

const LAUNCH_HELP: &str = "\
Settings (command line > environment > launcher file > default):
  run_mode       discrete | discrete_random | continuous      [default: discrete]
                 discrete:        panoramic images, discrete Bayes filter, discrete actions
                 discrete_random: as discrete, with randomly sampled actions
                 continuous:      single images, particle filter, velocity commands
                 env: CMN_RUN_MODE
  use_simulator  true | false                                 [default: false]
                 true: observations synthesized from the coarse map and true pose
                 false: observations predicted by the perception model
                 env: CMN_USE_SIMULATOR
  show_live_viz  true | false                                 [default: true]
                 env: CMN_SHOW_LIVE_VIZ

Booleans also accept 1/0, yes/no, on/off. Launch-style overrides such as
`run_mode:=continuous use_sim:=true` are accepted as positional arguments.";

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    Launch(LaunchRequest),
    Cli(CliCommand),
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the sensing, localization and action space of each run mode.
    #[command(about = "Print the sensing, localization and action space of each run mode")]
    Modes,
    /// Print the JSON Schema of the launcher file.
    #[command(about = "Print the JSON Schema of the launcher file (cmn-launch.toml)")]
    Schema,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cmn-launch",
    author,
    version,
    about = "Launch the coarse-map navigation runner with a validated run mode",
    long_about = None,
    after_help = LAUNCH_HELP,
    args_conflicts_with_subcommands = true
)]
pub struct LaunchArgs {
    /// Run mode: discrete, discrete_random or continuous.
    #[arg(long, value_name = "MODE")]
    pub run_mode: Option<String>,
    /// Synthesize observations from the coarse map instead of the perception model.
    #[arg(long, value_name = "BOOL", alias = "use-sim")]
    pub use_simulator: Option<String>,
    /// Show the live visualization.
    #[arg(long, value_name = "BOOL", alias = "use-viz")]
    pub show_live_viz: Option<String>,
    /// Path to the launcher file (overrides CMN_LAUNCH_CONFIG).
    #[arg(long = "config", value_name = "PATH")]
    pub config_override: Option<PathBuf>,
    /// Runner program (overrides CMN_RUNNER and [runner].program).
    #[arg(long = "runner", value_name = "PROGRAM")]
    pub runner_override: Option<PathBuf>,
    /// Resolve and print the launch plan without starting the runner.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    /// Launch-style overrides, e.g. `run_mode:=continuous`.
    #[arg(value_name = "NAME:=VALUE")]
    pub overrides: Vec<String>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchArgs {
    /// Build a `LaunchRequest` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchRequest> {
        let config = resolve_config_path(self.config_override, process_env)?;

        let mut settings = CommandLineSettings::default();
        let flags = [
            (SettingField::RunMode, self.run_mode),
            (SettingField::UseSimulator, self.use_simulator),
            (SettingField::ShowLiveViz, self.show_live_viz),
        ];
        for (field, value) in flags {
            if let Some(value) = value {
                settings.set(field, value)?;
            }
        }
        for raw in &self.overrides {
            let (field, value) = parse_override(raw)?;
            settings.set(field, value)?;
        }

        Ok(LaunchRequest {
            config,
            settings,
            runner_override: self.runner_override,
            dry_run: self.dry_run,
        })
    }

    /// Parse CLI args into either launch mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        match self.command.clone() {
            Some(command) => Ok(ParsedCommand::Cli(command)),
            None => Ok(ParsedCommand::Launch(self.build()?)),
        }
    }
}

/// Split a `NAME:=VALUE` override. The value is returned untouched.
pub fn parse_override(raw: &str) -> Result<(SettingField, String), LaunchError> {
    let Some((name, value)) = raw.split_once(":=") else {
        return Err(LaunchError::invalid(
            "override",
            raw,
            SettingSource::CommandLine,
            "expected NAME:=VALUE",
        ));
    };
    let field = SettingField::from_name(name.trim()).ok_or_else(|| {
        LaunchError::invalid(
            "override",
            raw,
            SettingSource::CommandLine,
            "unknown setting; use run_mode, use_simulator or show_live_viz",
        )
    })?;
    Ok((field, value.to_string()))
}
