use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    cli::{LaunchProfile, SettingSources},
    launch::settings::{ModeProfile, ObservationSource, RunMode},
    lib::command::{build_runner_command, RunnerCommandConfig},
};

/// Everything needed to start the runner, and what `--dry-run` prints.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchPlan {
    pub launch_id: Uuid,
    pub program: PathBuf,
    pub fixed_args: Vec<String>,
    /// `[run_mode, use_simulator, show_live_viz]`.
    pub positional_args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    pub run_mode: RunMode,
    pub use_simulator: bool,
    pub show_live_viz: bool,
    pub sources: SettingSources,
    pub mode: ModeProfile,
    pub observation_source: ObservationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
}

impl LaunchPlan {
    pub fn from_profile(profile: &LaunchProfile, launch_id: Uuid) -> Self {
        let settings = profile.settings.settings;
        Self {
            launch_id,
            program: profile.runner.program.clone(),
            fixed_args: profile.runner.args.clone(),
            positional_args: settings.positional_args().to_vec(),
            working_dir: profile.runner.working_dir.clone(),
            run_mode: settings.run_mode,
            use_simulator: settings.use_simulator,
            show_live_viz: settings.show_live_viz,
            sources: profile.settings.sources,
            mode: settings.run_mode.profile(),
            observation_source: settings.observation_source(),
            config_path: profile.config_path.clone(),
        }
    }

    /// Full argv after the program name.
    pub fn argv(&self) -> Vec<String> {
        self.fixed_args
            .iter()
            .chain(self.positional_args.iter())
            .cloned()
            .collect()
    }

    pub fn command(&self) -> tokio::process::Command {
        build_runner_command(
            RunnerCommandConfig {
                program: &self.program,
                fixed_args: &self.fixed_args,
                working_dir: self.working_dir.as_deref(),
            },
            &self.positional_args,
        )
    }
}
