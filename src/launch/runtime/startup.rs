use std::process::ExitCode;

use anyhow::Error;
use serde_json::json;
use uuid::Uuid;

use super::{run_runner, LaunchPlan};
use crate::{
    cli::LaunchProfile,
    lib::{
        errors::{
            ConfigError, ErrorDescriptor, LaunchError, LaunchErrorData, CONFIG_FILE_ERROR,
            CONFIG_FILE_EXIT, INVALID_CONFIGURATION_ERROR, INVALID_CONFIGURATION_EXIT,
            RUNNER_SPAWN_ERROR, RUNNER_SPAWN_EXIT, RUNNER_WAIT_ERROR, RUNNER_WAIT_EXIT,
        },
        telemetry::{self, LaunchModeTelemetry, LaunchSpan},
    },
};

/// Bundles a launch error message with an exit code and optional structured error data.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    code: u8,
    error_data: Option<LaunchErrorData>,
}

impl RuntimeExit {
    pub fn structured(error: LaunchErrorData) -> Self {
        Self {
            message: error.message.clone(),
            code: error.exit_code,
            error_data: Some(error),
        }
    }

    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        if let Some(launch) = err.downcast_ref::<LaunchError>() {
            if launch.is_invalid_configuration() {
                return Self::from_launch_error(launch);
            }
        }
        Self {
            message: format!("{err:?}"),
            code: 1,
            error_data: None,
        }
    }

    pub fn from_launch_error(err: &LaunchError) -> Self {
        let (descriptor, exit_code, details) = match err {
            LaunchError::InvalidConfiguration {
                field,
                value,
                origin,
                message,
            } => (
                &INVALID_CONFIGURATION_ERROR,
                INVALID_CONFIGURATION_EXIT,
                json!({
                    "field": field,
                    "value": value,
                    "source": origin,
                    "reason": message,
                }),
            ),
            LaunchError::RunnerSpawnFailed { program, source } => (
                &RUNNER_SPAWN_ERROR,
                RUNNER_SPAWN_EXIT,
                json!({
                    "program": program.to_string_lossy(),
                    "reason": source.to_string(),
                }),
            ),
            LaunchError::RunnerWaitFailed { program, source } => (
                &RUNNER_WAIT_ERROR,
                RUNNER_WAIT_EXIT,
                json!({
                    "program": program.to_string_lossy(),
                    "reason": source.to_string(),
                }),
            ),
        };
        Self::from_descriptor(descriptor, exit_code, details, err.to_string())
    }

    pub fn from_config_error(err: &ConfigError) -> Self {
        let mut details = json!({
            "path": err.path().to_string_lossy(),
            "reason": err.to_string(),
        });
        if let ConfigError::MissingField { field, .. } | ConfigError::InvalidField { field, .. } =
            err
        {
            details["field"] = json!(field);
        }
        Self::from_descriptor(&CONFIG_FILE_ERROR, CONFIG_FILE_EXIT, details, err.to_string())
    }

    fn from_descriptor(
        descriptor: &'static ErrorDescriptor,
        exit_code: u8,
        details: serde_json::Value,
        fallback: String,
    ) -> Self {
        match descriptor
            .builder()
            .exit_code(exit_code)
            .details(details)
            .build()
        {
            Ok(data) => Self::structured(data),
            Err(_) => Self {
                message: fallback,
                code: exit_code,
                error_data: None,
            },
        }
    }

    /// Exit for a runner that ran to completion with a non-zero status. The
    /// runner has already spoken on the shared terminal, so nothing is printed.
    pub fn runner_status(code: u8) -> Self {
        Self {
            message: String::new(),
            code,
            error_data: None,
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(data) = self.error_data {
            if let Ok(serialized) = serde_json::to_string(&data) {
                eprintln!("{serialized}");
            } else {
                eprintln!("{}", data.message);
            }
        } else if !self.message.is_empty() {
            eprintln!("{}", self.message);
        }
        ExitCode::from(self.code)
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code)
    }

    pub fn error_data(&self) -> Option<&LaunchErrorData> {
        self.error_data.as_ref()
    }

    /// True when the runner itself set the exit status; nothing to report.
    pub fn is_runner_status(&self) -> bool {
        self.error_data.is_none() && self.message.is_empty()
    }
}

/// Start the runner described by the profile and propagate its exit status.
/// With `dry_run`, print the plan instead.
pub async fn run_launch(profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let plan = LaunchPlan::from_profile(&profile, Uuid::new_v4());

    if profile.dry_run {
        let payload = serde_json::to_string_pretty(&plan).map_err(RuntimeExit::from_error)?;
        println!("{payload}");
        return Ok(());
    }

    let argv = plan.argv();
    let program = plan.program.to_string_lossy();
    let config_path = plan
        .config_path
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    let sources = plan.sources;
    telemetry::emit_launch_mode(&LaunchModeTelemetry {
        run_mode: plan.run_mode.as_str(),
        run_mode_source: sources.run_mode.as_str(),
        use_simulator: plan.use_simulator,
        use_simulator_source: sources.use_simulator.as_str(),
        show_live_viz: plan.show_live_viz,
        show_live_viz_source: sources.show_live_viz.as_str(),
        localization: plan.mode.localization.as_str(),
        config_path: config_path.as_deref(),
        program: program.as_ref(),
        argv: &argv,
    });

    let span = LaunchSpan::start(plan.launch_id, plan.run_mode.as_str());
    let outcome = match run_runner(&plan).await {
        Ok(outcome) => outcome,
        Err(err) => {
            let status = match err {
                LaunchError::RunnerSpawnFailed { .. } => "spawn_failed",
                _ => "wait_failed",
            };
            span.finish(status, None);
            return Err(RuntimeExit::from_launch_error(&err));
        }
    };
    span.finish(outcome.status_label(), outcome.exit_code);

    if outcome.success() {
        Ok(())
    } else {
        Err(RuntimeExit::runner_status(outcome.launcher_exit_code()))
    }
}
