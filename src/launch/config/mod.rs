//! Load and validate the optional launcher file.
use std::path::PathBuf;

use schemars::{JsonSchema, Schema};
use serde::Deserialize;
use tracing::error;

use crate::lib::errors::ConfigError;

pub mod defaults;
pub mod runner;
pub mod telemetry;

pub use defaults::{parse_defaults_section, DefaultsSection, RawDefaultsSection, RawToken};
pub use runner::{parse_runner_section, RawRunnerSection, RunnerSection, DEFAULT_RUNNER_PROGRAM};

pub const CONFIG_ENV_KEY: &str = "CMN_LAUNCH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "cmn-launch.toml";

/// How the launcher file path was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    CommandLine,
    Environment,
    Default,
}

/// Resolved launcher file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub origin: ConfigOrigin,
}

impl ConfigLocation {
    /// A named file must exist; the default one may be absent.
    pub fn is_explicit(&self) -> bool {
        self.origin != ConfigOrigin::Default
    }
}

/// Top-level launcher configuration.
#[derive(Debug, Clone, Default)]
pub struct LauncherConfig {
    pub runner: RunnerSection,
    pub defaults: DefaultsSection,
    /// `None` when no launcher file was read.
    pub source_path: Option<PathBuf>,
}

/// Launcher file layout.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(title = "cmn-launch launcher file")]
pub struct RawLauncherFile {
    /// Runner process to start.
    pub runner: Option<RawRunnerSection>,
    /// Values used when neither the command line nor the environment set them.
    pub defaults: Option<RawDefaultsSection>,
}

impl LauncherConfig {
    /// Built-in runner and defaults, used when no launcher file exists.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load from a resolved location. A missing default file yields [`Self::builtin`].
    pub fn load(location: &ConfigLocation) -> Result<Self, ConfigError> {
        telemetry::log_env_source(location);
        if !location.is_explicit() && !location.path.exists() {
            telemetry::log_default_missing(&location.path);
            return Ok(Self::builtin());
        }
        Self::load_from_path(location.path.clone())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        tracing::info!(
            target: "cmn_launch::config",
            path = %path.display(),
            "Starting launcher file load"
        );

        let builder = config::Config::builder().add_source(
            config::File::from(path.clone()).format(config::FileFormat::Toml),
        );
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "cmn_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to read launcher file"
            );
            error
        })?;

        let raw: RawLauncherFile = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "cmn_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse launcher file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "cmn_launch::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate launcher file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawLauncherFile, path: PathBuf) -> Result<Self, ConfigError> {
        let runner = parse_runner_section(raw.runner, &path)?;
        let defaults = parse_defaults_section(raw.defaults);

        Ok(Self {
            runner,
            defaults,
            source_path: Some(path),
        })
    }
}

/// JSON Schema of the launcher file.
pub fn launcher_file_schema() -> Schema {
    schemars::schema_for!(RawLauncherFile)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::lib::errors::ConfigError;

    use super::*;

    fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn load_valid_config() {
        let path = fixture_path("launch_valid.toml");
        let config = LauncherConfig::load_from_path(path.clone())
            .expect("launch_valid.toml should load");

        assert_eq!(config.source_path, Some(path));
        assert_eq!(config.runner.program, PathBuf::from("sh"));
        assert_eq!(config.runner.args.len(), 1);
        assert!(config.runner.args[0].ends_with("fake-runner.sh"));
        assert_eq!(config.defaults.run_mode.as_deref(), Some("continuous"));
        assert_eq!(config.defaults.use_simulator.as_deref(), Some("true"));
        assert_eq!(config.defaults.show_live_viz.as_deref(), Some("false"));
    }

    #[test]
    fn empty_file_uses_builtin_sections() {
        let config = LauncherConfig::load_from_path(fixture_path("launch_empty.toml"))
            .expect("an empty launcher file is valid");

        assert_eq!(config.runner, RunnerSection::default());
        assert!(config.defaults.is_empty());
    }

    #[test]
    fn blank_program_returns_error() {
        let error = LauncherConfig::load_from_path(fixture_path("launch_blank_program.toml"))
            .expect_err("should error for a blank runner program");

        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "runner.program"),
            other => panic!("Unexpected error: {other:?}", other = other),
        }
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let error = LauncherConfig::load_from_path(fixture_path("launch_unknown_key.toml"))
            .expect_err("unknown keys should be rejected");

        assert!(
            matches!(error, ConfigError::Parse { .. }),
            "Unexpected error: {error:?}"
        );
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let location = ConfigLocation {
            path: fixture_path("does_not_exist.toml"),
            origin: ConfigOrigin::CommandLine,
        };
        let error = LauncherConfig::load(&location).expect_err("named file must exist");

        assert!(
            matches!(error, ConfigError::FileRead { .. }),
            "Unexpected error: {error:?}"
        );
    }

    #[test]
    fn missing_default_file_falls_back_to_builtin() {
        let location = ConfigLocation {
            path: fixture_path("does_not_exist.toml"),
            origin: ConfigOrigin::Default,
        };
        let config = LauncherConfig::load(&location).expect("default file is optional");

        assert!(config.source_path.is_none());
        assert_eq!(
            config.runner.program,
            PathBuf::from(DEFAULT_RUNNER_PROGRAM)
        );
    }

    #[test]
    fn schema_describes_both_sections() {
        let schema = serde_json::to_value(launcher_file_schema()).expect("schema serializes");
        let properties = schema
            .get("properties")
            .and_then(|value| value.as_object())
            .expect("schema should list properties");

        assert!(properties.contains_key("runner"));
        assert!(properties.contains_key("defaults"));
    }
}
