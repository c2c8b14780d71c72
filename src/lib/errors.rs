use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::launch::settings::SettingSource;

/// Errors that can occur while loading or validating the launcher file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the launcher file.
    #[error("Failed to read launcher file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse launcher file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Launcher file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Launcher file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::FileRead { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::MissingField { path, .. }
            | ConfigError::InvalidField { path, .. } => path,
        }
    }
}

/// Failures raised by the launch descriptor itself.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// A setting could not be validated. Raised before anything is spawned.
    #[error("Invalid configuration for `{field}` from {origin}: {message} (got {value:?})")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        origin: SettingSource,
        message: String,
    },
    #[error("Failed to start runner `{program}`: {source}")]
    RunnerSpawnFailed {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed while waiting for runner `{program}`: {source}")]
    RunnerWaitFailed {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    pub fn invalid(
        field: &'static str,
        value: impl Into<String>,
        origin: SettingSource,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidConfiguration {
            field,
            value: value.into(),
            origin,
            message: message.into(),
        }
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, LaunchError::InvalidConfiguration { .. })
    }
}

/// Static description of a user-facing launch failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// User-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
}

impl ErrorDescriptor {
    /// Simple constructor.
    pub const fn new(code: &'static str, message: &'static str, remediation: &'static str) -> Self {
        Self {
            code,
            message,
            remediation,
        }
    }

    /// Create a builder.
    pub fn builder(&self) -> ErrorDataBuilder<'_> {
        ErrorDataBuilder::new(self)
    }
}

/// Structured error payload written to stderr when the launcher fails.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LaunchErrorData {
    pub code: &'static str,
    pub message: String,
    pub remediation: &'static str,
    pub exit_code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Builder for error data that fails if required fields are missing.
pub struct ErrorDataBuilder<'a> {
    descriptor: &'a ErrorDescriptor,
    exit_code: Option<u8>,
    details: Option<Value>,
    extra_fields: Map<String, Value>,
}

impl<'a> ErrorDataBuilder<'a> {
    pub fn new(descriptor: &'a ErrorDescriptor) -> Self {
        Self {
            descriptor,
            exit_code: None,
            details: None,
            extra_fields: Map::new(),
        }
    }

    pub fn exit_code(mut self, exit_code: u8) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context_field(mut self, key: &str, value: Value) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Result<LaunchErrorData, ErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let exit_code = self.exit_code.ok_or(ErrorBuilderError::MissingExitCode {
            code: self.descriptor.code,
        })?;
        if exit_code == 0 {
            return Err(ErrorBuilderError::ZeroExitCode {
                code: self.descriptor.code,
            });
        }

        Ok(LaunchErrorData {
            code: self.descriptor.code,
            message: self.descriptor.message.to_string(),
            remediation: self.descriptor.remediation,
            exit_code,
            details: self.details,
            extra: self.extra_fields,
        })
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErrorBuilderError {
    #[error("exit_code is missing (code={code})")]
    MissingExitCode { code: &'static str },
    #[error("exit_code must be non-zero (code={code})")]
    ZeroExitCode { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}

pub const INVALID_CONFIGURATION_EXIT: u8 = 2;
pub const CONFIG_FILE_EXIT: u8 = 3;
pub const RUNNER_WAIT_EXIT: u8 = 1;
pub const RUNNER_SPAWN_EXIT: u8 = 127;

/// A setting was outside its allowed values.
pub const INVALID_CONFIGURATION_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "invalid_configuration",
    "A launch setting has a value outside its allowed set",
    "Use run_mode = discrete | discrete_random | continuous and true/false for use_simulator and show_live_viz.",
);

/// The launcher file could not be loaded.
pub const CONFIG_FILE_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "config_file_invalid",
    "The launcher file could not be loaded",
    "Fix the launcher file or point --config / CMN_LAUNCH_CONFIG at a valid one; `cmn-launch schema` prints its format.",
);

/// The runner process could not be started.
pub const RUNNER_SPAWN_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "runner_spawn_failed",
    "The runner process could not be started",
    "Check that the runner program exists and is executable, or override it with --runner / CMN_RUNNER.",
);

/// The OS failed while the launcher awaited the runner.
pub const RUNNER_WAIT_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "runner_wait_failed",
    "Lost track of the runner process while waiting for it to exit",
    "Check the runner's own output; the runner may still be running.",
);
