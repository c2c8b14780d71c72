use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use crate::lib::{errors::ConfigError, paths};

pub const DEFAULT_RUNNER_PROGRAM: &str = "runner_node";
const MAX_RUNNER_ARGS: usize = 64;

/// Runner process settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSection {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_RUNNER_PROGRAM),
            args: Vec::new(),
            working_dir: None,
        }
    }
}

/// `[runner]` table of the launcher file.
#[derive(Debug, Deserialize, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawRunnerSection {
    /// Runner executable. Bare names are looked up on PATH; relative paths are
    /// resolved against the launcher file's directory. Defaults to `runner_node`.
    pub program: Option<String>,
    /// Fixed arguments placed before the run_mode/use_simulator/show_live_viz values.
    pub args: Option<Vec<String>>,
    /// Working directory for the runner. Relative paths are resolved against the
    /// launcher file's directory.
    pub working_dir: Option<PathBuf>,
}

pub fn parse_runner_section(
    raw: Option<RawRunnerSection>,
    path: &Path,
) -> Result<RunnerSection, ConfigError> {
    let runner_raw = raw.unwrap_or_default();
    let base_dir = paths::parent_dir(path);

    let program = match runner_raw.program {
        Some(program) => {
            validate_program(path, &program)?;
            paths::resolve_program(Path::new(&program), &base_dir)
        }
        None => PathBuf::from(DEFAULT_RUNNER_PROGRAM),
    };

    let args = runner_raw.args.unwrap_or_default();
    validate_args(path, &args)?;

    let working_dir = runner_raw
        .working_dir
        .map(|dir| paths::resolve_against(&dir, &base_dir));
    if let Some(dir) = &working_dir {
        validate_working_dir(path, dir)?;
    }

    Ok(RunnerSection {
        program,
        args,
        working_dir,
    })
}

fn validate_program(path: &Path, program: &str) -> Result<(), ConfigError> {
    if program.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "runner.program",
            message: "Runner program cannot be empty".into(),
        });
    }
    Ok(())
}

fn validate_args(path: &Path, args: &[String]) -> Result<(), ConfigError> {
    if args.len() > MAX_RUNNER_ARGS {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "runner.args",
            message: format!("At most {MAX_RUNNER_ARGS} fixed arguments are allowed"),
        });
    }
    if args.iter().any(|arg| arg.contains('\0')) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "runner.args",
            message: "Arguments cannot contain NUL bytes".into(),
        });
    }
    Ok(())
}

fn validate_working_dir(path: &Path, dir: &Path) -> Result<(), ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "runner.working_dir",
            message: format!("Directory does not exist: {}", dir.display()),
        });
    }
    Ok(())
}
