//! LaunchProfile and setting/config/runner resolution.
//!
//! Each value is taken from the first source that provides it, in the order
//! command line → environment → launcher file → built-in default. Every value
//! that is provided is validated, even when a higher-priority source shadows it.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    launch::{
        config::{
            ConfigLocation, ConfigOrigin, DefaultsSection, LauncherConfig, RunnerSection,
            CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH,
        },
        settings::{
            parse_run_mode, parse_toggle, LaunchSettings, SettingField, SettingSource,
        },
    },
    lib::{errors::LaunchError, paths},
};

pub const RUNNER_ENV_KEY: &str = "CMN_RUNNER";

/// Setting tokens supplied on the command line, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLineSettings {
    pub run_mode: Option<String>,
    pub use_simulator: Option<String>,
    pub show_live_viz: Option<String>,
}

impl CommandLineSettings {
    pub fn get(&self, field: SettingField) -> Option<&str> {
        match field {
            SettingField::RunMode => self.run_mode.as_deref(),
            SettingField::UseSimulator => self.use_simulator.as_deref(),
            SettingField::ShowLiveViz => self.show_live_viz.as_deref(),
        }
    }

    /// Record a value for `field`. Giving the same field twice is an error.
    pub fn set(&mut self, field: SettingField, value: String) -> Result<(), LaunchError> {
        let slot = match field {
            SettingField::RunMode => &mut self.run_mode,
            SettingField::UseSimulator => &mut self.use_simulator,
            SettingField::ShowLiveViz => &mut self.show_live_viz,
        };
        if slot.is_some() {
            return Err(LaunchError::invalid(
                field.as_str(),
                value,
                SettingSource::CommandLine,
                "given more than once on the command line",
            ));
        }
        *slot = Some(value);
        Ok(())
    }
}

/// Which source supplied each resolved setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingSources {
    pub run_mode: SettingSource,
    pub use_simulator: SettingSource,
    pub show_live_viz: SettingSource,
}

/// Validated settings plus their provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub settings: LaunchSettings,
    pub sources: SettingSources,
}

/// Launch intent parsed from the command line, before the launcher file is read.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub config: ConfigLocation,
    pub settings: CommandLineSettings,
    pub runner_override: Option<PathBuf>,
    pub dry_run: bool,
}

/// Fully resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub settings: ResolvedSettings,
    pub runner: RunnerSection,
    pub runner_source: SettingSource,
    pub config_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl LaunchProfile {
    /// Resolve against the process environment.
    pub fn resolve(request: LaunchRequest, config: LauncherConfig) -> Result<Self, LaunchError> {
        Self::resolve_with(request, config, process_env)
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with(
        request: LaunchRequest,
        config: LauncherConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LaunchError> {
        let settings = resolve_settings(&request.settings, &lookup, &config.defaults)?;
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let (runner, runner_source) =
            resolve_runner(request.runner_override, &lookup, config.runner, &cwd);

        Ok(Self {
            settings,
            runner,
            runner_source,
            config_path: config.source_path,
            dry_run: request.dry_run,
        })
    }
}

/// Read an environment variable. Set-but-empty and non-UTF-8 values count as provided.
pub fn process_env(key: &str) -> Option<String> {
    env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}

/// Resolve the launcher file path in the order: CLI override → env var → default.
pub fn resolve_config_path(
    override_path: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigLocation> {
    let (path, origin) = match override_path {
        Some(path) => (path, ConfigOrigin::CommandLine),
        None => match lookup(CONFIG_ENV_KEY).filter(|value| !value.trim().is_empty()) {
            Some(value) => (PathBuf::from(value), ConfigOrigin::Environment),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigOrigin::Default),
        },
    };

    if path.is_absolute() {
        return Ok(ConfigLocation { path, origin });
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(ConfigLocation {
        path: cwd.join(path),
        origin,
    })
}

/// Resolve all three settings.
pub fn resolve_settings(
    cli: &CommandLineSettings,
    lookup: impl Fn(&str) -> Option<String>,
    file: &DefaultsSection,
) -> Result<ResolvedSettings, LaunchError> {
    let defaults = LaunchSettings::default();

    let (run_mode, run_mode_source) = resolve_field(
        SettingField::RunMode,
        cli,
        &lookup,
        file.run_mode.as_deref(),
        |raw, origin| parse_run_mode(raw, origin),
    )?
    .unwrap_or((defaults.run_mode, SettingSource::Default));

    let (use_simulator, use_simulator_source) = resolve_field(
        SettingField::UseSimulator,
        cli,
        &lookup,
        file.use_simulator.as_deref(),
        |raw, origin| parse_toggle(SettingField::UseSimulator, raw, origin),
    )?
    .unwrap_or((defaults.use_simulator, SettingSource::Default));

    let (show_live_viz, show_live_viz_source) = resolve_field(
        SettingField::ShowLiveViz,
        cli,
        &lookup,
        file.show_live_viz.as_deref(),
        |raw, origin| parse_toggle(SettingField::ShowLiveViz, raw, origin),
    )?
    .unwrap_or((defaults.show_live_viz, SettingSource::Default));

    Ok(ResolvedSettings {
        settings: LaunchSettings {
            run_mode,
            use_simulator,
            show_live_viz,
        },
        sources: SettingSources {
            run_mode: run_mode_source,
            use_simulator: use_simulator_source,
            show_live_viz: show_live_viz_source,
        },
    })
}

fn resolve_field<T>(
    field: SettingField,
    cli: &CommandLineSettings,
    lookup: &impl Fn(&str) -> Option<String>,
    file: Option<&str>,
    parse: impl Fn(&str, SettingSource) -> Result<T, LaunchError>,
) -> Result<Option<(T, SettingSource)>, LaunchError> {
    let env_value = lookup(field.env_key());
    let candidates = [
        (SettingSource::CommandLine, cli.get(field)),
        (SettingSource::Environment, env_value.as_deref()),
        (SettingSource::ConfigFile, file),
    ];

    let mut chosen = None;
    for (origin, raw) in candidates {
        let Some(raw) = raw else { continue };
        let value = parse(raw, origin)?;
        if chosen.is_none() {
            chosen = Some((value, origin));
        }
    }
    Ok(chosen)
}

/// Resolve the runner program in the order: CLI override → env var → launcher file.
pub fn resolve_runner(
    override_program: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
    file_runner: RunnerSection,
    cwd: &Path,
) -> (RunnerSection, SettingSource) {
    let file_source = if file_runner == RunnerSection::default() {
        SettingSource::Default
    } else {
        SettingSource::ConfigFile
    };

    let (program, source) = match override_program {
        Some(program) => (program, SettingSource::CommandLine),
        None => match lookup(RUNNER_ENV_KEY).filter(|value| !value.trim().is_empty()) {
            Some(value) => (PathBuf::from(value), SettingSource::Environment),
            None => return (file_runner, file_source),
        },
    };

    let program = paths::resolve_program(&program, cwd);
    (
        RunnerSection {
            program,
            ..file_runner
        },
        source,
    )
}
