//! Launch settings: the run mode and the two toggles forwarded to the runner.
//!
//! Every value, whatever its source, goes through [`parse_run_mode`] or
//! [`parse_toggle`]. A value that was provided but does not parse is an
//! `InvalidConfiguration` error; it never falls back to a default.
use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::lib::errors::LaunchError;

pub const DEFAULT_RUN_MODE: RunMode = RunMode::Discrete;
pub const DEFAULT_USE_SIMULATOR: bool = false;
pub const DEFAULT_SHOW_LIVE_VIZ: bool = true;

const RUN_MODE_EXPECTED: &str = "expected one of discrete, discrete_random, continuous";
const TOGGLE_EXPECTED: &str = "expected true/false, 1/0, yes/no or on/off";

/// Operating mode of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Panoramic sensing, discrete Bayes filter, discrete actions.
    Discrete,
    /// As `discrete`, but planned actions are replaced by random ones.
    DiscreteRandom,
    /// Single-image sensing, particle filter, continuous velocity commands.
    Continuous,
}

impl RunMode {
    pub const ALL: [RunMode; 3] = [
        RunMode::Discrete,
        RunMode::DiscreteRandom,
        RunMode::Continuous,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            RunMode::Discrete => "discrete",
            RunMode::DiscreteRandom => "discrete_random",
            RunMode::Continuous => "continuous",
        }
    }

    pub const fn sensing(&self) -> Sensing {
        match self {
            RunMode::Discrete | RunMode::DiscreteRandom => Sensing::Panoramic,
            RunMode::Continuous => Sensing::SingleImage,
        }
    }

    pub const fn localization(&self) -> Localization {
        match self {
            RunMode::Discrete | RunMode::DiscreteRandom => Localization::DiscreteBayesFilter,
            RunMode::Continuous => Localization::ParticleFilter,
        }
    }

    pub const fn action_space(&self) -> ActionSpace {
        match self {
            RunMode::Discrete | RunMode::DiscreteRandom => ActionSpace::Discrete,
            RunMode::Continuous => ActionSpace::ContinuousVelocity,
        }
    }

    pub const fn randomizes_actions(&self) -> bool {
        matches!(self, RunMode::DiscreteRandom)
    }

    /// The runner only honours a "yaw is known" assumption in the discrete modes.
    pub const fn supports_known_yaw(&self) -> bool {
        matches!(self, RunMode::Discrete | RunMode::DiscreteRandom)
    }

    pub fn profile(&self) -> ModeProfile {
        ModeProfile {
            run_mode: *self,
            sensing: self.sensing(),
            localization: self.localization(),
            action_space: self.action_space(),
            randomized_actions: self.randomizes_actions(),
            supports_known_yaw: self.supports_known_yaw(),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = String;

    /// Exact, case-sensitive literal match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| RUN_MODE_EXPECTED.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensing {
    Panoramic,
    SingleImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Localization {
    DiscreteBayesFilter,
    ParticleFilter,
}

impl Localization {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Localization::DiscreteBayesFilter => "discrete_bayes_filter",
            Localization::ParticleFilter => "particle_filter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSpace {
    Discrete,
    ContinuousVelocity,
}

/// Where observations come from, selected by `use_simulator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationSource {
    CoarseMap,
    PerceptionModel,
}

impl ObservationSource {
    pub const fn from_use_simulator(use_simulator: bool) -> Self {
        if use_simulator {
            ObservationSource::CoarseMap
        } else {
            ObservationSource::PerceptionModel
        }
    }
}

/// Capabilities implied by a run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeProfile {
    pub run_mode: RunMode,
    pub sensing: Sensing,
    pub localization: Localization,
    pub action_space: ActionSpace,
    pub randomized_actions: bool,
    pub supports_known_yaw: bool,
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingSource {
    CommandLine,
    Environment,
    ConfigFile,
    Default,
}

impl SettingSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SettingSource::CommandLine => "command line",
            SettingSource::Environment => "environment",
            SettingSource::ConfigFile => "launcher file",
            SettingSource::Default => "default",
        }
    }
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three launch parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    RunMode,
    UseSimulator,
    ShowLiveViz,
}

impl SettingField {
    pub const ALL: [SettingField; 3] = [
        SettingField::RunMode,
        SettingField::UseSimulator,
        SettingField::ShowLiveViz,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SettingField::RunMode => "run_mode",
            SettingField::UseSimulator => "use_simulator",
            SettingField::ShowLiveViz => "show_live_viz",
        }
    }

    pub const fn env_key(&self) -> &'static str {
        match self {
            SettingField::RunMode => "CMN_RUN_MODE",
            SettingField::UseSimulator => "CMN_USE_SIMULATOR",
            SettingField::ShowLiveViz => "CMN_SHOW_LIVE_VIZ",
        }
    }

    /// Look up a field by its launch-argument name. `use_sim` and `use_viz` are
    /// accepted as the short names used by older launch files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "run_mode" => Some(SettingField::RunMode),
            "use_simulator" | "use_sim" => Some(SettingField::UseSimulator),
            "show_live_viz" | "use_viz" => Some(SettingField::ShowLiveViz),
            _ => None,
        }
    }
}

/// Validated launch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchSettings {
    pub run_mode: RunMode,
    pub use_simulator: bool,
    pub show_live_viz: bool,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            run_mode: DEFAULT_RUN_MODE,
            use_simulator: DEFAULT_USE_SIMULATOR,
            show_live_viz: DEFAULT_SHOW_LIVE_VIZ,
        }
    }
}

impl LaunchSettings {
    /// Positional arguments in the order the runner expects them.
    pub fn positional_args(&self) -> [String; 3] {
        [
            self.run_mode.as_str().to_string(),
            self.use_simulator.to_string(),
            self.show_live_viz.to_string(),
        ]
    }

    pub fn observation_source(&self) -> ObservationSource {
        ObservationSource::from_use_simulator(self.use_simulator)
    }
}

/// Parse a run mode token. Empty or whitespace-only input is rejected.
pub fn parse_run_mode(raw: &str, origin: SettingSource) -> Result<RunMode, LaunchError> {
    if raw.trim().is_empty() {
        return Err(LaunchError::invalid(
            SettingField::RunMode.as_str(),
            raw,
            origin,
            "run_mode must not be empty",
        ));
    }
    raw.parse::<RunMode>().map_err(|message| {
        LaunchError::invalid(SettingField::RunMode.as_str(), raw, origin, message)
    })
}

/// Parse a boolean toggle permissively: surrounding whitespace and letter case
/// are ignored.
pub fn parse_toggle(
    field: SettingField,
    raw: &str,
    origin: SettingSource,
) -> Result<bool, LaunchError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(LaunchError::invalid(
            field.as_str(),
            raw,
            origin,
            TOGGLE_EXPECTED,
        )),
    }
}
