use schemars::JsonSchema;
use serde::Deserialize;

/// A setting value as written in the launcher file. Booleans, 0/1 and strings
/// are all accepted; the token is validated during setting resolution so that
/// a bad value surfaces as `InvalidConfiguration` like any other source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawToken {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl RawToken {
    pub fn into_token(self) -> String {
        match self {
            RawToken::Flag(flag) => flag.to_string(),
            RawToken::Number(number) => number.to_string(),
            RawToken::Text(text) => text,
        }
    }
}

/// `[defaults]` table of the launcher file.
#[derive(Debug, Deserialize, Default, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawDefaultsSection {
    /// One of `discrete`, `discrete_random`, `continuous`.
    pub run_mode: Option<RawToken>,
    /// Synthesize observations from the coarse map instead of the perception model.
    pub use_simulator: Option<RawToken>,
    /// Show the live visualization.
    pub show_live_viz: Option<RawToken>,
}

/// Unvalidated defaults carried from the launcher file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsSection {
    pub run_mode: Option<String>,
    pub use_simulator: Option<String>,
    pub show_live_viz: Option<String>,
}

impl DefaultsSection {
    pub fn is_empty(&self) -> bool {
        self.run_mode.is_none() && self.use_simulator.is_none() && self.show_live_viz.is_none()
    }
}

pub fn parse_defaults_section(raw: Option<RawDefaultsSection>) -> DefaultsSection {
    let raw = raw.unwrap_or_default();
    DefaultsSection {
        run_mode: raw.run_mode.map(RawToken::into_token),
        use_simulator: raw.use_simulator.map(RawToken::into_token),
        show_live_viz: raw.show_live_viz.map(RawToken::into_token),
    }
}
