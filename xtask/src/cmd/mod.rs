pub mod help_baseline;
pub mod preflight;
