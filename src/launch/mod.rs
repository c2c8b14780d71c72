//! Launch descriptor: settings, launcher file and runtime.
pub mod config;
pub mod runtime;
pub mod settings;
