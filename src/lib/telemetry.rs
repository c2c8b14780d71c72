//! Telemetry initialization and launch span helpers.

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs on stderr so the runner
/// keeps stdout to itself.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and finish of one runner launch.
pub struct LaunchSpan {
    span: Span,
    started_at: Instant,
    launch_id: Uuid,
    started_at_wall: String,
}

impl LaunchSpan {
    /// Start a launch span.
    pub fn start(launch_id: Uuid, run_mode: &'static str) -> Self {
        let span = info_span!(
            target: "cmn_launch::runner",
            "runner_launch",
            %launch_id,
            run_mode
        );
        Self {
            span,
            started_at: Instant::now(),
            launch_id,
            started_at_wall: Utc::now().to_rfc3339(),
        }
    }

    pub fn launch_id(&self) -> Uuid {
        self.launch_id
    }

    pub fn started_at(&self) -> &str {
        &self.started_at_wall
    }

    /// Close the span while recording status and completion info.
    pub fn finish(self, status: &'static str, exit_code: Option<i32>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "cmn_launch::runner",
            launch_id = %self.launch_id,
            started_at = %self.started_at_wall,
            status = status,
            exit_code = exit_code,
            elapsed_ms = elapsed_ms,
            "Runner exited"
        );
    }
}

/// Payload for logging the resolved launch as structured telemetry.
#[derive(Debug, Serialize)]
pub struct LaunchModeTelemetry<'a> {
    pub run_mode: &'a str,
    pub run_mode_source: &'a str,
    pub use_simulator: bool,
    pub use_simulator_source: &'a str,
    pub show_live_viz: bool,
    pub show_live_viz_source: &'a str,
    pub localization: &'a str,
    pub config_path: Option<&'a str>,
    pub program: &'a str,
    pub argv: &'a [String],
}

/// Emit the resolved launch to `tracing`.
pub fn emit_launch_mode(telemetry: &LaunchModeTelemetry<'_>) {
    info!(
        target: "cmn_launch::runtime",
        run_mode = telemetry.run_mode,
        run_mode_source = telemetry.run_mode_source,
        use_simulator = telemetry.use_simulator,
        use_simulator_source = telemetry.use_simulator_source,
        show_live_viz = telemetry.show_live_viz,
        show_live_viz_source = telemetry.show_live_viz_source,
        localization = telemetry.localization,
        config_path = telemetry.config_path.unwrap_or(""),
        program = telemetry.program,
        argv = ?telemetry.argv,
        "Starting runner"
    );
}
