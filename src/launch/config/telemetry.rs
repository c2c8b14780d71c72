use tracing::{debug, info};

use super::{ConfigLocation, ConfigOrigin, LauncherConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_env_source(location: &ConfigLocation) {
    match location.origin {
        ConfigOrigin::CommandLine => info!(
            target: "cmn_launch::config",
            path = %location.path.display(),
            "Loading launcher file named by --config"
        ),
        ConfigOrigin::Environment => info!(
            target: "cmn_launch::config",
            path = %location.path.display(),
            env = CONFIG_ENV_KEY,
            "Loading launcher file named by CMN_LAUNCH_CONFIG"
        ),
        ConfigOrigin::Default => debug!(
            target: "cmn_launch::config",
            path = %location.path.display(),
            default = DEFAULT_CONFIG_PATH,
            "No launcher file named; looking for the default one"
        ),
    }
}

pub fn log_default_missing(path: &std::path::Path) {
    debug!(
        target: "cmn_launch::config",
        path = %path.display(),
        "No launcher file found; using built-in runner and defaults"
    );
}

pub fn log_loaded(config: &LauncherConfig) {
    info!(
        target: "cmn_launch::config",
        path = %config
            .source_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        runner = %config.runner.program.display(),
        runner_args = config.runner.args.len(),
        working_dir = ?config.runner.working_dir,
        run_mode = ?config.defaults.run_mode,
        use_simulator = ?config.defaults.use_simulator,
        show_live_viz = ?config.defaults.show_live_viz,
        "Launcher file loaded successfully"
    );
}
