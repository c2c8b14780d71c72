use crate::common::{base_command, fixture, stderr_of, LaunchWorkspace};

fn assert_invalid_configuration(output: &std::process::Output) {
    assert_eq!(output.status.code(), Some(2), "output: {output:?}");
    let stderr = stderr_of(output);
    assert!(
        stderr.contains("\"code\":\"invalid_configuration\""),
        "stderr: {stderr}"
    );
}

#[test]
fn unknown_run_mode_fails_before_spawning() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&["--run-mode", "fast"]);

    assert_invalid_configuration(&output);
    assert!(workspace.runner_argv().is_none(), "runner must not start");
}

#[test]
fn blank_run_mode_is_not_a_default() {
    let workspace = LaunchWorkspace::new("");
    for value in ["", "   "] {
        let output = workspace.run(&["--run-mode", value]);
        assert_invalid_configuration(&output);
    }
    assert!(workspace.runner_argv().is_none(), "runner must not start");
}

#[test]
fn unparsable_toggle_is_invalid_configuration() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&["--show-live-viz", "sometimes"]);

    assert_invalid_configuration(&output);
    assert!(stderr_of(&output).contains("show_live_viz"));
}

#[test]
fn invalid_environment_value_is_rejected() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace
        .command()
        .env("CMN_RUN_MODE", "Discrete")
        .output()
        .expect("launcher should start");

    assert_invalid_configuration(&output);
    assert!(stderr_of(&output).contains("\"source\":\"environment\""));
}

#[test]
fn invalid_launcher_file_default_is_rejected() {
    let dir = tempfile::tempdir().expect("can create temporary directory");
    let output = base_command(dir.path())
        .args(["--config", &fixture("tests/fixtures/launch_invalid_mode.toml")])
        .output()
        .expect("launcher should start");

    assert_invalid_configuration(&output);
}

#[test]
fn unknown_override_is_rejected() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&["speed:=fast"]);

    assert_invalid_configuration(&output);
    assert!(workspace.runner_argv().is_none(), "runner must not start");
}

#[test]
fn missing_runner_is_a_spawn_failure() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&["--runner", "/nonexistent/cmn-runner"]);

    assert_eq!(output.status.code(), Some(127), "output: {output:?}");
    assert!(stderr_of(&output).contains("\"code\":\"runner_spawn_failed\""));
}

#[test]
fn missing_named_launcher_file_is_a_config_error() {
    let dir = tempfile::tempdir().expect("can create temporary directory");
    let output = base_command(dir.path())
        .args(["--config", "missing.toml"])
        .output()
        .expect("launcher should start");

    assert_eq!(output.status.code(), Some(3), "output: {output:?}");
    assert!(stderr_of(&output).contains("\"code\":\"config_file_invalid\""));
}
