use crate::common::{base_command, fixture, stdout_of, LaunchWorkspace};

#[test]
fn omitted_settings_launch_with_defaults() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&[]);

    assert!(output.status.success(), "launcher failed: {output:?}");
    assert_eq!(
        workspace.runner_argv(),
        Some(vec!["discrete".into(), "false".into(), "true".into()])
    );
}

#[test]
fn runner_stdout_reaches_the_invoking_terminal() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&["--run-mode", "continuous"]);

    assert!(output.status.success(), "launcher failed: {output:?}");
    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("fake runner: continuous false true"),
        "stdout: {stdout}"
    );
}

#[test]
fn every_run_mode_is_forwarded_unchanged() {
    let workspace = LaunchWorkspace::new("");
    for mode in ["discrete", "discrete_random", "continuous"] {
        workspace.reset();
        let output = workspace.run(&["--run-mode", mode]);

        assert!(output.status.success(), "{mode}: {output:?}");
        let argv = workspace.runner_argv().expect("runner should have run");
        assert_eq!(argv[0], mode);
    }
}

#[test]
fn toggles_without_run_mode_keep_default_mode() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&["--use-simulator", "true", "--show-live-viz", "false"]);

    assert!(output.status.success(), "launcher failed: {output:?}");
    assert_eq!(
        workspace.runner_argv(),
        Some(vec!["discrete".into(), "true".into(), "false".into()])
    );
}

#[test]
fn launch_style_overrides_are_accepted() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&["run_mode:=discrete_random", "use_sim:=1", "use_viz:=off"]);

    assert!(output.status.success(), "launcher failed: {output:?}");
    assert_eq!(
        workspace.runner_argv(),
        Some(vec![
            "discrete_random".into(),
            "true".into(),
            "false".into()
        ])
    );
}

#[test]
fn environment_overrides_launcher_file_defaults() {
    let workspace = LaunchWorkspace::new("[defaults]\nrun_mode = \"continuous\"\nuse_simulator = true");
    let output = workspace
        .command()
        .env("CMN_RUN_MODE", "discrete_random")
        .output()
        .expect("launcher should start");

    assert!(output.status.success(), "launcher failed: {output:?}");
    assert_eq!(
        workspace.runner_argv(),
        Some(vec![
            "discrete_random".into(),
            "true".into(),
            "true".into()
        ])
    );
}

#[test]
fn launcher_file_named_on_command_line_is_used() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace
        .command()
        .args(["--config", &fixture("tests/fixtures/launch_valid.toml")])
        .output()
        .expect("launcher should start");

    assert!(output.status.success(), "launcher failed: {output:?}");
    assert_eq!(
        workspace.runner_argv(),
        Some(vec!["continuous".into(), "true".into(), "false".into()])
    );
}

#[test]
fn runner_exit_status_is_propagated() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace
        .command()
        .env("CMN_FAKE_RUNNER_EXIT", "5")
        .output()
        .expect("launcher should start");

    assert_eq!(output.status.code(), Some(5));
    assert!(workspace.runner_argv().is_some(), "runner should have run");
}

#[test]
fn identical_invocations_launch_independently() {
    let workspace = LaunchWorkspace::new("");
    let args = ["--run-mode", "continuous", "--show-live-viz", "no"];

    let first = workspace.run(&args);
    let first_argv = workspace.runner_argv();
    workspace.reset();
    let second = workspace.run(&args);
    let second_argv = workspace.runner_argv();

    assert!(first.status.success() && second.status.success());
    assert!(first_argv.is_some());
    assert_eq!(first_argv, second_argv);
}

#[test]
fn dry_run_prints_plan_without_starting_runner() {
    let workspace = LaunchWorkspace::new("");
    let output = workspace.run(&["--dry-run", "--run-mode", "continuous"]);

    assert!(output.status.success(), "launcher failed: {output:?}");
    assert!(workspace.runner_argv().is_none(), "runner must not start");

    let plan: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("dry-run prints JSON");
    assert_eq!(plan["positional_args"], serde_json::json!(["continuous", "false", "true"]));
    assert_eq!(plan["sources"]["run_mode"], "command_line");
    assert_eq!(plan["mode"]["localization"], "particle_filter");
}

#[test]
fn builtin_runner_is_used_without_launcher_file() {
    let dir = tempfile::tempdir().expect("can create temporary directory");
    let output = base_command(dir.path())
        .arg("--dry-run")
        .output()
        .expect("launcher should start");

    assert!(output.status.success(), "launcher failed: {output:?}");
    let plan: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("dry-run prints JSON");
    assert_eq!(plan["program"], "runner_node");
    assert!(plan.get("config_path").is_none());
}
