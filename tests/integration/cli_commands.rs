use serde_json::Value;

use crate::common::{base_command, stdout_of};

#[test]
fn modes_lists_each_run_mode_profile() {
    let dir = tempfile::tempdir().expect("can create temporary directory");
    let output = base_command(dir.path())
        .arg("modes")
        .output()
        .expect("launcher should start");

    assert!(output.status.success(), "modes failed: {output:?}");
    let value: Value = serde_json::from_str(&stdout_of(&output)).expect("modes prints JSON");
    let modes = value["modes"].as_array().expect("modes array");
    assert_eq!(modes.len(), 3);
    assert_eq!(modes[0]["sensing"], "panoramic");
    assert_eq!(modes[1]["randomized_actions"], true);
    assert_eq!(modes[2]["action_space"], "continuous_velocity");
}

#[test]
fn schema_prints_launcher_file_schema() {
    let dir = tempfile::tempdir().expect("can create temporary directory");
    let output = base_command(dir.path())
        .arg("schema")
        .output()
        .expect("launcher should start");

    assert!(output.status.success(), "schema failed: {output:?}");
    let value: Value = serde_json::from_str(&stdout_of(&output)).expect("schema prints JSON");
    assert!(value["properties"].get("runner").is_some());
    assert!(value["properties"].get("defaults").is_some());
}

#[test]
fn help_documents_each_setting() {
    let dir = tempfile::tempdir().expect("can create temporary directory");
    let output = base_command(dir.path())
        .arg("--help")
        .output()
        .expect("launcher should start");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for needle in [
        "--run-mode",
        "--use-simulator",
        "--show-live-viz",
        "discrete_random",
        "particle filter",
        "CMN_RUN_MODE",
    ] {
        assert!(stdout.contains(needle), "--help should mention {needle}:\n{stdout}");
    }
}
