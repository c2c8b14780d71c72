use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_cmn-launch");

const LAUNCH_ENV_KEYS: [&str; 5] = [
    "CMN_RUN_MODE",
    "CMN_USE_SIMULATOR",
    "CMN_SHOW_LIVE_VIZ",
    "CMN_LAUNCH_CONFIG",
    "CMN_RUNNER",
];

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

/// Scratch workspace holding a launcher file that runs the fake runner.
pub struct LaunchWorkspace {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub argv_path: PathBuf,
}

impl LaunchWorkspace {
    /// `defaults` is appended verbatim after the `[runner]` table.
    pub fn new(defaults: &str) -> Self {
        let dir = tempfile::tempdir().expect("can create temporary directory");
        let script = fixture("tests/fixtures/fake-runner.sh");
        let config_path = dir.path().join("cmn-launch.toml");
        fs::write(
            &config_path,
            format!("[runner]\nprogram = \"sh\"\nargs = [{script:?}]\n\n{defaults}\n"),
        )
        .expect("can write launcher file");
        let argv_path = dir.path().join("argv.txt");
        Self {
            dir,
            config_path,
            argv_path,
        }
    }

    /// Command running in the workspace, so the launcher file is picked up as
    /// the default `cmn-launch.toml`.
    pub fn command(&self) -> Command {
        let mut command = base_command(self.dir.path());
        command.env("CMN_FAKE_RUNNER_OUT", &self.argv_path);
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("launcher should start")
    }

    /// Arguments the fake runner received, or `None` if it never ran.
    pub fn runner_argv(&self) -> Option<Vec<String>> {
        let content = fs::read_to_string(&self.argv_path).ok()?;
        Some(content.lines().map(str::to_string).collect())
    }

    pub fn reset(&self) {
        let _ = fs::remove_file(&self.argv_path);
    }
}

/// Launcher command with a clean launch environment.
pub fn base_command(cwd: &Path) -> Command {
    let mut command = Command::new(BINARY_PATH);
    command.current_dir(cwd).env("RUST_LOG", "warn");
    for key in LAUNCH_ENV_KEYS {
        command.env_remove(key);
    }
    command
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
