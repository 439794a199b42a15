use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the CLI with an isolated HOME so the session file lives in `home`.
pub fn run_cli_with_env(args: &[&str], home: &Path, url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_authsvc"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("AUTHSVC_PASSWORD");
    cmd.env_remove("RUST_LOG");
    if !url.is_empty() {
        cmd.env("AUTHSVC_URL", url);
    } else {
        cmd.env_remove("AUTHSVC_URL");
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with a custom HOME and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, url: &str) -> String {
    let output = run_cli_with_env(args, home, url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI with a custom HOME and expect failure, returning stderr.
pub fn run_cli_with_env_failure(args: &[&str], home: &Path, url: &str) -> String {
    let output = run_cli_with_env(args, home, url);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Path of the session file inside an isolated HOME.
pub fn session_file(home: &Path) -> PathBuf {
    home.join("data").join("authsvc").join("session.json")
}

/// Read the session file as JSON.
pub fn read_session(home: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(session_file(home)).expect("session file missing");
    serde_json::from_str(&content).expect("session file is not JSON")
}
