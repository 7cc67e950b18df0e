//! Command-line behavior that needs no storage service
//!
//! Every case here fails or finishes before a request would be sent.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run spc in an isolated directory with a private config location
fn run_spc(args: &[&str], dir: &Path, credentials: bool) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_spc"));
    cmd.args(args)
        .current_dir(dir)
        .env("SPC_CONFIG_DIR", dir.join("config"))
        .env_remove("RUST_LOG");

    if credentials {
        cmd.env("SPACES_ACCESS_KEY_ID", "AKIDEXAMPLE")
            .env("SPACES_SECRET_ACCESS_KEY", "secret-example");
    } else {
        cmd.env_remove("SPACES_ACCESS_KEY_ID")
            .env_remove("SPACES_SECRET_ACCESS_KEY");
    }

    cmd.output().expect("Failed to execute spc")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_help_lists_actions() {
    let dir = TempDir::new().unwrap();
    let output = run_spc(&["--help"], dir.path(), false);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("upload"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("delete"));
}

#[test]
fn test_unknown_action_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = run_spc(&["sync"], dir.path(), true);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_credentials() {
    let dir = TempDir::new().unwrap();
    let output = run_spc(
        &["list", "--bucket-url", "https://media.nyc3.digitaloceanspaces.com"],
        dir.path(),
        false,
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("SPACES_ACCESS_KEY_ID"));
}

#[test]
fn test_credentials_from_dotenv() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "SPACES_ACCESS_KEY_ID=AKIDEXAMPLE\nSPACES_SECRET_ACCESS_KEY=secret-example\n",
    )
    .unwrap();

    // Credentials resolve, so the failure is the malformed URL
    let output = run_spc(&["list", "--bucket-url", "https://onlyhost/"], dir.path(), false);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Malformed URL"));
}

#[test]
fn test_list_malformed_url() {
    let dir = TempDir::new().unwrap();
    let output = run_spc(&["list", "--bucket-url", "https://onlyhost/"], dir.path(), true);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Malformed URL"));
}

#[test]
fn test_upload_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let output = run_spc(
        &[
            "upload",
            "--bucket-url",
            "https://media.nyc3.digitaloceanspaces.com",
            "--file-path",
            missing.to_str().unwrap(),
        ],
        dir.path(),
        true,
    );
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("File not found"));
}

#[test]
fn test_delete_invalid_json() {
    let dir = TempDir::new().unwrap();
    let output = run_spc(
        &["delete", "--urls", "https://media.nyc3.digitaloceanspaces.com/a.txt"],
        dir.path(),
        true,
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("JSON array"));
}

#[test]
fn test_delete_malformed_urls_json_summary() {
    let dir = TempDir::new().unwrap();
    let output = run_spc(
        &["delete", "--json", "--urls", r#"["https://onlyhost/a.txt", "not a url"]"#],
        dir.path(),
        true,
    );
    assert_eq!(output.status.code(), Some(1));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["status"], "failed");
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["failed"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_file_newer_schema() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "schema_version = 99\n").unwrap();

    let output = run_spc(
        &[
            "list",
            "--bucket-url",
            "https://media.nyc3.digitaloceanspaces.com",
            "--config",
            config.to_str().unwrap(),
        ],
        dir.path(),
        true,
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("newer than supported"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let output = run_spc(&["completions", "bash"], dir.path(), false);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("spc"));
}
