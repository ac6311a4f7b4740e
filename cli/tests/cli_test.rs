use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// None of these invocations can reach a cluster: each one fails before a client is created, so an
/// unreachable kubeconfig is passed to be sure.
fn secretsys() -> Command {
    let mut cmd = Command::cargo_bin("secretsys").unwrap();
    cmd.args(["--kubeconfig", "/nonexistent/kubeconfig"]);
    cmd
}

#[test]
fn missing_file_flag() {
    secretsys()
        .args(["secret", "update", "db-pass", "--label", "env=prod"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Please specify either a file name or STDIN ('-') with --file",
        ));
}

#[test]
fn empty_file_flag() {
    secretsys()
        .args(["secret", "update", "db-pass", "--file", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("with --file"));
}

#[test]
fn missing_name() {
    secretsys()
        .args(["secret", "update", "--file", "-"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn too_many_names() {
    secretsys()
        .args(["secret", "update", "one", "two", "--file", "-"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn malformed_label() {
    secretsys()
        .args(["secret", "update", "db-pass", "-f", "-", "-l", "=prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the key is empty"));
}

#[test]
fn unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secret.txt");
    secretsys()
        .args(["secret", "update", "db-pass", "-f"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unable to open file").and(
            predicate::str::contains(path.to_string_lossy().into_owned()),
        ));
}

#[test]
fn readable_file_reaches_client_creation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secret.txt");
    fs::write(&path, "hunter2").unwrap();
    secretsys()
        .args(["secret", "update", "db-pass", "-f"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unable to create client"));
}

#[cfg(feature = "integ")]
mod integ {
    use super::*;

    /// Requires a cluster reachable through the default kubeconfig.
    #[test]
    fn update_prints_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.txt");
        fs::write(&path, "hunter2").unwrap();
        let name = format!("secretsys-integ-{}", std::process::id());

        let output = Command::cargo_bin("secretsys")
            .unwrap()
            .args(["secret", "update", &name, "--label", "env=integ", "-f"])
            .arg(&path)
            .output()
            .unwrap();

        assert!(output.status.success(), "{:?}", output);
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.ends_with('\n'));
        assert_eq!(stdout.lines().count(), 1);
        assert!(!stdout.trim().is_empty());
    }
}
