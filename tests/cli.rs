use assert_cmd::Command;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("endpoint-cli").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn group_without_callable_exits_with_usage_error() {
    let out = bin().arg("list").output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Invalid endpoint"), "stderr: {stderr}");
    assert!(out.stdout.is_empty());
}

#[test]
fn bare_invocation_is_a_usage_error() {
    let out = bin().output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn list_dir_prints_entries() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.md"), "x").unwrap();
    std::fs::write(dir.path().join(".secret"), "x").unwrap();
    std::fs::create_dir(dir.path().join("src")).unwrap();

    let out = bin()
        .args(["list", "dir", "--path"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "notes.md\nsrc/\n");

    let out = bin()
        .args(["list", "dir", "--all", "--path"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        ".secret\nnotes.md\nsrc/\n"
    );
}

#[test]
fn list_files_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.rs"), "").unwrap();
    std::fs::write(dir.path().join("b.toml"), "").unwrap();

    let out = bin()
        .args(["list", "files", "--ext", "rs", "--json", "--path"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value, serde_json::json!(["a.rs"]));
}

#[test]
fn echo_with_keyword_arguments() {
    let out = bin()
        .args(["echo", "hello", "--upper", "lang=rust", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value, serde_json::json!({"message": "HELLO", "lang": "rust"}));
}

#[test]
fn malformed_keyword_argument_fails() {
    let out = bin().args(["echo", "hi", "oops"]).output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("malformed keyword argument 'oops'"), "stderr: {stderr}");
}

#[test]
fn help_is_derived_from_docs() {
    let out = bin().args(["list", "dir", "--help"]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("List the entries of a directory."));
    assert!(stdout.contains("directory to list"));
    assert!(stdout.contains("--all"));

    let out = bin().args(["echo", "--help"]).output().unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Optional keyword arguments. Specify them as key=value"));
}
