//! Integration tests for atservice-cli.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[types]]
name = "com.example.FooImpl"
[[types.annotations]]
type = "org.commonjava.atservice.annotation.Service"
value = "com.example.Foo.class"

[[types]]
name = "com.example.BarImpl"
[[types.annotations]]
type = "org.commonjava.atservice.annotation.Service"
value = ["com.example.Foo.class", "com.example.Baz.class"]
"#;

/// Command rooted in `dir` with config and logging isolated from the host.
fn atservice(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("atservice").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace_with_manifest() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("types.atservice.toml"), MANIFEST).unwrap();
    temp
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_flag() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("META-INF/services"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_without_input_is_usage_error() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .arg("generate")
        .assert()
        .code(2);
}

// ── generate ──────────────────────────────────────────────────────────────────

#[test]
fn generate_writes_registry_files() {
    let temp = workspace_with_manifest();

    atservice(temp.path())
        .args(["generate", "types.atservice.toml", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.Foo"));

    let services = temp.path().join("out/META-INF/services");
    assert_eq!(
        fs::read_to_string(services.join("com.example.Foo")).unwrap(),
        "com.example.FooImpl\ncom.example.BarImpl\n"
    );
    assert_eq!(
        fs::read_to_string(services.join("com.example.Baz")).unwrap(),
        "com.example.BarImpl\n"
    );
}

#[test]
fn generate_reads_json_manifests_from_directory() {
    let temp = TempDir::new().unwrap();
    let manifests = temp.path().join("manifests");
    fs::create_dir(&manifests).unwrap();
    fs::write(
        manifests.join("a.atservice.json"),
        r#"{"types": [{"name": "com.example.Impl", "interfaces": ["com.example.Spi"],
            "annotations": [{"type": "org.commonjava.atservice.annotation.Service"}]}]}"#,
    )
    .unwrap();
    fs::write(manifests.join("notes.txt"), "ignored").unwrap();

    atservice(temp.path())
        .args(["gen", "manifests", "--output", "out"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/META-INF/services/com.example.Spi")).unwrap(),
        "com.example.Impl\n"
    );
}

#[test]
fn generate_honours_custom_marker() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("types.atservice.toml"),
        r#"
[[types]]
name = "com.example.Impl"
[[types.annotations]]
type = "com.acme.Provides"
value = "com.example.Spi"
"#,
    )
    .unwrap();

    atservice(temp.path())
        .args(["generate", "types.atservice.toml", "-o", "default"])
        .assert()
        .success();
    assert!(!temp.path().join("default/META-INF").exists());

    atservice(temp.path())
        .args([
            "generate",
            "types.atservice.toml",
            "-o",
            "custom",
            "--marker",
            "com.acme.Provides",
        ])
        .assert()
        .success();
    assert!(
        temp.path()
            .join("custom/META-INF/services/com.example.Spi")
            .is_file()
    );
}

#[test]
fn dry_run_writes_nothing() {
    let temp = workspace_with_manifest();

    atservice(temp.path())
        .args(["generate", "types.atservice.toml", "-o", "out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("com.example.BarImpl"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn generate_json_summary() {
    let temp = workspace_with_manifest();

    let assert = atservice(temp.path())
        .args([
            "--output-format",
            "json",
            "generate",
            "types.atservice.toml",
            "-o",
            "out",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["written"], 2);
    assert_eq!(summary["failed"], 0);
    assert_eq!(summary["entries"][0]["service"], "com.example.Foo");
    assert_eq!(summary["entries"][0]["implementations"], 2);
}

#[test]
fn output_root_from_config_file() {
    let temp = workspace_with_manifest();
    fs::write(
        temp.path().join(".atservice.toml"),
        "[output]\nroot = \"from-config\"\n",
    )
    .unwrap();

    atservice(temp.path())
        .args(["generate", "types.atservice.toml"])
        .assert()
        .success();

    assert!(
        temp.path()
            .join("from-config/META-INF/services/com.example.Baz")
            .is_file()
    );
}

// ── failures ──────────────────────────────────────────────────────────────────

#[test]
fn missing_input_exits_not_found() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .args(["generate", "nope.atservice.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn malformed_manifest_is_user_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.atservice.toml"), "[[types]\nname = ").unwrap();

    atservice(temp.path())
        .args(["generate", "bad.atservice.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bad.atservice.toml"));
}

#[test]
fn invalid_marker_is_user_error() {
    let temp = workspace_with_manifest();
    atservice(temp.path())
        .args(["generate", "types.atservice.toml", "--marker", "not a name"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid marker annotation"));
}

#[test]
fn unwritable_output_reports_diagnostics_and_succeeds() {
    let temp = workspace_with_manifest();
    // A file where the output directory should be.
    fs::write(temp.path().join("blocked"), "").unwrap();

    atservice(temp.path())
        .args(["generate", "types.atservice.toml", "-o", "blocked"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "While writing services entry for: 'com.example.Foo', error: ",
        ))
        .stderr(predicate::str::contains(
            "While writing services entry for: 'com.example.Baz', error: ",
        ));
}

#[test]
fn strict_mode_fails_after_attempting_every_entry() {
    let temp = workspace_with_manifest();
    fs::write(temp.path().join("blocked"), "").unwrap();

    atservice(temp.path())
        .args(["generate", "types.atservice.toml", "-o", "blocked", "--strict"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("2 of 2 registry files could not be written"));
}

// ── list ──────────────────────────────────────────────────────────────────────

#[test]
fn list_json_shows_registry_without_writing() {
    let temp = workspace_with_manifest();

    let assert = atservice(temp.path())
        .args(["list", "types.atservice.toml", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let registry: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        registry["com.example.Foo"],
        serde_json::json!(["com.example.FooImpl", "com.example.BarImpl"])
    );
    assert_eq!(registry["com.example.Baz"], serde_json::json!(["com.example.BarImpl"]));
    assert!(!temp.path().join("META-INF").exists());
}

#[test]
fn list_plain_names() {
    let temp = workspace_with_manifest();
    atservice(temp.path())
        .args(["ls", "types.atservice.toml", "--format", "list"])
        .assert()
        .success()
        .stdout("com.example.Foo\ncom.example.Baz\n");
}

// ── config / init / completions ───────────────────────────────────────────────

#[test]
fn config_get_default_marker() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .args(["config", "get", "scan.marker_annotation"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "org.commonjava.atservice.annotation.Service",
        ));
}

#[test]
fn config_get_reads_environment_override() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .env("ATSERVICE__GENERATE__STRICT", "true")
        .args(["config", "get", "generate.strict"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn config_get_unknown_key_exits_configuration() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .args(["config", "get", "nope"])
        .assert()
        .code(4);
}

#[test]
fn explicit_missing_config_exits_configuration() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .args(["--config", "missing.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn init_local_creates_config_once() {
    let temp = TempDir::new().unwrap();

    atservice(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();
    let path = temp.path().join(".atservice.toml");
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("marker_annotation"));

    fs::write(&path, "# edited\n").unwrap();
    atservice(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# edited\n");
}

#[test]
fn completions_bash() {
    let temp = TempDir::new().unwrap();
    atservice(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("atservice"));
}
