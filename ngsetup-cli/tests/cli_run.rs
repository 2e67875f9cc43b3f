//! Binary-level tests on temporary workspaces.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn ngsetup() -> Command {
    Command::cargo_bin("ngsetup").expect("ngsetup binary")
}

fn create_workspace() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let root = td.path();

    fs::write(
        root.join("package.json"),
        r#"{
  "name": "test-workspace",
  "version": "0.0.0",
  "dependencies": { "@angular/core": "^20.0.0" },
  "devDependencies": { "karma": "~6.4.0", "typescript": "~5.8.0" }
}"#,
    )
    .unwrap();

    fs::write(
        root.join("angular.json"),
        r#"{
  "projects": {
    "app": {
      "architect": {
        "test": {
          "builder": "@angular-devkit/build-angular:karma",
          "options": { "tsConfig": "tsconfig.spec.json" }
        }
      }
    }
  }
}"#,
    )
    .unwrap();

    fs::write(root.join("karma.conf.js"), "module.exports = function () {};\n").unwrap();

    td
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn help_names_both_subcommands() {
    ngsetup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add").and(predicate::str::contains("setup")));
}

#[test]
fn setup_writes_tooling_into_the_workspace() {
    let temp = create_workspace();

    ngsetup()
        .current_dir(temp.path())
        .args(["setup", "--project", "app"])
        .assert()
        .success();

    assert!(temp.path().join(".prettierrc.json").exists());
    assert!(temp.path().join(".prettierignore").exists());
    assert!(temp.path().join("lefthook.yml").exists());
    assert!(!temp.path().join("karma.conf.js").exists());

    let package = read_json(&temp.path().join("package.json"));
    let dev = package["devDependencies"].as_object().unwrap();
    assert!(dev.contains_key("prettier"));
    assert!(dev.contains_key("lefthook"));
    assert!(dev.contains_key("vitest"));
    assert!(!dev.contains_key("karma"));
    assert_eq!(dev.get("typescript"), Some(&json!("~5.8.0")));
    assert_eq!(package["scripts"]["prepare"], json!("lefthook install"));

    let angular = read_json(&temp.path().join("angular.json"));
    let target = &angular["projects"]["app"]["architect"]["test"];
    assert_eq!(target["builder"], json!("@angular/build:unit-test"));
    assert_eq!(target["options"]["runner"], json!("vitest"));
    assert_eq!(target["options"]["tsConfig"], json!("tsconfig.spec.json"));
}

#[test]
fn project_defaults_to_the_sole_project() {
    let temp = create_workspace();

    ngsetup()
        .current_dir(temp.path())
        .arg("setup")
        .assert()
        .success();

    assert!(temp.path().join(".prettierrc.json").exists());
}

#[test]
fn dry_run_prints_a_diff_and_writes_nothing() {
    let temp = create_workspace();
    let package_before = fs::read_to_string(temp.path().join("package.json")).unwrap();

    ngsetup()
        .current_dir(temp.path())
        .args(["add", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("diff --git a/package.json b/package.json"));

    assert_eq!(
        fs::read_to_string(temp.path().join("package.json")).unwrap(),
        package_before
    );
    assert!(!temp.path().join(".prettierrc.json").exists());
    assert!(temp.path().join("karma.conf.js").exists());
}

#[test]
fn rerunning_setup_is_idempotent_on_disk() {
    let temp = create_workspace();

    ngsetup().current_dir(temp.path()).arg("setup").assert().success();
    let package_after_first = fs::read_to_string(temp.path().join("package.json")).unwrap();

    ngsetup().current_dir(temp.path()).arg("setup").assert().success();
    assert_eq!(
        fs::read_to_string(temp.path().join("package.json")).unwrap(),
        package_after_first
    );
}

#[test]
fn missing_manifest_exits_with_code_2() {
    let temp = tempfile::tempdir().unwrap();

    ngsetup()
        .current_dir(temp.path())
        .arg("add")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn unknown_project_exits_with_code_2() {
    let temp = create_workspace();

    ngsetup()
        .current_dir(temp.path())
        .args(["add", "--project", "missing"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn config_file_pins_versions_and_disables_tools() {
    let temp = create_workspace();
    fs::write(
        temp.path().join("ngsetup.toml"),
        r#"
[tools]
lefthook = false

[versions]
prettier = "3.5.0"
"#,
    )
    .unwrap();

    ngsetup().current_dir(temp.path()).arg("setup").assert().success();

    assert!(!temp.path().join("lefthook.yml").exists());
    let package = read_json(&temp.path().join("package.json"));
    assert_eq!(package["devDependencies"]["prettier"], json!("3.5.0"));
}

#[test]
fn tool_flags_override_the_config_file() {
    let temp = create_workspace();

    ngsetup()
        .current_dir(temp.path())
        .args(["setup", "--no-prettier", "--no-vitest"])
        .assert()
        .success();

    assert!(!temp.path().join(".prettierrc.json").exists());
    assert!(temp.path().join("karma.conf.js").exists());
    assert!(temp.path().join("lefthook.yml").exists());
}
