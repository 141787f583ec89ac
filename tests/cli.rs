// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

use msaconf::ResolvedConfig;

const VERSIONS: &str = r#"
defaults:
  review:
    default: "1.0"
    services:
      auth: "1.0"
  processing:
    services: {}
msas:
  alpha: {}
  beta:
    review:
      services:
        auth: "1.1"
  gamma:
    review:
      default: "2.0"
      services:
        unknownsvc: "9.9"
"#;

fn msaconf(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("msaconf").expect("Failed to locate msaconf binary");
    cmd.current_dir(dir)
        .env_remove("MSACONF_STORAGE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("versions.yaml"), VERSIONS).unwrap();
    temp
}

fn read_config(path: &Path) -> ResolvedConfig {
    serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_generate_writes_every_msa() {
    let temp = setup();

    msaconf(temp.path())
        .args(["generate", "versions.yaml", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    let out = temp.path().join("out");
    let defaults = read_config(&out.join("default_values.yaml"));
    assert_eq!(defaults.tag("auth"), Some("1.0"));
    assert_eq!(defaults.version("review"), Some("1.0"));
    assert_eq!(defaults.version("processing"), Some("default_version"));

    assert_eq!(read_config(&out.join("alpha.yaml")), defaults);

    let beta = read_config(&out.join("beta.yaml"));
    assert_eq!(beta.tag("auth"), Some("1.1"));
    assert_eq!(beta.version("review"), Some("1.0"));

    let gamma = read_config(&out.join("gamma.yaml"));
    assert_eq!(gamma.version("review"), Some("2.0"));
    assert_eq!(gamma.tag("auth"), Some("1.0"));
    assert!(!gamma.services.contains_key("unknownsvc"));
}

#[cfg(unix)]
#[test]
fn test_generate_links_unchanged_msa_unless_copy() {
    let temp = setup();

    msaconf(temp.path())
        .args(["generate", "versions.yaml", "linked"])
        .assert()
        .success();
    let alpha = temp.path().join("linked").join("alpha.yaml");
    assert!(std::fs::symlink_metadata(&alpha).unwrap().file_type().is_symlink());

    msaconf(temp.path())
        .args(["generate", "versions.yaml", "copied", "--storage", "copy"])
        .assert()
        .success();
    let alpha = temp.path().join("copied").join("alpha.yaml");
    assert!(!std::fs::symlink_metadata(&alpha).unwrap().file_type().is_symlink());
}

#[test]
fn test_generate_multiple_pairs() {
    let temp = setup();
    std::fs::write(
        temp.path().join("other.json"),
        r#"{"defaults": {"edge": {"default": "3.0", "services": {"proxy": "3.0"}}}, "msas": {"delta": {}}}"#,
    )
    .unwrap();

    msaconf(temp.path())
        .args(["generate", "versions.yaml", "out-a", "other.json", "out-b"])
        .assert()
        .success();

    assert!(temp.path().join("out-a").join("beta.yaml").exists());
    let delta = read_config(&temp.path().join("out-b").join("delta.yaml"));
    assert_eq!(delta.tag("proxy"), Some("3.0"));
}

#[test]
fn test_generate_applies_versions_mapping_to_known_keys() {
    let temp = setup();
    std::fs::write(
        temp.path().join("mapped.yaml"),
        r#"
defaults:
  review: { default: "1.0" }
  processing: { services: {} }
msas:
  delta:
    review:
      versions:
        default_processing: "3.2"
    prcessing:
      default: "9"
"#,
    )
    .unwrap();

    msaconf(temp.path())
        .args(["generate", "mapped.yaml", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 override(s) ignored"));

    let delta = read_config(&temp.path().join("out").join("delta.yaml"));
    assert_eq!(delta.version("processing"), Some("3.2"));
    assert_eq!(delta.version("review"), Some("1.0"));
    assert!(!delta.versions.contains_key("default_prcessing"));
}

#[test]
fn test_generate_odd_arguments_fail() {
    let temp = setup();

    msaconf(temp.path())
        .args(["generate", "versions.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no output directory"));
}

#[test]
fn test_generate_missing_input_fails() {
    let temp = setup();

    msaconf(temp.path())
        .args(["generate", "missing.yaml", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_generate_schema_error_names_path() {
    let temp = setup();
    std::fs::write(
        temp.path().join("broken.yaml"),
        "defaults:\n  review: \"1.0\"\n",
    )
    .unwrap();

    msaconf(temp.path())
        .args(["generate", "broken.yaml", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("defaults.review"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = setup();

    msaconf(temp.path())
        .args(["generate", "versions.yaml", "out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_override_scope_from_settings_file() {
    let temp = setup();
    std::fs::write(
        temp.path().join(".msaconf.yaml"),
        "override_components: [processing]\nstorage: copy\n",
    )
    .unwrap();

    msaconf(temp.path())
        .args(["generate", "versions.yaml", "out"])
        .assert()
        .success();

    // review is outside the scope, so beta keeps the default auth tag
    let beta = read_config(&temp.path().join("out").join("beta.yaml"));
    assert_eq!(beta.tag("auth"), Some("1.0"));
}

#[test]
fn test_show_defaults_and_msa() {
    let temp = setup();

    let output = msaconf(temp.path())
        .args(["show", "versions.yaml"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let defaults: ResolvedConfig = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(defaults.tag("auth"), Some("1.0"));

    let output = msaconf(temp.path())
        .args(["show", "versions.yaml", "--msa", "gamma", "--trace"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let gamma: ResolvedConfig = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(gamma.version("review"), Some("2.0"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknownsvc"));
}

#[test]
fn test_show_json() {
    let temp = setup();

    let output = msaconf(temp.path())
        .args(["show", "versions.yaml", "--msa", "beta", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["services"]["auth"]["tag"], "1.1");
}

#[test]
fn test_show_unknown_msa_fails() {
    let temp = setup();

    msaconf(temp.path())
        .args(["show", "versions.yaml", "--msa", "omega"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("omega"));
}

#[test]
fn test_validate_reports_warnings() {
    let temp = setup();

    msaconf(temp.path())
        .args(["validate", "versions.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unknownsvc"))
        .stdout(predicate::str::contains("All documents are valid"));
}

#[test]
fn test_validate_fails_on_bad_document() {
    let temp = setup();
    std::fs::write(temp.path().join("broken.yaml"), "defaults: [review]\n").unwrap();

    msaconf(temp.path())
        .args(["validate", "versions.yaml", "broken.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed validation"));
}
