//! Test the `yamcs-docs show` subcommand and its sub-subcommands: paths,
//! config

mod common;

use predicates::{prelude::predicate, str::PredicateStrExt};
use yamcs_docs_config::DocsConfig;

/// Test `yamcs-docs show paths` prints the settings and manifest paths
#[test]
fn test_show_paths() {
    let (mut command, _project_dir) = common::yamcs_docs();
    command.args(["show", "paths"]);
    command
        .assert()
        .success()
        .stdout("Settings: docs/docs.yml\nManifest: pom.xml\n");
}

/// Test `yamcs-docs show config` prints the loaded config in YAML
#[test]
fn test_show_config() {
    let (mut command, project_dir) = common::yamcs_docs();
    command.args(["show", "config"]);
    let config = DocsConfig::load(&project_dir.join("docs")).unwrap();
    let expected = serde_yaml::to_string(&config).unwrap();
    command
        .assert()
        .success()
        .stdout(predicate::eq(expected.trim()).trim())
        .stdout(predicate::str::contains("plugin_version: 1.3.0"))
        .stdout(predicate::str::contains("yamcs_version: 5.10.2"));
}

#[test]
fn test_show_config_missing_manifest() {
    let (mut command, project_dir) = common::yamcs_docs();
    std::fs::remove_file(project_dir.join("pom.xml")).unwrap();
    command.args(["show", "config"]);
    command
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading version information"));
}
