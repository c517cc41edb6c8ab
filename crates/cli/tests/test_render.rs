//! Test the `yamcs-docs render` subcommand

mod common;

use predicates::prelude::predicate;

#[test]
fn test_render() {
    let (mut command, _project_dir) = common::yamcs_docs();
    command.args(["render", "docs/index.rst"]);
    command.assert().success().stdout(predicate::eq(
        "Yamcs Maven Plugin\n==================\n\nVersion 1.3.0\n",
    ));
}

/// Files outside the docs directory can be rendered too
#[test]
fn test_render_outside_docs() {
    let (mut command, project_dir) = common::yamcs_docs();
    project_dir.write(
        "README.rst",
        "{{ YAMCS_PLUGIN_VERSION }}/{{ YAMCS_VERSION }}",
    );
    command.args(["render", "README.rst"]);
    command
        .assert()
        .success()
        .stdout(predicate::eq("1.3.0/5.10.2"));
}

#[test]
fn test_render_missing_file() {
    let (mut command, _project_dir) = common::yamcs_docs();
    command.args(["render", "docs/missing.rst"]);
    command
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading \"docs/missing.rst\""));
}
