#![allow(unused)]

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use std::{fs, path::Path};
use yamcs_docs_util::{TempDir, pom_xml, temp_dir};

pub const PLUGIN_VERSION: &str = "1.3.0";
pub const YAMCS_VERSION: &str = "5.10.2";

/// Get a command to run the CLI, in a fresh project directory. The directory
/// has a build manifest at the root and documentation sources under `docs/`,
/// which is passed as the docs directory. Most tests only need the command,
/// but the directory is returned so files can be added or checked. It must be
/// kept alive until the command has run.
pub fn yamcs_docs() -> (Command, TempDir) {
    let project_dir = project_dir();
    let command = yamcs_docs_in(&project_dir);
    (command, project_dir)
}

/// Get a command to run the CLI in an existing project directory
pub fn yamcs_docs_in(project_dir: &Path) -> Command {
    let mut command = cargo_bin_cmd!("yamcs_docs_cli");
    command
        .current_dir(project_dir)
        .env_remove("YAMCS_DOCS_CONFIG")
        .args(["--docs-dir", "docs"]);
    command
}

/// Create a project directory with a manifest and a small set of sources
pub fn project_dir() -> TempDir {
    let dir = temp_dir();
    dir.write("pom.xml", &pom_xml(Some(PLUGIN_VERSION), Some(YAMCS_VERSION)));
    dir.write(
        "docs/index.rst",
        "Yamcs Maven Plugin\n==================\n\n\
        Version {{ YAMCS_PLUGIN_VERSION }}\n",
    );
    dir.write(
        "docs/goals/bundle.rst",
        ".. code-block:: xml\n\n    \
        <yamcsVersion>{{ YAMCS_VERSION }}</yamcsVersion>\n",
    );
    dir.write("docs/goals/notes.txt", "{{ YAMCS_VERSION }}\n");
    dir.write("docs/_build/stale.rst", "{{ YAMCS_VERSION }}\n");
    dir
}

/// Read a file from a directory, panicking if it doesn't exist
pub fn read(dir: &Path, path: &str) -> String {
    fs::read_to_string(dir.join(path)).unwrap()
}
