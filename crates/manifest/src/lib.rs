//! Read version information out of the Maven build manifest (`pom.xml`).
//!
//! Only two values are extracted: the project's own `version`, and the
//! `yamcsVersion` property that pins the Yamcs release the plugin is built
//! against. Everything else in the POM is ignored. All element lookups are
//! qualified with the POM namespace, and only direct children are considered,
//! so `project/parent/version` can never be mistaken for the project version.

use roxmltree::{Document, ExpandedName, Node};
use serde::Serialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

/// XML namespace of every element in a Maven 4.0.0 POM
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// Location of the manifest relative to the documentation directory
pub const DEFAULT_MANIFEST_PATH: &str = "../pom.xml";

/// Versions extracted from the build manifest. Immutable once loaded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ManifestVersions {
    /// Version of the plugin itself, from `project/version`
    pub plugin_version: String,
    /// Full release string. Always identical to
    /// [plugin_version](Self::plugin_version); the POM carries no separate
    /// release metadata.
    pub release: String,
    /// Version of Yamcs the plugin targets, from
    /// `project/properties/yamcsVersion`
    pub yamcs_version: String,
}

impl ManifestVersions {
    /// Read and parse the manifest at the given path
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        info!(?path, "Loading build manifest");
        let xml =
            fs::read_to_string(path).map_err(|error| ManifestError::Io {
                path: path.to_owned(),
                error,
            })?;
        Self::parse(&xml)
    }

    /// Parse manifest XML and extract the version fields
    pub fn parse(xml: &str) -> Result<Self, ManifestError> {
        let document = Document::parse(xml)?;
        let project = document.root_element();
        if !project.has_tag_name((POM_NAMESPACE, "project")) {
            return Err(ManifestError::UnexpectedRoot {
                found: display_name(project.tag_name()),
            });
        }

        let plugin_version = required_text(project, &["version"])?;
        let yamcs_version =
            required_text(project, &["properties", "yamcsVersion"])?;
        debug!(%plugin_version, %yamcs_version, "Found manifest versions");

        Ok(Self {
            release: plugin_version.clone(),
            plugin_version,
            yamcs_version,
        })
    }
}

#[cfg(any(test, feature = "test"))]
impl yamcs_docs_util::Factory for ManifestVersions {
    fn factory(_: ()) -> Self {
        Self {
            plugin_version: "1.2.3".into(),
            release: "1.2.3".into(),
            yamcs_version: "5.10.0".into(),
        }
    }
}

/// Walk a chain of direct children down from the `project` element and return
/// the trimmed text of the last one. Any missing link in the chain, or an
/// empty final element, is an error. Errors name the path up to the link that
/// failed, so a missing `properties` is reported as `project/properties`.
fn required_text(
    project: Node<'_, '_>,
    path: &[&'static str],
) -> Result<String, ManifestError> {
    let element_path = |names: &[&str]| {
        let mut element_path = "project".to_owned();
        for name in names {
            element_path.push('/');
            element_path.push_str(name);
        }
        element_path
    };

    let mut node = project;
    for (i, name) in path.iter().enumerate() {
        node = node
            .children()
            .find(|child| child.has_tag_name((POM_NAMESPACE, *name)))
            .ok_or_else(|| ManifestError::MissingElement {
                path: element_path(&path[..=i]),
            })?;
    }

    match node.text().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err(ManifestError::EmptyElement {
            path: element_path(path),
        }),
    }
}

/// Format a tag name as `{namespace}name`, or just `name` if it has no
/// namespace
fn display_name(name: ExpandedName<'_, '_>) -> String {
    match name.namespace() {
        Some(namespace) => format!("{{{namespace}}}{}", name.name()),
        None => name.name().to_owned(),
    }
}

/// An error loading the build manifest. Every variant is fatal: documentation
/// must never be built against an unknown version.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file couldn't be read (usually because it doesn't exist)
    #[error("Error reading manifest `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    /// Manifest is not well-formed XML
    #[error("Manifest is not well-formed XML")]
    Xml(#[from] roxmltree::Error),

    /// Root element is something other than a POM `project`
    #[error(
        "Expected root element `project` in the POM namespace, found `{found}`"
    )]
    UnexpectedRoot { found: String },

    /// A required element is absent
    #[error("Manifest is missing required element `{path}`")]
    MissingElement { path: String },

    /// A required element is present but has no text
    #[error("Manifest element `{path}` is empty")]
    EmptyElement { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use yamcs_docs_util::{
        Factory, TempDir, assert_err, assert_matches, pom_xml, temp_dir,
    };

    #[test]
    fn test_parse() {
        let versions =
            ManifestVersions::parse(&pom_xml(Some("1.2.3"), Some("5.10.0")))
                .unwrap();
        assert_eq!(versions, ManifestVersions::factory(()));
    }

    /// Only direct children of `project` count. A parent POM's version, or a
    /// dependency version, comes before the project version in document order
    /// but must be skipped.
    #[test]
    fn test_parse_ignores_nested_versions() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <parent>
    <groupId>org.yamcs</groupId>
    <artifactId>yamcs-parent</artifactId>
    <version>9.9.9</version>
  </parent>
  <dependencies>
    <dependency>
      <artifactId>yamcs-core</artifactId>
      <version>8.8.8</version>
    </dependency>
  </dependencies>
  <version>1.3.0-SNAPSHOT</version>
  <properties>
    <yamcsVersion>
      5.10.0
    </yamcsVersion>
  </properties>
</project>"#;
        let versions = ManifestVersions::parse(xml).unwrap();
        assert_eq!(versions.plugin_version, "1.3.0-SNAPSHOT");
        assert_eq!(versions.release, "1.3.0-SNAPSHOT");
        // Surrounding whitespace is trimmed
        assert_eq!(versions.yamcs_version, "5.10.0");
    }

    #[rstest]
    #[case::missing_version(
        pom_xml(None, Some("5.10.0")),
        "missing required element `project/version`"
    )]
    #[case::missing_properties(
        pom_xml(Some("1.2.3"), None),
        "missing required element `project/properties`"
    )]
    #[case::missing_yamcs_version(
        r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <version>1.2.3</version>
            <properties><other>1</other></properties>
        </project>"#.to_owned(),
        "missing required element `project/properties/yamcsVersion`"
    )]
    #[case::empty_version(
        pom_xml(Some(""), Some("5.10.0")),
        "element `project/version` is empty"
    )]
    #[case::blank_yamcs_version(
        pom_xml(Some("1.2.3"), Some("   ")),
        "element `project/properties/yamcsVersion` is empty"
    )]
    // Elements outside the POM namespace are not matched
    #[case::no_namespace(
        "<project><version>1.2.3</version></project>".to_owned(),
        "found `project`"
    )]
    #[case::wrong_namespace(
        r#"<project xmlns="http://maven.apache.org/POM/3.0.0">
            <version>1.2.3</version>
        </project>"#.to_owned(),
        "found `{http://maven.apache.org/POM/3.0.0}project`"
    )]
    #[case::wrong_root(
        r#"<settings xmlns="http://maven.apache.org/POM/4.0.0"/>"#.to_owned(),
        "Expected root element `project`"
    )]
    #[case::malformed("<project><version>".to_owned(), "not well-formed XML")]
    fn test_parse_error(#[case] xml: String, #[case] expected_error: &str) {
        assert_err!(ManifestVersions::parse(&xml), expected_error);
    }

    /// A missing intermediate element is reported at the point the chain
    /// broke, not at the element that was ultimately wanted
    #[test]
    fn test_missing_element_path() {
        let result = ManifestVersions::parse(&pom_xml(Some("1.2.3"), None));
        assert_matches!(
            &result,
            Err(ManifestError::MissingElement { path })
                if path == "project/properties"
        );
    }

    #[rstest]
    fn test_load(temp_dir: TempDir) {
        let path =
            temp_dir.write("pom.xml", &pom_xml(Some("1.2.3"), Some("5.10.0")));
        let versions = ManifestVersions::load(&path).unwrap();
        assert_eq!(versions.plugin_version, "1.2.3");
        assert_eq!(versions.yamcs_version, "5.10.0");
    }

    #[rstest]
    fn test_load_missing_file(temp_dir: TempDir) {
        let path = temp_dir.join("pom.xml");
        let result = ManifestVersions::load(&path);
        assert_matches!(
            &result,
            Err(ManifestError::Io { error, .. })
                if error.kind() == io::ErrorKind::NotFound
        );
        assert_err!(result, "Error reading manifest");
    }
}
