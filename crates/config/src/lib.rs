//! Configuration for the documentation build. Most settings are static values
//! describing the project, with defaults matching what the project ships.
//! They can be overridden by a `docs.yml` file next to the documentation
//! sources. The version fields are never configured directly; they are always
//! read from the Maven build manifest, so the docs can't drift from the
//! release they describe.
//!
//! Configuration is loaded once at startup and is immutable afterward.

mod latex;
mod pattern;

pub use latex::{LatexDocument, LatexElements};
pub use pattern::ExcludePattern;
pub use yamcs_docs_manifest::ManifestVersions;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::info;
use yamcs_docs_manifest::DEFAULT_MANIFEST_PATH;
use yamcs_docs_util::{
    ResultTracedAnyhow,
    paths::{expand_home, resolve_relative},
};

const PATH_ENV_VAR: &str = "YAMCS_DOCS_CONFIG";
const FILE: &str = "docs.yml";

/// Static project settings. Everything here can be set in the settings file.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub project: String,
    pub copyright: String,
    pub author: String,
    /// Names of host extensions to enable. These are passed through to the
    /// host untouched.
    pub extensions: Vec<String>,
    /// Suffix of documentation source files, including the leading dot
    pub source_suffix: String,
    /// Language of the content. `None` lets the host pick its default
    pub language: Option<String>,
    /// Files and directories to skip when looking for sources, relative to
    /// the documentation directory
    pub exclude_patterns: Vec<ExcludePattern>,
    /// Syntax highlighting style for code blocks
    pub pygments_style: String,
    pub latex_elements: LatexElements,
    pub latex_documents: Vec<LatexDocument>,
    /// Path to the Maven build manifest. Relative paths are relative to the
    /// documentation directory.
    pub manifest: PathBuf,
}

impl Settings {
    /// Path to the settings file, in this precedence:
    /// - Value of `$YAMCS_DOCS_CONFIG`
    /// - `docs.yml` in the documentation directory
    pub fn path(docs_dir: &Path) -> PathBuf {
        if let Ok(path) = env::var(PATH_ENV_VAR) {
            return expand_home(PathBuf::from(path)).into_owned();
        }
        docs_dir.join(FILE)
    }

    /// Load settings from the file, if present. If not, just return the
    /// defaults. If the path was given explicitly via `$YAMCS_DOCS_CONFIG`,
    /// the file must exist.
    pub fn load(docs_dir: &Path) -> anyhow::Result<Self> {
        let path = Self::path(docs_dir);
        if env::var_os(PATH_ENV_VAR).is_none() && !path.exists() {
            info!(?path, "No settings file found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading settings file");
        (|| {
            let content = fs::read_to_string(&path)?;
            // An empty file is an empty mapping, not an error
            if content.trim().is_empty() {
                return Ok(Self::default());
            }
            let settings = serde_yaml::from_str(&content)?;
            Ok::<_, anyhow::Error>(settings)
        })()
        .context(format!("Error loading settings from {path:?}"))
        .traced()
    }

    /// Is the given source path excluded by any of the exclusion patterns?
    /// The path should be relative to the documentation directory.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.excludes(relative))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project: "yamcs-maven-plugin".into(),
            copyright: "2019, Space Applications Services".into(),
            author: "Yamcs Team".into(),
            extensions: vec!["sphinxcontrib.fulltoc".into()],
            source_suffix: ".rst".into(),
            language: None,
            exclude_patterns: ["_build", "Thumbs.db", ".DS_Store"]
                .into_iter()
                .map(|pattern| {
                    pattern.parse().expect("Default patterns are valid")
                })
                .collect(),
            pygments_style: "sphinx".into(),
            latex_elements: LatexElements::default(),
            latex_documents: vec![LatexDocument::manual()],
            manifest: DEFAULT_MANIFEST_PATH.into(),
        }
    }
}

/// Fully loaded documentation configuration: static settings plus the
/// versions read from the build manifest. This is the only thing the host and
/// its hooks see.
#[derive(Debug, Serialize)]
pub struct DocsConfig {
    /// Directory containing the documentation sources
    #[serde(skip)]
    pub docs_dir: PathBuf,
    /// Resolved location of the build manifest
    #[serde(skip)]
    pub manifest_path: PathBuf,
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(flatten)]
    pub versions: ManifestVersions,
}

impl DocsConfig {
    /// Load settings for the given documentation directory, then read the
    /// build manifest. Any failure here is fatal to the build: documentation
    /// must never be generated with an unknown version.
    pub fn load(docs_dir: &Path) -> anyhow::Result<Self> {
        let settings = Settings::load(docs_dir)?;
        let manifest_path = resolve_relative(docs_dir, &settings.manifest);
        let versions = ManifestVersions::load(&manifest_path)
            .context("Error loading version information")
            .traced()?;
        info!(
            version = %versions.plugin_version,
            yamcs_version = %versions.yamcs_version,
            "Loaded documentation configuration"
        );
        Ok(Self {
            docs_dir: docs_dir.to_owned(),
            manifest_path,
            settings,
            versions,
        })
    }

    /// The short version of the project
    pub fn version(&self) -> &str {
        &self.versions.plugin_version
    }

    /// The full version of the project, including pre-release tags
    pub fn release(&self) -> &str {
        &self.versions.release
    }
}

#[cfg(any(test, feature = "test"))]
impl yamcs_docs_util::Factory for DocsConfig {
    fn factory(_: ()) -> Self {
        Self {
            docs_dir: PathBuf::from("."),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            settings: Settings::default(),
            versions: yamcs_docs_util::Factory::factory(()),
        }
    }
}
