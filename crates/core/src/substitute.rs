use crate::{Application, SourceReadHook};
use tracing::trace;
use yamcs_docs_config::ManifestVersions;

/// Replaced with the version of the plugin being documented
pub const PLUGIN_VERSION_TOKEN: &str = "{{ YAMCS_PLUGIN_VERSION }}";
/// Replaced with the version of Yamcs the plugin is built against
pub const YAMCS_VERSION_TOKEN: &str = "{{ YAMCS_VERSION }}";

/// Replaces version placeholders in raw document text. The replacement is
/// purely textual, so it applies everywhere in the document, including inside
/// code blocks where the markup language's own substitutions don't reach.
#[derive(Clone, Debug)]
pub struct PlaceholderSubstituter {
    plugin_version: String,
    yamcs_version: String,
}

impl PlaceholderSubstituter {
    pub fn new(versions: &ManifestVersions) -> Self {
        Self {
            plugin_version: versions.plugin_version.clone(),
            yamcs_version: versions.yamcs_version.clone(),
        }
    }

    /// Replace every occurrence of each token. The tokens don't overlap, so
    /// the order of replacement doesn't matter.
    pub fn substitute(&self, source: &str) -> String {
        source
            .replace(PLUGIN_VERSION_TOKEN, &self.plugin_version)
            .replace(YAMCS_VERSION_TOKEN, &self.yamcs_version)
    }
}

impl SourceReadHook for PlaceholderSubstituter {
    fn source_read(
        &self,
        _app: &Application,
        docname: &str,
        source: &mut String,
    ) {
        let substituted = self.substitute(source);
        if substituted != *source {
            trace!(docname, "Substituted version placeholders");
        }
        *source = substituted;
    }
}
