use indexmap::IndexMap;
use itertools::Itertools;
use std::{
    error::Error,
    fmt::{self, Debug, Display},
    str::FromStr,
};
use tracing::debug;
use yamcs_docs_config::DocsConfig;
use yamcs_docs_util::Mapping;

/// A named point in the host's pipeline where hooks can be attached
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ExtensionPoint {
    /// A source document's raw text has been read, but not yet parsed
    SourceRead,
}

const EXTENSION_POINTS: Mapping<'static, ExtensionPoint> =
    Mapping::new(&[(ExtensionPoint::SourceRead, &["source-read"])]);

impl Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Every variant has a label
        let label = EXTENSION_POINTS.get_label(*self).unwrap_or("unknown");
        write!(f, "{label}")
    }
}

impl FromStr for ExtensionPoint {
    type Err = UnknownExtensionPoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EXTENSION_POINTS
            .get(s)
            .ok_or_else(|| UnknownExtensionPoint(s.to_owned()))
    }
}

/// Error parsing an [ExtensionPoint] from its name
#[derive(Debug)]
pub struct UnknownExtensionPoint(String);

impl Display for UnknownExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown extension point `{}`; expected one of: {}",
            self.0,
            EXTENSION_POINTS
                .all_strings()
                .format_with(", ", |name, f| f(&format_args!("`{name}`")))
        )
    }
}

impl Error for UnknownExtensionPoint {}

/// A hook for the [SourceRead](ExtensionPoint::SourceRead) extension point.
/// Called once per source document with the document's name and its full raw
/// text. Mutations to the text are kept, and are what the host goes on to
/// parse.
///
/// Implemented for any matching closure, so simple hooks don't need a type.
pub trait SourceReadHook: Send + Sync {
    fn source_read(
        &self,
        app: &Application,
        docname: &str,
        source: &mut String,
    );
}

impl<F> SourceReadHook for F
where
    F: Fn(&Application, &str, &mut String) + Send + Sync,
{
    fn source_read(
        &self,
        app: &Application,
        docname: &str,
        source: &mut String,
    ) {
        self(app, docname, source);
    }
}

/// Handle passed between the host and its hooks. Owns the loaded
/// configuration, which is read-only from here on, and the registry of hooks
/// for each extension point.
pub struct Application {
    config: DocsConfig,
    hooks: IndexMap<ExtensionPoint, Vec<Box<dyn SourceReadHook>>>,
}

impl Application {
    pub fn new(config: DocsConfig) -> Self {
        Self {
            config,
            hooks: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Attach a hook to an extension point. Hooks for the same point are
    /// called in the order they were connected. Return the number of hooks
    /// now attached to that point.
    pub fn connect(
        &mut self,
        point: ExtensionPoint,
        hook: impl 'static + SourceReadHook,
    ) -> usize {
        let hooks = self.hooks.entry(point).or_default();
        hooks.push(Box::new(hook));
        debug!(%point, count = hooks.len(), "Connected hook");
        hooks.len()
    }

    /// Number of hooks attached to an extension point
    pub fn handler_count(&self, point: ExtensionPoint) -> usize {
        self.hooks.get(&point).map(Vec::len).unwrap_or_default()
    }

    /// Run every [SourceRead](ExtensionPoint::SourceRead) hook against a
    /// document. Each hook sees the text as left by the previous one.
    pub fn emit_source_read(&self, docname: &str, source: &mut String) {
        debug!(docname, "Emitting source-read");
        let hooks = self.hooks.get(&ExtensionPoint::SourceRead);
        for hook in hooks.into_iter().flatten() {
            hook.source_read(self, docname, source);
        }
    }
}

impl Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("config", &self.config)
            .field(
                "hooks",
                &self
                    .hooks
                    .iter()
                    .map(|(point, hooks)| (point.to_string(), hooks.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use yamcs_docs_util::{Factory, assert_err};

    #[test]
    fn test_extension_point_name() {
        assert_eq!(ExtensionPoint::SourceRead.to_string(), "source-read");
        assert_eq!(
            "source-read".parse::<ExtensionPoint>().unwrap(),
            ExtensionPoint::SourceRead
        );
    }

    #[rstest]
    #[case::unknown("doctree-read")]
    #[case::underscore("source_read")]
    #[case::empty("")]
    fn test_extension_point_unknown(#[case] name: &str) {
        assert_err!(
            name.parse::<ExtensionPoint>(),
            "expected one of: `source-read`"
        );
    }

    /// Hooks run in registration order, each seeing the previous output
    #[test]
    fn test_emit_order() {
        let mut app = Application::new(DocsConfig::factory(()));
        app.connect(
            ExtensionPoint::SourceRead,
            |_: &Application, _: &str, source: &mut String| {
                source.push_str(" first");
            },
        );
        let count = app.connect(
            ExtensionPoint::SourceRead,
            |_: &Application, _: &str, source: &mut String| {
                source.push_str(" second");
            },
        );
        assert_eq!(count, 2);

        let mut source = "start".to_owned();
        app.emit_source_read("index", &mut source);
        assert_eq!(source, "start first second");
    }

    /// Hooks get the document name and the application handle
    #[test]
    fn test_emit_arguments() {
        let mut app = Application::new(DocsConfig::factory(()));
        app.connect(
            ExtensionPoint::SourceRead,
            |app: &Application, docname: &str, source: &mut String| {
                *source = format!("{docname}@{}", app.config().version());
            },
        );
        let mut source = String::new();
        app.emit_source_read("goals/bundle", &mut source);
        assert_eq!(source, "goals/bundle@1.2.3");
    }

    /// With no hooks connected, emitting is a no-op
    #[test]
    fn test_emit_no_hooks() {
        let app = Application::new(DocsConfig::factory(()));
        let mut source = "{{ YAMCS_VERSION }}".to_owned();
        app.emit_source_read("index", &mut source);
        assert_eq!(source, "{{ YAMCS_VERSION }}");
    }

    /// Each emit calls each hook exactly once
    #[test]
    fn test_emit_once_per_document() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = Application::new(DocsConfig::factory(()));
        let hook_calls = Arc::clone(&calls);
        app.connect(
            ExtensionPoint::SourceRead,
            move |_: &Application, _: &str, _: &mut String| {
                hook_calls.fetch_add(1, Ordering::Relaxed);
            },
        );
        for docname in ["index", "goals/bundle", "goals/run"] {
            app.emit_source_read(docname, &mut String::new());
        }
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }
}
