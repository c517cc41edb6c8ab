//! Core of the documentation build: the [Application] handle that hosts
//! drive, and the hooks this project attaches to it.
//!
//! A host (the mdBook preprocessor, or the standalone `build` command) loads
//! configuration, creates an [Application], and calls [setup] once. From then
//! on it calls [Application::emit_source_read] for each source document after
//! reading its raw text and before doing anything else with it.
//!
//! **This crate is not semver compliant**. The version is locked to the root
//! `yamcs_docs` crate version. If you choose to depend directly on this crate,
//! you do so at your own risk of breakage.

mod app;
mod substitute;

pub use app::{
    Application, ExtensionPoint, SourceReadHook, UnknownExtensionPoint,
};
pub use substitute::{
    PLUGIN_VERSION_TOKEN, PlaceholderSubstituter, YAMCS_VERSION_TOKEN,
};

use std::path::Path;
use tracing::info;
use yamcs_docs_config::DocsConfig;

/// Attach this project's hooks to the application. Called once by the host,
/// after configuration has loaded successfully.
pub fn setup(app: &mut Application) {
    let substituter = PlaceholderSubstituter::new(&app.config().versions);
    app.connect(ExtensionPoint::SourceRead, substituter);
}

/// Load configuration for a documentation directory and return a ready-to-use
/// application with all hooks attached. If configuration can't be loaded
/// (e.g. the build manifest is missing), no hooks are ever registered.
pub fn configure(docs_dir: &Path) -> anyhow::Result<Application> {
    let config = DocsConfig::load(docs_dir)?;
    let mut app = Application::new(config);
    setup(&mut app);
    info!(?docs_dir, "Documentation build configured");
    Ok(app)
}
