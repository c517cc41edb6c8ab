use crate::{GlobalArgs, Subcommand, util::docname};
use anyhow::{Context, bail};
use clap::{Parser, ValueHint};
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{debug, info, trace};
use yamcs_docs_config::DocsConfig;
use yamcs_docs_core::Application;
use yamcs_docs_util::paths::{create_parent, resolve_relative};

/// Default output location, relative to the docs directory. This sits under
/// `_build`, which is excluded from sources by default.
const DEFAULT_OUT_DIR: &str = "_build/source";

/// Run every source document through the build hooks and write the processed
/// sources to an output directory
///
/// Sources are all files under the docs directory ending in the configured
/// source suffix, minus anything matched by the exclusion patterns. The
/// directory structure is preserved in the output.
#[derive(Clone, Debug, Parser)]
pub struct BuildCommand {
    /// Directory to write processed sources to. Defaults to `_build/source`
    /// within the docs directory
    #[clap(long, short, value_hint = ValueHint::DirPath)]
    out: Option<PathBuf>,
}

impl Subcommand for BuildCommand {
    fn execute(self, global: GlobalArgs) -> anyhow::Result<ExitCode> {
        let app = yamcs_docs_core::configure(&global.docs_dir)?;
        let out_dir = self
            .out
            .unwrap_or_else(|| global.docs_dir.join(DEFAULT_OUT_DIR));

        let out_relative = output_within_docs(&global.docs_dir, &out_dir)?;
        let sources = find_sources(app.config(), out_relative.as_deref())
            .with_context(|| {
                format!("Error scanning sources in {:?}", global.docs_dir)
            })?;
        info!(count = sources.len(), "Found documentation sources");

        for relative in &sources {
            build_document(&app, relative, &out_dir)?;
        }

        println!(
            "Processed {count} document(s) into {out_dir}",
            count = sources.len(),
            out_dir = out_dir.display()
        );
        Ok(ExitCode::SUCCESS)
    }
}

/// Read one source document, run it through the hooks, and write the result
fn build_document(
    app: &Application,
    relative: &Path,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let config = app.config();
    let input = config.docs_dir.join(relative);
    let output = out_dir.join(relative);
    let docname = docname(relative, &config.settings.source_suffix);
    debug!(%docname, ?input, ?output, "Building document");

    let mut source = fs::read_to_string(&input)
        .with_context(|| format!("Error reading {input:?}"))?;
    app.emit_source_read(&docname, &mut source);
    create_parent(&output)
        .and_then(|()| fs::write(&output, source))
        .with_context(|| format!("Error writing {output:?}"))?;
    Ok(())
}

/// Get the output directory's location relative to the docs directory, if it
/// lies within the docs tree. Previous output must not be read back as
/// sources, so the build skips this path. Writing over the docs directory
/// itself is an error.
fn output_within_docs(
    docs_dir: &Path,
    out_dir: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    let absolute = |path: &Path| {
        std::path::absolute(path)
            .map(|path| resolve_relative(Path::new(""), &path))
            .with_context(|| format!("Error resolving {path:?}"))
    };
    let docs_dir = absolute(docs_dir)?;
    let out_dir = absolute(out_dir)?;
    match out_dir.strip_prefix(&docs_dir) {
        Ok(relative) if relative.as_os_str().is_empty() => {
            bail!("Output directory {out_dir:?} is the docs directory")
        }
        Ok(relative) => Ok(Some(relative.to_owned())),
        Err(_) => Ok(None),
    }
}

/// Find all source documents under the docs directory. Return paths relative
/// to the docs directory, sorted. Excluded directories, and the output
/// directory if given, are not descended into.
fn find_sources(
    config: &DocsConfig,
    out_relative: Option<&Path>,
) -> io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    visit_directory(config, out_relative, Path::new(""), &mut sources)?;
    sources.sort();
    Ok(sources)
}

fn visit_directory(
    config: &DocsConfig,
    out_relative: Option<&Path>,
    relative_dir: &Path,
    sources: &mut Vec<PathBuf>,
) -> io::Result<()> {
    for entry in fs::read_dir(config.docs_dir.join(relative_dir))? {
        let entry = entry?;
        let relative = relative_dir.join(entry.file_name());
        if config.settings.is_excluded(&relative) {
            trace!(?relative, "Skipping excluded path");
            continue;
        }
        if out_relative == Some(relative.as_path()) {
            trace!(?relative, "Skipping output directory");
            continue;
        }

        if entry.file_type()?.is_dir() {
            visit_directory(config, out_relative, &relative, sources)?;
        } else if relative
            .to_string_lossy()
            .ends_with(&config.settings.source_suffix)
        {
            sources.push(relative);
        }
    }
    Ok(())
}
