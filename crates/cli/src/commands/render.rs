use crate::{GlobalArgs, Subcommand, util::docname};
use anyhow::Context;
use clap::{Parser, ValueHint};
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};
use yamcs_docs_util::paths::resolve_relative;

/// Run a single source document through the build hooks and print the result
#[derive(Clone, Debug, Parser)]
pub struct RenderCommand {
    /// Source file to render
    #[clap(value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

impl Subcommand for RenderCommand {
    fn execute(self, global: GlobalArgs) -> anyhow::Result<ExitCode> {
        let app = yamcs_docs_core::configure(&global.docs_dir)?;
        let mut source = fs::read_to_string(&self.file)
            .with_context(|| format!("Error reading {:?}", self.file))?;

        let relative = relative_to_docs(&self.file, &global.docs_dir);
        let docname =
            docname(&relative, &app.config().settings.source_suffix);
        app.emit_source_read(&docname, &mut source);
        print!("{source}");
        Ok(ExitCode::SUCCESS)
    }
}

/// Get the path of a file relative to the docs directory. If the file is
/// outside the docs tree, just use its file name.
fn relative_to_docs(file: &Path, docs_dir: &Path) -> PathBuf {
    let file = resolve_relative(Path::new("."), file);
    let docs_dir = resolve_relative(Path::new("."), docs_dir);
    let relative = if docs_dir == Path::new(".") && file.is_relative() {
        Some(file.as_path())
    } else {
        file.strip_prefix(&docs_dir).ok()
    };
    match relative {
        Some(relative) if !relative.starts_with("..") => relative.to_owned(),
        _ => file.file_name().map(PathBuf::from).unwrap_or(file),
    }
}
