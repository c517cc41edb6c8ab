//! mdBook preprocessor. mdBook runs `mdbook-yamcs supports <renderer>` to ask
//! whether a renderer is supported, then runs `mdbook-yamcs` with the book
//! context and content as JSON on stdin, expecting the processed book as JSON
//! on stdout.
//!
//! <https://rust-lang.github.io/mdBook/for_developers/preprocessors.html>

use crate::{GlobalArgs, Subcommand, util::docname};
use anyhow::anyhow;
use clap::Parser;
use itertools::Itertools;
use mdbook_preprocessor::{
    Preprocessor, PreprocessorContext,
    book::{Book, BookItem, Chapter},
    errors::{Error, Result},
    parse_input,
};
use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};
use tracing::{debug, info};
use yamcs_docs_core::Application;

const NAME: &str = "yamcs";
/// mdBook sources are always markdown
const CHAPTER_SUFFIX: &str = ".md";

/// Arguments for the standalone `mdbook-yamcs` binary
#[derive(Debug, Parser)]
#[clap(author, version, about, name = "mdbook-yamcs")]
pub struct PreprocessorArgs {
    #[command(subcommand)]
    pub subcommand: Option<PreprocessorSubcommand>,
}

impl PreprocessorArgs {
    /// Alias for [clap::Parser::parse]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[derive(Clone, Debug, clap::Subcommand)]
pub enum PreprocessorSubcommand {
    /// Check if the preprocessor supports a particular renderer
    ///
    /// <https://rust-lang.github.io/mdBook/for_developers/preprocessors.html#hooking-into-mdbook>
    Supports { renderer: String },
}

/// Run as an mdBook preprocessor, reading the book from stdin
///
/// The docs directory is taken from the book root that mdBook passes in, so
/// the global `--docs-dir` argument has no effect here.
#[derive(Clone, Debug, Parser)]
pub struct MdbookCommand {
    #[command(subcommand)]
    subcommand: Option<PreprocessorSubcommand>,
}

impl Subcommand for MdbookCommand {
    fn execute(self, _global: GlobalArgs) -> anyhow::Result<ExitCode> {
        run(self.subcommand)
    }
}

/// Run the preprocessor protocol. With no subcommand, process a book from
/// stdin.
pub fn run(
    subcommand: Option<PreprocessorSubcommand>,
) -> anyhow::Result<ExitCode> {
    let preprocessor = YamcsPreprocessor;
    if let Some(PreprocessorSubcommand::Supports { renderer }) = subcommand {
        // Caller wants to know if this renderer is supported. Signal whether
        // the renderer is supported by exiting with 1 or 0.
        if preprocessor.supports_renderer(&renderer)? {
            Ok(ExitCode::SUCCESS)
        } else {
            Err(anyhow!("Unsupported renderer {renderer}"))
        }
    } else {
        if io::stdin().is_terminal() {
            // It's possible the user is testing the preprocessor and meant to
            // do this, but it's probably a mistake. We'll block forever on
            // stdin so give them a warning
            eprintln!(
                "WARNING: Running as mdbook preprocessor, loading from stdin"
            );
        }

        let (ctx, book) = parse_input(io::stdin())?;
        let processed_book = preprocessor.run(&ctx, book)?;
        serde_json::to_writer(io::stdout(), &processed_book)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Preprocessor that runs every chapter through the build hooks
#[derive(Copy, Clone, Debug, Default)]
pub struct YamcsPreprocessor;

impl Preprocessor for YamcsPreprocessor {
    fn name(&self) -> &str {
        NAME
    }

    fn run(
        &self,
        ctx: &PreprocessorContext,
        mut book: Book,
    ) -> Result<Book, Error> {
        // The book root is the docs directory, so the build manifest is found
        // relative to it
        let app = yamcs_docs_core::configure(&ctx.root)?;
        let count = process_book(&app, &mut book);
        info!(count, "Preprocessed chapters");
        Ok(book)
    }

    fn supports_renderer(&self, _renderer: &str) -> Result<bool, Error> {
        // Substitution is renderer-agnostic
        Ok(true)
    }
}

/// Emit `source-read` for each chapter in the book. Return the number of
/// chapters processed.
pub fn process_book(app: &Application, book: &mut Book) -> usize {
    let mut count = 0;
    book.for_each_mut(|item: &mut BookItem| {
        if let BookItem::Chapter(chapter) = item {
            let docname = chapter_docname(chapter);
            debug!(%docname, "Processing chapter");
            app.emit_source_read(&docname, &mut chapter.content);
            count += 1;
        }
    });
    count
}

/// Document name for a chapter. Draft chapters have no file, so fall back to
/// the chapter title.
fn chapter_docname(chapter: &Chapter) -> String {
    match &chapter.path {
        Some(path) => docname(path, CHAPTER_SUFFIX),
        None => chapter.parent_names.iter().chain([&chapter.name]).join("/"),
    }
}
