#![forbid(unsafe_code)]
#![deny(clippy::all)]

//! Command line interface for the Yamcs Maven plugin documentation build.
//!
//! **This crate is not semver compliant**. The version is locked to the root
//! `yamcs_docs` crate version. If you choose to depend directly on this crate,
//! you do so at your own risk of breakage.

mod commands;
mod util;

pub use commands::mdbook::{PreprocessorArgs, YamcsPreprocessor};

use crate::commands::{
    build::BuildCommand, mdbook::MdbookCommand, render::RenderCommand,
    show::ShowCommand,
};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};

const COMMAND_NAME: &str = "yamcs-docs";

#[derive(Debug, Parser)]
#[clap(
    author,
    version,
    about,
    name = COMMAND_NAME,
    long_about = "Documentation build tooling for the Yamcs Maven plugin. \
        Version placeholders in the documentation sources are filled in from \
        the Maven build manifest."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub subcommand: CliCommand,
}

impl Args {
    /// Alias for [clap::Parser::parse]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

/// Arguments that are available to all subcommands
#[derive(Debug, Parser)]
pub struct GlobalArgs {
    /// Directory containing the documentation sources. The build manifest is
    /// looked up relative to this, at `../pom.xml` by default
    #[clap(long, short = 'C', default_value = ".")]
    pub docs_dir: PathBuf,
}

/// A CLI subcommand
#[derive(Clone, Debug, clap::Subcommand)]
pub enum CliCommand {
    Build(BuildCommand),
    Mdbook(MdbookCommand),
    Render(RenderCommand),
    Show(ShowCommand),
}

impl CliCommand {
    /// Execute this CLI subcommand
    pub fn execute(self, global: GlobalArgs) -> anyhow::Result<ExitCode> {
        match self {
            Self::Build(command) => command.execute(global),
            Self::Mdbook(command) => command.execute(global),
            Self::Render(command) => command.execute(global),
            Self::Show(command) => command.execute(global),
        }
    }
}

/// Parse args and run. Any error is printed to stderr, with its full chain of
/// causes, and turned into a failure exit code.
pub fn run() -> ExitCode {
    let args = Args::parse();
    args.subcommand
        .execute(args.global)
        .unwrap_or_else(|error| {
            util::print_error(&error);
            ExitCode::FAILURE
        })
}

/// Run as a standalone mdBook preprocessor. This is the entrypoint for the
/// `mdbook-yamcs` binary, which mdBook invokes directly.
pub fn mdbook() -> ExitCode {
    let args = PreprocessorArgs::parse();
    commands::mdbook::run(args.subcommand).unwrap_or_else(|error| {
        util::print_error(&error);
        ExitCode::FAILURE
    })
}

/// An executable subcommand. This trait isn't strictly necessary because we do
/// static dispatch via the command enum, but it's helpful to enforce a
/// consistent interface for each subcommand.
trait Subcommand {
    /// Execute the subcommand
    fn execute(self, global: GlobalArgs) -> anyhow::Result<ExitCode>;
}
