use crate::{GlobalArgs, Subcommand, util::print_yaml};
use clap::Parser;
use std::process::ExitCode;
use yamcs_docs_config::{DocsConfig, Settings};
use yamcs_docs_util::paths::resolve_relative;

/// Print meta information about the documentation build
#[derive(Clone, Debug, Parser)]
pub struct ShowCommand {
    #[command(subcommand)]
    target: ShowTarget,
}

#[derive(Copy, Clone, Debug, clap::Subcommand)]
enum ShowTarget {
    /// Print the paths of the files the build reads configuration from
    Paths,
    /// Print the documentation configuration
    ///
    /// This loads the settings and build manifest and re-stringifies them, so
    /// it will print exactly what the build will use in action.
    Config,
}

impl Subcommand for ShowCommand {
    fn execute(self, global: GlobalArgs) -> anyhow::Result<ExitCode> {
        match self.target {
            ShowTarget::Paths => {
                let settings = Settings::load(&global.docs_dir)?;
                println!(
                    "Settings: {}",
                    Settings::path(&global.docs_dir).display()
                );
                println!(
                    "Manifest: {}",
                    resolve_relative(&global.docs_dir, &settings.manifest)
                        .display()
                );
            }
            ShowTarget::Config => {
                let config = DocsConfig::load(&global.docs_dir)?;
                print_yaml(&config)?;
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}
