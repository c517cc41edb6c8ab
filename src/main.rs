//! Documentation build tooling for the Yamcs Maven plugin. All logic lives in
//! the `yamcs_docs_cli` crate; this is just the entrypoint.

use std::process::ExitCode;

fn main() -> ExitCode {
    yamcs_docs_util::initialize_tracing();
    yamcs_docs_cli::run()
}
