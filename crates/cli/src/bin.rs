//! Test-only binary for CLI integration tests. Tracing is left uninitialized
//! so stderr only contains error output.

use std::process::ExitCode;

fn main() -> ExitCode {
    yamcs_docs_cli::run()
}
