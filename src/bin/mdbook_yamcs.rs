//! mdBook preprocessor entrypoint. Add this to `book.toml` to have version
//! placeholders in the book filled in from the build manifest:
//!
//! ```toml
//! [preprocessor.yamcs]
//! ```
//!
//! mdBook finds the binary by name (`mdbook-yamcs`), so it must be on `PATH`.

use std::process::ExitCode;

fn main() -> ExitCode {
    yamcs_docs_util::initialize_tracing();
    yamcs_docs_cli::mdbook()
}
