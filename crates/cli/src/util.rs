use itertools::Itertools;
use serde::Serialize;
use std::{io, path::Path};

/// Print an error chain to stderr
pub fn print_error(error: &anyhow::Error) {
    eprintln!("{error}");
    error
        .chain()
        .skip(1)
        .for_each(|cause| eprintln!("  {cause}"));
}

/// Serialize data to YAML and print it
///
/// ## Errors
///
/// Error if serialization fails or writing to stdout fails
pub fn print_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    serde_yaml::to_writer(io::stdout(), value).map_err(anyhow::Error::from)
}

/// Get the document name for a source path: the path relative to the docs
/// directory, `/`-separated, with the source suffix removed
pub fn docname(relative: &Path, suffix: &str) -> String {
    let name = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .join("/");
    match name.strip_suffix(suffix) {
        Some(stripped) => stripped.to_owned(),
        None => name,
    }
}
