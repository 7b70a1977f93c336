//! Document I/O error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing documentation files.
///
/// Read, write and walk failures are per-entry: commands record them in their
/// reports and keep walking. `MissingRoot` aborts before any traversal.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("error reading `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("error writing `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("error walking `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("directory `{0}` does not exist")]
    MissingRoot(PathBuf),
}

impl DocError {
    /// One-line description including the underlying cause.
    pub fn describe(&self) -> String {
        match self {
            Self::Read(_, err) | Self::Write(_, err) => format!("{self}: {err}"),
            Self::Walk(_, err) => match err.io_error() {
                Some(io) => format!("{self}: {io}"),
                None => format!("{self}: {err}"),
            },
            Self::MissingRoot(_) => self.to_string(),
        }
    }
}
