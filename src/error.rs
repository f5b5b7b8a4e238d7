//! Unified error types.

use std::io;
use std::path::PathBuf;

/// The error type returned by dirview's fallible startup operations.
///
/// Application-level outcomes (403, 404, 500) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: a bad listen address, binding to a port, or a
/// serving root that cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid socket address `{addr}`")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("serving root `{}` is not usable", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Failure to read a directory after it passed the directory check.
///
/// Never reaches the client verbatim; the listing middleware logs it and
/// answers `500 Internal Server Error`.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("failed to read directory `{}`", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stat `{}`", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListingError {
    /// The underlying filesystem error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::ReadDir { source, .. } | Self::Stat { source, .. } => source,
        }
    }
}
