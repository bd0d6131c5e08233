//! crates/logging-sink/src/error.rs
//! Errors raised while resolving sink identifiers.

use std::io;
use std::path::PathBuf;

/// Error returned when a sink identifier cannot be turned into a destination.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The identifier was empty or only whitespace.
    #[error("empty sink path")]
    EmptyPath,

    /// The identifier used a URL scheme other than `file`.
    #[error("no sink registered for scheme {scheme:?} in {identifier:?}")]
    UnsupportedScheme {
        /// Scheme portion of the identifier.
        scheme: String,
        /// The full identifier as supplied.
        identifier: String,
    },

    /// The file backing a sink could not be opened for appending.
    #[error("cannot open sink {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
