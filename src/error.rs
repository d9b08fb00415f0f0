//! Error types for the `zorder-region` CLI demo.
//!
//! The core algebra (`bits`, `morton`, `interval`, `aabb`, `region`, `cell`)
//! has no fallible surface of its own: malformed input there is a caller
//! bug, caught by `debug_assert!`. This type exists for the CLI's genuinely
//! recoverable failures — bad arguments, unparsable JSON, I/O errors.

use thiserror::Error;

/// Result type alias for `zorder-region` CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The CLI's error type.
#[derive(Error, Debug)]
pub enum Error {
    /// `decompose`/`region-op` received a min greater than max.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: u64, max: u64 },

    /// A region file failed to parse as JSON.
    #[cfg(feature = "serde")]
    #[error("failed to parse region file {path:?}: {source}")]
    InvalidRegionJson {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error reading/writing a region file.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An unsupported operation name was passed to `region-op`.
    #[error("unknown region operation {0:?} (expected union, intersect, or difference)")]
    UnknownOperation(String),
}
