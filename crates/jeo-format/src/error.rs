//! Error types for .jeo model decoding and validation.

use thiserror::Error;

/// Errors produced while reading, writing or validating a .jeo model.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or a JSON shape that does not match the schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A pre-2.0 file using the retired positional encoding.
    #[error("jeo files with version {major}.{minor} are no longer supported")]
    LegacyVersion {
        /// Major version found in the file.
        major: u64,
        /// Minor version found in the file.
        minor: u64,
    },

    /// A version this reader does not understand.
    #[error("unsupported jeo version number: {major}.{minor}")]
    UnsupportedVersion {
        /// Major version found in the file.
        major: u64,
        /// Minor version found in the file.
        minor: u64,
    },

    /// An entity references a pool entry that does not exist.
    #[error("{pool} index {index} out of range (pool has {len} entries)")]
    IndexOutOfRange {
        /// Name of the pool the index points into.
        pool: &'static str,
        /// The offending index.
        index: u64,
        /// Number of entries in the pool.
        len: usize,
    },

    /// A polyline's bulge count does not match its point-index count.
    #[error("size of points and bulges must be equal (points {points}, bulges {bulges})")]
    BulgeCountMismatch {
        /// Number of point indices stored on the polyline.
        points: usize,
        /// Number of bulge values stored on the polyline.
        bulges: usize,
    },
}
