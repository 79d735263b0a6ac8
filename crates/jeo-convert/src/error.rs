//! Error types for the converters.

use thiserror::Error;

/// Errors produced while converting between the two model forms.
///
/// Every variant is fatal to the conversion call that raised it: the
/// converters never skip an invalid entity and never return a partial model.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A polyline with fewer than two vertices, which neither form can
    /// represent.
    #[error("polylines with less than 2 vertexes are not supported")]
    UnsupportedPolyline,

    /// A palette index outside the 1..=255 range of the exchange palette.
    #[error("unsupported color index: {0}")]
    UnsupportedColor(i64),

    /// A polyline's bulge count does not match its vertex count.
    #[error("size of coords and bulges must be equal (coords {coords}, bulges {bulges})")]
    BulgeCountMismatch {
        /// Number of vertices on the polyline.
        coords: usize,
        /// Number of bulge values on the polyline.
        bulges: usize,
    },

    /// An indexed entity references a pool entry that does not exist.
    #[error("{pool} index {index} out of range (pool has {len} entries)")]
    IndexOutOfRange {
        /// Name of the pool the index points into.
        pool: &'static str,
        /// The offending index.
        index: u64,
        /// Number of entries in the pool.
        len: usize,
    },
}
