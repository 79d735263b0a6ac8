#![warn(missing_docs)]

//! DXF import and export for absolute-form drawings.
//!
//! The reader keeps LINE, ARC and LWPOLYLINE entities plus the layer table
//! and silently drops every other entity kind. Arc angle pairs are
//! normalized on import and layer colors are resolved onto the entities, so
//! downstream converters never see a decreasing sweep or a "by layer"
//! color. Entity tags travel as extended data under the [`TAG_APP_NAME`]
//! application.

mod error;
mod read;
mod write;

pub use error::DxfError;
pub use read::read_file;
pub use write::write_file;

/// Extended-data application name carrying the entity tag.
pub const TAG_APP_NAME: &str = "PE_URL";
