//! Error type for DXF import/export.

use thiserror::Error;

/// Errors produced while loading or saving a DXF file.
#[derive(Error, Debug)]
pub enum DxfError {
    /// The underlying DXF parser or writer failed.
    #[error("DXF error: {0}")]
    Dxf(#[from] dxf::DxfError),
}
