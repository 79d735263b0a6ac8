#![warn(missing_docs)]

//! Converters between the absolute drawing form and the indexed .jeo model.
//!
//! [`drawing_to_model`] builds the deduplicated pools and index-based
//! entities from an absolute-form drawing; [`model_to_drawing`] resolves
//! them back, reconstructing arc radius and angles from the three referenced
//! points. Both are pure single-pass functions: no I/O, no logging, and the
//! first invalid entity aborts the conversion with a [`ConvertError`].

mod error;
mod forward;
mod inverse;
pub mod palette;
pub mod registry;

pub use error::ConvertError;
pub use forward::drawing_to_model;
pub use inverse::model_to_drawing;
