//! Versioned JSON reader/writer for .jeo files.
//!
//! Only the keyed-object 2.0 schema is supported. Version 1 files used a
//! positional-array encoding that is no longer produced or accepted; the
//! reader reports them as legacy rather than malformed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FormatError, Model};

/// Schema version written by [`to_json`] and required by [`from_json`].
pub const VERSION: Version = Version { major: 2, minor: 0 };

/// A `{major, minor}` schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Major version; bumped on incompatible schema changes.
    pub major: u64,
    /// Minor version; bumped on additive changes.
    pub minor: u64,
}

/// The on-disk document: a version header plus the model body.
#[derive(Debug, Serialize, Deserialize)]
struct VersionedModel {
    version: Version,
    #[serde(flatten)]
    model: Model,
}

/// Serialize a model to pretty-printed 2.0 JSON.
pub fn to_json(model: &Model) -> Result<String, FormatError> {
    let document = VersionedModel {
        version: VERSION,
        model: model.clone(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse a .jeo document, checking the version and validating the model.
pub fn from_json(text: &str) -> Result<Model, FormatError> {
    let document: VersionedModel = serde_json::from_str(text)?;

    let Version { major, minor } = document.version;
    if major < 2 {
        return Err(FormatError::LegacyVersion { major, minor });
    }
    if document.version != VERSION {
        return Err(FormatError::UnsupportedVersion { major, minor });
    }

    document.model.validate()?;
    Ok(document.model)
}

/// Read and decode a .jeo file.
pub fn read_file(path: &Path) -> Result<Model, FormatError> {
    let text = fs::read_to_string(path)?;
    from_json(&text)
}

/// Encode and write a .jeo file.
pub fn write_file(model: &Model, path: &Path) -> Result<(), FormatError> {
    let text = to_json(model)?;
    fs::write(path, text)?;
    Ok(())
}
