#![warn(missing_docs)]

//! Indexed geometry model for the .jeo format.
//!
//! A .jeo model stores a drawing as four deduplicated pools (points, colors,
//! tags) plus entity collections that reference the pools by index — no
//! entity embeds a coordinate, color or tag directly. Arcs are stored as
//! three point indices (center, first, last) and a direction flag instead of
//! an angle pair; the converters in `jeo-convert` translate between this and
//! the absolute form.
//!
//! The structs double as the wire schema: serde derives match the keyed
//! JSON object layout field for field. The versioned reader/writer lives in
//! [`json`].

use serde::{Deserialize, Serialize};

mod error;
pub mod json;

pub use error::FormatError;

/// An RGB color pool entry, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

/// A point pool entry, serialized as `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Point> for [f64; 3] {
    fn from(point: Point) -> Self {
        [point.x, point.y, point.z]
    }
}

/// A line referencing its two endpoints by point-pool index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// `[first, last]` point-pool indices.
    pub points: [u64; 2],
    /// Color-pool index, if the entity has a direct color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u64>,
    /// Tag-pool index, if the entity carries a tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<u64>,
}

impl Line {
    /// Point-pool index of the start point.
    pub fn first_point_index(&self) -> u64 {
        self.points[0]
    }

    /// Point-pool index of the end point.
    pub fn last_point_index(&self) -> u64 {
        self.points[1]
    }
}

/// An arc referencing center and endpoints by point-pool index.
///
/// `direct` records whether the original angle pair was already increasing;
/// it disambiguates the two sweeps that share the same center and endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// `[center, first, last]` point-pool indices.
    pub points: [u64; 3],
    /// Whether the original sweep was counter-clockwise (theta1 <= theta2).
    pub direct: bool,
    /// Color-pool index, if the entity has a direct color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u64>,
    /// Tag-pool index, if the entity carries a tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<u64>,
}

impl Arc {
    /// Point-pool index of the center.
    pub fn center_index(&self) -> u64 {
        self.points[0]
    }

    /// Point-pool index of the sweep start point.
    pub fn first_point_index(&self) -> u64 {
        self.points[1]
    }

    /// Point-pool index of the sweep end point.
    pub fn last_point_index(&self) -> u64 {
        self.points[2]
    }
}

/// A polyline referencing its vertices by point-pool index.
///
/// A closed polyline repeats its first index as the final entry, so the
/// stored sequence is one longer than the original vertex count. When
/// `bulges` is present it is aligned 1:1 with the *stored* index sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Point-pool indices in drawing order.
    pub points: Vec<u64>,
    /// Per-vertex bulge values, aligned with `points` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulges: Option<Vec<f64>>,
    /// Whether the polyline is closed.
    pub closed: bool,
    /// Color-pool index, if the entity has a direct color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u64>,
    /// Tag-pool index, if the entity carries a tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<u64>,
}

/// A complete indexed model: the three pools plus the entity collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Deduplicated color pool.
    pub colors: Vec<Color>,
    /// Deduplicated tag pool.
    pub tags: Vec<String>,
    /// Tolerance-deduplicated point pool.
    pub points: Vec<Point>,
    /// Line entities.
    pub lines: Vec<Line>,
    /// Arc entities.
    pub arcs: Vec<Arc>,
    /// Polyline entities.
    pub polylines: Vec<Polyline>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check structural consistency: every index lands inside its pool and
    /// polyline bulge counts match their point-index counts.
    ///
    /// Decoded models must pass this before the inverse converter trusts
    /// them; models built by the forward converter satisfy it by
    /// construction.
    pub fn validate(&self) -> Result<(), FormatError> {
        let point = |index: u64| self.check_index(index, self.points.len(), "points");
        let color = |index: Option<u64>| match index {
            Some(index) => self.check_index(index, self.colors.len(), "colors"),
            None => Ok(()),
        };
        let tag = |index: Option<u64>| match index {
            Some(index) => self.check_index(index, self.tags.len(), "tags"),
            None => Ok(()),
        };

        for line in &self.lines {
            for &index in &line.points {
                point(index)?;
            }
            color(line.color)?;
            tag(line.tag)?;
        }
        for arc in &self.arcs {
            for &index in &arc.points {
                point(index)?;
            }
            color(arc.color)?;
            tag(arc.tag)?;
        }
        for polyline in &self.polylines {
            for &index in &polyline.points {
                point(index)?;
            }
            color(polyline.color)?;
            tag(polyline.tag)?;
            if let Some(bulges) = &polyline.bulges {
                if bulges.len() != polyline.points.len() {
                    return Err(FormatError::BulgeCountMismatch {
                        points: polyline.points.len(),
                        bulges: bulges.len(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_index(&self, index: u64, len: usize, pool: &'static str) -> Result<(), FormatError> {
        if (index as usize) < len {
            Ok(())
        } else {
            Err(FormatError::IndexOutOfRange { pool, index, len })
        }
    }
}
