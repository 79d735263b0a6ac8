#![warn(missing_docs)]

//! Absolute-form drawing model.
//!
//! Entities here carry literal coordinates and angles, the way a CAD
//! exchange file does: lines by their endpoints, arcs by center, radius and
//! an angle pair, polylines by an ordered vertex list. This is the input of
//! the forward converter and the output of the inverse converter; the
//! indexed counterpart lives in `jeo-format`.

use jeo_math::Point3;

/// A layer from the source drawing's layer table.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name.
    pub name: String,
    /// Layer default color (palette index).
    pub color: i64,
}

/// Metadata shared by every entity kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Name of the layer the entity sits on.
    pub layer: String,
    /// Direct entity color as a palette index; `None` means "by layer".
    pub color: Option<i64>,
    /// Free-text tag attached to the entity, if any.
    pub tag: Option<String>,
}

/// A straight segment between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Start point.
    pub p1: Point3,
    /// End point.
    pub p2: Point3,
    /// Shared entity metadata.
    pub meta: Metadata,
}

/// A circular arc given by center, radius and an angle pair in radians.
///
/// The angle pair is normalized on import (see `jeo-math`), so `theta1` and
/// `theta2` together already encode the winding direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Arc center.
    pub center: Point3,
    /// Arc radius (positive).
    pub radius: f64,
    /// Sweep start angle in radians.
    pub theta1: f64,
    /// Sweep end angle in radians.
    pub theta2: f64,
    /// Shared entity metadata.
    pub meta: Metadata,
}

impl Arc {
    /// Evaluate the arc at parameter `u` in `[0, 1]`.
    ///
    /// `u = 0` is the sweep start, `u = 1` the sweep end; z is held at the
    /// center's z.
    pub fn point_at(&self, u: f64) -> Point3 {
        let theta = self.theta1 + u * (self.theta2 - self.theta1);
        Point3::new(
            self.center.x + self.radius * theta.cos(),
            self.center.y + self.radius * theta.sin(),
            self.center.z,
        )
    }
}

/// An ordered polyline, optionally closed, with optional per-vertex bulges.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Vertex coordinates in drawing order.
    pub coords: Vec<Point3>,
    /// Per-vertex bulge values, aligned with `coords` when present.
    pub bulges: Option<Vec<f64>>,
    /// Whether the polyline is closed.
    pub closed: bool,
    /// Shared entity metadata.
    pub meta: Metadata,
}

/// A complete absolute-form drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    /// Layer table.
    pub layers: Vec<Layer>,
    /// Line entities.
    pub lines: Vec<Line>,
    /// Arc entities.
    pub arcs: Vec<Arc>,
    /// Polyline entities.
    pub polylines: Vec<Polyline>,
}

impl Drawing {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in missing entity colors from the layer table.
    ///
    /// Entities without a direct color inherit their layer's color; entities
    /// on an unknown layer keep `None`. Run once after import so the
    /// converters never have to consult the layer table.
    pub fn resolve_layer_colors(&mut self) {
        let layer_colors: std::collections::HashMap<&str, i64> = self
            .layers
            .iter()
            .map(|layer| (layer.name.as_str(), layer.color))
            .collect();

        let resolve = |meta: &mut Metadata| {
            if meta.color.is_none() {
                meta.color = layer_colors.get(meta.layer.as_str()).copied();
            }
        };

        for line in &mut self.lines {
            resolve(&mut line.meta);
        }
        for arc in &mut self.arcs {
            resolve(&mut arc.meta);
        }
        for polyline in &mut self.polylines {
            resolve(&mut polyline.meta);
        }
    }
}
