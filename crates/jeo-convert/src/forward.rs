//! Forward conversion: absolute drawing to indexed model.

use jeo_drawing::{Drawing, Metadata};
use jeo_format as format;
use jeo_format::Model;
use jeo_math::{Point3, DISTANCE_TOLERANCE};

use crate::palette;
use crate::registry::insert_or_reuse;
use crate::ConvertError;

/// Convert an absolute-form drawing into a deduplicated indexed model.
///
/// Entities are processed in collection order (lines, arcs, polylines), so
/// pool layout is deterministic for a given drawing. The first invalid
/// entity aborts the whole conversion.
pub fn drawing_to_model(drawing: &Drawing) -> Result<Model, ConvertError> {
    let mut builder = ModelBuilder::default();
    for line in &drawing.lines {
        builder.add_line(line)?;
    }
    for arc in &drawing.arcs {
        builder.add_arc(arc)?;
    }
    for polyline in &drawing.polylines {
        builder.add_polyline(polyline)?;
    }
    Ok(builder.model)
}

#[derive(Default)]
struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    /// Register a coordinate, snapping to any pool entry within tolerance.
    fn add_point(&mut self, point: Point3) -> u64 {
        let candidate = format::Point::new(point.x, point.y, point.z);
        insert_or_reuse(&mut self.model.points, candidate, |a, b| {
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            let dz = a.z - b.z;
            (dx * dx + dy * dy + dz * dz).sqrt() <= DISTANCE_TOLERANCE
        })
    }

    /// Register an entity color, if it has a usable one.
    ///
    /// Palette indices outside `1..=255` (0 means "inherit") are dropped
    /// rather than rejected; exchange files carry them routinely.
    fn add_color(&mut self, meta: &Metadata) -> Result<Option<u64>, ConvertError> {
        let index = match meta.color {
            Some(index) if (1..=255).contains(&index) => index,
            _ => return Ok(None),
        };
        let rgb = palette::rgb_for_index(index)?;
        Ok(Some(insert_or_reuse(&mut self.model.colors, rgb, |a, b| {
            a == b
        })))
    }

    /// Register an entity tag; tags with characters outside
    /// `[A-Za-z0-9_]` are dropped silently.
    fn add_tag(&mut self, meta: &Metadata) -> Option<u64> {
        let tag = meta.tag.as_ref()?;
        if !is_tag(tag) {
            return None;
        }
        Some(insert_or_reuse(&mut self.model.tags, tag.clone(), |a, b| {
            a == b
        }))
    }

    fn add_line(&mut self, line: &jeo_drawing::Line) -> Result<(), ConvertError> {
        let entity = format::Line {
            points: [self.add_point(line.p1), self.add_point(line.p2)],
            color: self.add_color(&line.meta)?,
            tag: self.add_tag(&line.meta),
        };
        self.model.lines.push(entity);
        Ok(())
    }

    fn add_arc(&mut self, arc: &jeo_drawing::Arc) -> Result<(), ConvertError> {
        let entity = format::Arc {
            points: [
                self.add_point(arc.center),
                self.add_point(arc.point_at(0.0)),
                self.add_point(arc.point_at(1.0)),
            ],
            direct: arc.theta1 <= arc.theta2,
            color: self.add_color(&arc.meta)?,
            tag: self.add_tag(&arc.meta),
        };
        self.model.arcs.push(entity);
        Ok(())
    }

    fn add_polyline(&mut self, polyline: &jeo_drawing::Polyline) -> Result<(), ConvertError> {
        if polyline.coords.len() < 2 {
            return Err(ConvertError::UnsupportedPolyline);
        }
        if let Some(bulges) = &polyline.bulges {
            if bulges.len() != polyline.coords.len() {
                return Err(ConvertError::BulgeCountMismatch {
                    coords: polyline.coords.len(),
                    bulges: bulges.len(),
                });
            }
        }

        let mut points: Vec<u64> = polyline
            .coords
            .iter()
            .map(|&coord| self.add_point(coord))
            .collect();
        let mut bulges = polyline.bulges.clone();

        // A closed polyline stores its first vertex again at the end; the
        // bulge sequence tracks the stored indices, so it repeats too.
        if polyline.closed {
            points.push(points[0]);
            if let Some(bulges) = &mut bulges {
                bulges.push(bulges[0]);
            }
        }

        let entity = format::Polyline {
            points,
            bulges,
            closed: polyline.closed,
            color: self.add_color(&polyline.meta)?,
            tag: self.add_tag(&polyline.meta),
        };
        self.model.polylines.push(entity);
        Ok(())
    }
}

fn is_tag(tag: &str) -> bool {
    tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
