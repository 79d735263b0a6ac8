//! DXF import.

use std::path::Path;

use dxf::entities::{Entity, EntityCommon, EntityType};
use jeo_drawing::{Arc, Drawing, Layer, Line, Metadata, Polyline};
use jeo_math::{normalize_sweep, Point3};

use crate::{DxfError, TAG_APP_NAME};

/// Load a DXF file into an absolute-form drawing.
///
/// Layer colors are resolved onto the entities before returning, so every
/// entity's color is already the effective one.
pub fn read_file(path: &Path) -> Result<Drawing, DxfError> {
    let source = dxf::Drawing::load_file(path)?;
    let mut drawing = convert_drawing(&source);
    drawing.resolve_layer_colors();
    Ok(drawing)
}

pub(crate) fn convert_drawing(source: &dxf::Drawing) -> Drawing {
    let mut drawing = Drawing::new();
    for layer in source.layers() {
        drawing.layers.push(Layer {
            name: layer.name.clone(),
            color: layer.color.index().map_or(7, i64::from),
        });
    }
    for entity in source.entities() {
        convert_entity(&mut drawing, entity);
    }
    drawing
}

/// Convert one entity; kinds other than LINE, ARC and LWPOLYLINE are
/// dropped without comment.
pub(crate) fn convert_entity(drawing: &mut Drawing, entity: &Entity) {
    let meta = convert_metadata(&entity.common);
    match &entity.specific {
        EntityType::Line(line) => drawing.lines.push(Line {
            p1: to_point(&line.p1),
            p2: to_point(&line.p2),
            meta,
        }),
        EntityType::Arc(arc) => drawing.arcs.push(convert_arc(arc, meta)),
        EntityType::LwPolyline(polyline) => {
            drawing
                .polylines
                .push(convert_polyline(polyline, entity.common.elevation, meta));
        }
        _ => {}
    }
}

fn convert_arc(arc: &dxf::entities::Arc, meta: Metadata) -> Arc {
    // DXF stores arc angles in degrees and encodes the winding in the
    // extrusion normal: a negative z means the sweep runs clockwise.
    let direct = arc.normal.z > 0.0;
    let (theta1, theta2) = normalize_sweep(
        arc.start_angle.to_radians(),
        arc.end_angle.to_radians(),
        direct,
    );
    Arc {
        center: to_point(&arc.center),
        radius: arc.radius,
        theta1,
        theta2,
        meta,
    }
}

fn convert_polyline(
    polyline: &dxf::entities::LwPolyline,
    elevation: f64,
    meta: Metadata,
) -> Polyline {
    let coords = polyline
        .vertices
        .iter()
        .map(|vertex| Point3::new(vertex.x, vertex.y, elevation))
        .collect();

    // An all-zero bulge column means the polyline has no curved segments;
    // keep `None` in that case so straight polylines stay bulge-free.
    let bulges: Vec<f64> = polyline.vertices.iter().map(|vertex| vertex.bulge).collect();
    let bulges = bulges
        .iter()
        .any(|bulge| bulge.abs() > f64::EPSILON)
        .then_some(bulges);

    Polyline {
        coords,
        bulges,
        closed: polyline.is_closed(),
        meta,
    }
}

fn convert_metadata(common: &EntityCommon) -> Metadata {
    Metadata {
        layer: common.layer.clone(),
        color: common.color.index().map(i64::from),
        tag: find_tag(common),
    }
}

fn find_tag(common: &EntityCommon) -> Option<String> {
    common
        .x_data
        .iter()
        .find(|x_data| x_data.application_name == TAG_APP_NAME)
        .and_then(|x_data| {
            x_data.items.iter().find_map(|item| match item {
                dxf::XDataItem::Str(value) => Some(value.clone()),
                _ => None,
            })
        })
}

fn to_point(point: &dxf::Point) -> Point3 {
    Point3::new(point.x, point.y, point.z)
}
