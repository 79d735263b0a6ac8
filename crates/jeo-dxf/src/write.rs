//! DXF export.

use std::path::Path;

use dxf::entities::{Entity, EntityType};
use jeo_drawing::{Arc, Drawing, Line, Metadata, Polyline};

use crate::{DxfError, TAG_APP_NAME};

/// Save an absolute-form drawing as a DXF file.
pub fn write_file(drawing: &Drawing, path: &Path) -> Result<(), DxfError> {
    let target = convert_drawing(drawing);
    target.save_file(path)?;
    Ok(())
}

pub(crate) fn convert_drawing(drawing: &Drawing) -> dxf::Drawing {
    let mut target = dxf::Drawing::new();
    for layer in &drawing.layers {
        let mut data = dxf::tables::Layer::default();
        data.name = layer.name.clone();
        data.color = dxf::Color::from_index(layer.color as u8);
        target.add_layer(data);
    }
    for line in &drawing.lines {
        target.add_entity(convert_line(line));
    }
    for arc in &drawing.arcs {
        target.add_entity(convert_arc(arc));
    }
    for polyline in &drawing.polylines {
        target.add_entity(convert_polyline(polyline));
    }
    target
}

pub(crate) fn convert_line(line: &Line) -> Entity {
    let mut data = dxf::entities::Line::default();
    data.p1 = to_point(line.p1);
    data.p2 = to_point(line.p2);
    with_metadata(EntityType::Line(data), &line.meta)
}

pub(crate) fn convert_arc(arc: &Arc) -> Entity {
    let mut data = dxf::entities::Arc::default();
    data.center = to_point(arc.center);
    data.radius = arc.radius;
    data.start_angle = arc.theta1.to_degrees();
    data.end_angle = arc.theta2.to_degrees();
    with_metadata(EntityType::Arc(data), &arc.meta)
}

pub(crate) fn convert_polyline(polyline: &Polyline) -> Entity {
    let mut data = dxf::entities::LwPolyline::default();
    data.set_is_closed(polyline.closed);
    let mut elevation = 0.0;
    for (index, coord) in polyline.coords.iter().enumerate() {
        let mut vertex = dxf::LwPolylineVertex::default();
        vertex.x = coord.x;
        vertex.y = coord.y;
        vertex.bulge = polyline
            .bulges
            .as_ref()
            .and_then(|bulges| bulges.get(index))
            .copied()
            .unwrap_or(0.0);
        data.vertices.push(vertex);
        // LWPOLYLINE is planar; the shared elevation carries the z.
        elevation = coord.z;
    }
    let mut entity = with_metadata(EntityType::LwPolyline(data), &polyline.meta);
    entity.common.elevation = elevation;
    entity
}

fn with_metadata(specific: EntityType, meta: &Metadata) -> Entity {
    let mut entity = Entity::new(specific);
    entity.common.layer = meta.layer.clone();
    entity.common.color = match meta.color {
        Some(index) if (1..=255).contains(&index) => dxf::Color::from_index(index as u8),
        _ => dxf::Color::by_layer(),
    };
    if let Some(tag) = &meta.tag {
        entity.common.x_data.push(dxf::XData {
            application_name: TAG_APP_NAME.to_string(),
            items: vec![dxf::XDataItem::Str(tag.clone())],
        });
    }
    entity
}

fn to_point(point: jeo_math::Point3) -> dxf::Point {
    dxf::Point::new(point.x, point.y, point.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read;
    use jeo_math::Point3;
    use std::f64::consts::PI;

    fn meta(color: Option<i64>, tag: Option<&str>) -> Metadata {
        Metadata {
            layer: "0".to_string(),
            color,
            tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn test_arc_written_in_degrees() {
        let arc = Arc {
            center: Point3::new(1.0, 2.0, 0.0),
            radius: 3.0,
            theta1: PI / 6.0,
            theta2: PI,
            meta: meta(None, None),
        };
        let entity = convert_arc(&arc);

        match &entity.specific {
            EntityType::Arc(data) => {
                assert!((data.start_angle - 30.0).abs() < 1e-12);
                assert!((data.end_angle - 180.0).abs() < 1e-12);
                assert!((data.radius - 3.0).abs() < 1e-12);
            }
            other => panic!("expected an arc, got {other:?}"),
        }
    }

    #[test]
    fn test_metadata_written() {
        let line = Line {
            p1: Point3::origin(),
            p2: Point3::new(1.0, 0.0, 0.0),
            meta: meta(Some(5), Some("beam_1")),
        };
        let entity = convert_line(&line);

        assert_eq!(entity.common.color.index(), Some(5));
        let x_data = &entity.common.x_data[0];
        assert_eq!(x_data.application_name, TAG_APP_NAME);
        assert!(matches!(&x_data.items[0], dxf::XDataItem::Str(tag) if tag == "beam_1"));
    }

    #[test]
    fn test_missing_color_written_by_layer() {
        let line = Line {
            p1: Point3::origin(),
            p2: Point3::new(1.0, 0.0, 0.0),
            meta: meta(None, None),
        };
        let entity = convert_line(&line);
        assert_eq!(entity.common.color.index(), None);
    }

    #[test]
    fn test_polyline_round_trips_through_entities() {
        let polyline = Polyline {
            coords: vec![
                Point3::new(0.0, 0.0, 2.0),
                Point3::new(4.0, 0.0, 2.0),
                Point3::new(4.0, 3.0, 2.0),
            ],
            bulges: Some(vec![0.5, 0.0, -0.25]),
            closed: true,
            meta: meta(None, None),
        };

        let entity = convert_polyline(&polyline);
        let mut restored = Drawing::new();
        read::convert_entity(&mut restored, &entity);

        assert_eq!(restored.polylines[0], polyline);
    }

    #[test]
    fn test_line_round_trips_through_entities() {
        let line = Line {
            p1: Point3::new(1.0, 2.0, 3.0),
            p2: Point3::new(-4.0, 5.0, -6.0),
            meta: meta(Some(3), Some("girder")),
        };

        let entity = convert_line(&line);
        let mut restored = Drawing::new();
        read::convert_entity(&mut restored, &entity);

        assert_eq!(restored.lines[0], line);
    }
}
