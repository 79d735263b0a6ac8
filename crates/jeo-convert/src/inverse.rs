//! Inverse conversion: indexed model back to an absolute drawing.

use std::f64::consts::PI;

use jeo_drawing::{Arc, Drawing, Line, Metadata, Polyline};
use jeo_format as format;
use jeo_format::Model;
use jeo_math::Point3;

use crate::palette;
use crate::ConvertError;

/// Layer reconstructed entities land on; the indexed model keeps no layer
/// table, so everything goes to the exchange format's default layer.
const DEFAULT_LAYER: &str = "0";

/// Convert an indexed model back into an absolute-form drawing.
///
/// Arc angles are reconstructed from the three referenced points; the
/// stored direction flag is not consulted, so an arc whose original angle
/// pair was decreasing comes back with the increasing sweep between the
/// same endpoints. Entity colors without an exact palette equivalent are
/// omitted rather than rejected.
pub fn model_to_drawing(model: &Model) -> Result<Drawing, ConvertError> {
    let mut drawing = Drawing::new();
    for line in &model.lines {
        drawing.lines.push(convert_line(model, line)?);
    }
    for arc in &model.arcs {
        drawing.arcs.push(convert_arc(model, arc)?);
    }
    for polyline in &model.polylines {
        drawing.polylines.push(convert_polyline(model, polyline)?);
    }
    Ok(drawing)
}

fn convert_line(model: &Model, line: &format::Line) -> Result<Line, ConvertError> {
    Ok(Line {
        p1: resolve_point(model, line.first_point_index())?,
        p2: resolve_point(model, line.last_point_index())?,
        meta: resolve_metadata(model, line.color, line.tag)?,
    })
}

fn convert_arc(model: &Model, arc: &format::Arc) -> Result<Arc, ConvertError> {
    let center = resolve_point(model, arc.center_index())?;
    let first = resolve_point(model, arc.first_point_index())?;
    let last = resolve_point(model, arc.last_point_index())?;

    // Radius and angles live in the XY plane; any z offset between the
    // endpoints and the center does not contribute.
    let radius = (planar_distance(center, first) + planar_distance(center, last)) / 2.0;
    let theta1 = (first.y - center.y).atan2(first.x - center.x);
    let mut theta2 = (last.y - center.y).atan2(last.x - center.x);
    if theta1 >= theta2 {
        theta2 += 2.0 * PI;
    }

    Ok(Arc {
        center,
        radius,
        theta1,
        theta2,
        meta: resolve_metadata(model, arc.color, arc.tag)?,
    })
}

fn convert_polyline(model: &Model, polyline: &format::Polyline) -> Result<Polyline, ConvertError> {
    if polyline.points.len() < 2 {
        return Err(ConvertError::UnsupportedPolyline);
    }

    let coords = polyline
        .points
        .iter()
        .map(|&index| resolve_point(model, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Polyline {
        coords,
        bulges: polyline.bulges.clone(),
        closed: polyline.points.first() == polyline.points.last(),
        meta: resolve_metadata(model, polyline.color, polyline.tag)?,
    })
}

fn resolve_point(model: &Model, index: u64) -> Result<Point3, ConvertError> {
    model
        .points
        .get(index as usize)
        .map(|point| Point3::new(point.x, point.y, point.z))
        .ok_or(ConvertError::IndexOutOfRange {
            pool: "points",
            index,
            len: model.points.len(),
        })
}

fn resolve_metadata(
    model: &Model,
    color: Option<u64>,
    tag: Option<u64>,
) -> Result<Metadata, ConvertError> {
    let color = match color {
        Some(index) => {
            let rgb = model
                .colors
                .get(index as usize)
                .copied()
                .ok_or(ConvertError::IndexOutOfRange {
                    pool: "colors",
                    index,
                    len: model.colors.len(),
                })?;
            // RGB values without an exact palette equivalent lose their
            // color here; that round-trip loss is accepted.
            palette::index_for_rgb(rgb).map(i64::from)
        }
        None => None,
    };

    let tag = match tag {
        Some(index) => Some(model.tags.get(index as usize).cloned().ok_or(
            ConvertError::IndexOutOfRange {
                pool: "tags",
                index,
                len: model.tags.len(),
            },
        )?),
        None => None,
    };

    Ok(Metadata {
        layer: DEFAULT_LAYER.to_string(),
        color,
        tag,
    })
}

fn planar_distance(a: Point3, b: Point3) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing_to_model;
    use jeo_format::{json, Color, Point};

    /// Build a model holding one arc whose endpoints sit on a circle of
    /// radius `radius` around `center`, at the given angles.
    fn arc_model(center: Point, radius: f64, angle1: f64, angle2: f64) -> Model {
        let on_circle = |angle: f64| {
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
                center.z,
            )
        };
        Model {
            points: vec![center, on_circle(angle1), on_circle(angle2)],
            arcs: vec![format::Arc {
                points: [0, 1, 2],
                direct: true,
                color: None,
                tag: None,
            }],
            ..Model::new()
        }
    }

    /// Encode to JSON and decode again before converting, so the whole
    /// read path is exercised, not just the converter.
    fn through_codec(model: &Model) -> Model {
        let text = json::to_json(model).unwrap();
        json::from_json(&text).unwrap()
    }

    #[test]
    fn test_arc_angles_crossing_the_seam() {
        // Endpoints at ~180.0 and ~-155.0 degrees: the raw atan2 pair is
        // decreasing, so the end angle gains a revolution.
        let model = through_codec(&arc_model(
            Point::new(0.0, 0.0, 0.0),
            2.0,
            3.1415911628956970,
            -2.7052598812358588,
        ));
        let drawing = model_to_drawing(&model).unwrap();

        let arc = &drawing.arcs[0];
        assert!((arc.theta1 - 3.1415911628956970).abs() < 1e-12);
        assert!((arc.theta2 - 3.5779254259437274).abs() < 1e-12);
        assert!((arc.radius - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_angles_already_increasing() {
        let model = through_codec(&arc_model(
            Point::new(-1.0, 4.0, 0.0),
            3.5,
            1.0808390005411683,
            2.0607536530486250,
        ));
        let drawing = model_to_drawing(&model).unwrap();

        let arc = &drawing.arcs[0];
        assert!((arc.theta1 - 1.0808390005411683).abs() < 1e-12);
        assert!((arc.theta2 - 2.0607536530486250).abs() < 1e-12);
        assert!((arc.radius - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_arc_radius_averages_both_distances() {
        // Endpoints at slightly different distances from the center, as
        // tolerance snapping in the forward pass can produce.
        let model = Model {
            points: vec![
                Point::new(0.0, 0.0, 0.0),
                Point::new(2.0, 0.0, 0.0),
                Point::new(0.0, 2.0004, 0.0),
            ],
            arcs: vec![format::Arc {
                points: [0, 1, 2],
                direct: true,
                color: None,
                tag: None,
            }],
            ..Model::new()
        };
        let drawing = model_to_drawing(&model).unwrap();
        assert!((drawing.arcs[0].radius - 2.0002).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_reproduces_direct_arcs() {
        // Start angles stay inside atan2's (-pi, pi] range; outside it the
        // reconstruction is the same sweep shifted by a revolution.
        let cases = [(0.3, 1.7), (std::f64::consts::PI, 3.58), (-0.5, 0.9)];
        for &(theta1, theta2) in &cases {
            let mut drawing = Drawing::new();
            drawing.arcs.push(Arc {
                center: Point3::new(2.0, -1.0, 0.0),
                radius: 4.0,
                theta1,
                theta2,
                meta: Metadata::default(),
            });

            let model = drawing_to_model(&drawing).unwrap();
            let restored = model_to_drawing(&model).unwrap();
            let arc = &restored.arcs[0];
            assert!(
                (arc.theta1 - theta1).abs() < 1e-9,
                "theta1 drifted for ({theta1}, {theta2})"
            );
            assert!(
                (arc.theta2 - theta2).abs() < 1e-9,
                "theta2 drifted for ({theta1}, {theta2})"
            );
            assert!((arc.radius - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_closed_polyline_detection() {
        let model = Model {
            points: vec![
                Point::new(0.0, 0.0, 0.0),
                Point::new(4.0, 0.0, 0.0),
                Point::new(4.0, 3.0, 0.0),
            ],
            polylines: vec![format::Polyline {
                points: vec![0, 1, 2, 0],
                bulges: Some(vec![0.5, 0.0, -0.25, 0.5]),
                closed: true,
                color: None,
                tag: None,
            }],
            ..Model::new()
        };
        let drawing = model_to_drawing(&model).unwrap();

        let polyline = &drawing.polylines[0];
        assert!(polyline.closed);
        // The duplicated closing vertex stays in the coordinate list.
        assert_eq!(polyline.coords.len(), 4);
        assert_eq!(polyline.coords[0], polyline.coords[3]);
        assert_eq!(polyline.bulges, Some(vec![0.5, 0.0, -0.25, 0.5]));
    }

    #[test]
    fn test_rejects_short_polyline() {
        let model = Model {
            points: vec![Point::new(0.0, 0.0, 0.0)],
            polylines: vec![format::Polyline {
                points: vec![0],
                bulges: None,
                closed: false,
                color: None,
                tag: None,
            }],
            ..Model::new()
        };
        assert!(matches!(
            model_to_drawing(&model),
            Err(ConvertError::UnsupportedPolyline)
        ));
    }

    #[test]
    fn test_color_and_tag_resolution() {
        let model = Model {
            colors: vec![Color::from([255, 0, 0]), Color::from([1, 2, 3])],
            tags: vec!["girder".to_string()],
            points: vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)],
            lines: vec![
                format::Line {
                    points: [0, 1],
                    color: Some(0),
                    tag: Some(0),
                },
                // RGB with no palette equivalent: the color is dropped.
                format::Line {
                    points: [0, 1],
                    color: Some(1),
                    tag: None,
                },
            ],
            ..Model::new()
        };
        let drawing = model_to_drawing(&model).unwrap();

        assert_eq!(drawing.lines[0].meta.color, Some(1));
        assert_eq!(drawing.lines[0].meta.tag.as_deref(), Some("girder"));
        assert_eq!(drawing.lines[1].meta.color, None);
    }

    #[test]
    fn test_dangling_point_index() {
        let model = Model {
            points: vec![Point::new(0.0, 0.0, 0.0)],
            lines: vec![format::Line {
                points: [0, 9],
                color: None,
                tag: None,
            }],
            ..Model::new()
        };
        assert!(matches!(
            model_to_drawing(&model),
            Err(ConvertError::IndexOutOfRange {
                pool: "points",
                index: 9,
                ..
            })
        ));
    }
}
