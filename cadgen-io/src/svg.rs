//! 浏览器预览用的 SVG 输出：自动适配视口、深色背景、按图层着色。

use std::f64::consts::PI;

use cadgen_core::layer::StandardLayer;
use cadgen_core::sink::{Drawing, Entity};
use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Line, Path, Polygon, Polyline, Text};

use crate::{DrawingEncoder, IoError};

pub const DEFAULT_PREVIEW_WIDTH: u32 = 800;
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 600;
const BACKGROUND: &str = "#0f172a";
/// 视口四周留白占较长边的比例。
const PADDING_RATIO: f64 = 0.1;
const MIN_FONT_SIZE: f64 = 3.0;
const PLACEHOLDER_TEXT: &str = "No preview";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgPreview {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgPreview {
    fn default() -> Self {
        Self {
            width: DEFAULT_PREVIEW_WIDTH,
            height: DEFAULT_PREVIEW_HEIGHT,
        }
    }
}

impl SvgPreview {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 构建预览文档。空图纸得到一张只有占位文字的小图。
    pub fn document(&self, drawing: &Drawing) -> Document {
        let Some(bounds) = drawing.bounds() else {
            return placeholder();
        };

        let (min, max) = (bounds.min(), bounds.max());
        let data_w = non_zero(bounds.width());
        let data_h = non_zero(bounds.height());
        let padding = data_w.max(data_h) * PADDING_RATIO;

        // DXF 的 y 轴向上，SVG 向下
        let mut flipped = Group::new().set(
            "transform",
            format!("translate(0, {}) scale(1, -1)", round(min.y() + max.y())),
        );
        for (layer, entities) in drawing.entities_by_layer() {
            if entities.is_empty() {
                continue;
            }
            let group = entities.into_iter().fold(layer_group(layer), |group, entity| {
                group.add(entity_node(entity))
            });
            flipped = flipped.add(group);
        }

        Document::new()
            .set(
                "viewBox",
                (
                    round(min.x() - padding),
                    round(min.y() - padding),
                    round(data_w + padding * 2.0),
                    round(data_h + padding * 2.0),
                ),
            )
            .set("width", self.width)
            .set("height", self.height)
            .set("style", format!("background:{BACKGROUND};border-radius:12px;"))
            .add(flipped)
    }
}

impl DrawingEncoder for SvgPreview {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn encode(&self, drawing: &Drawing) -> Result<String, IoError> {
        Ok(self.document(drawing).to_string())
    }
}

fn placeholder() -> Document {
    Document::new().set("viewBox", (0, 0, 100, 100)).add(
        Text::new(PLACEHOLDER_TEXT)
            .set("x", 10)
            .set("y", 50)
            .set("fill", "#999"),
    )
}

#[inline]
fn non_zero(extent: f64) -> f64 {
    if extent > 0.0 { extent } else { 1.0 }
}

/// 保留一位小数。
#[inline]
fn round(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[inline]
fn stroke_width(layer: StandardLayer) -> f64 {
    if layer == StandardLayer::Dimensions {
        0.5
    } else {
        1.0
    }
}

fn layer_group(layer: StandardLayer) -> Group {
    Group::new()
        .set("id", layer.name())
        .set("fill", "none")
        .set("stroke", layer.preview_color())
        .set("stroke-width", stroke_width(layer))
}

fn entity_node(entity: &Entity) -> Box<dyn svg::Node> {
    match entity {
        Entity::Line(line) => Box::new(
            Line::new()
                .set("x1", round(line.start.x()))
                .set("y1", round(line.start.y()))
                .set("x2", round(line.end.x()))
                .set("y2", round(line.end.y())),
        ),
        Entity::Circle(circle) => Box::new(
            Circle::new()
                .set("cx", round(circle.center.x()))
                .set("cy", round(circle.center.y()))
                .set("r", round(circle.radius)),
        ),
        Entity::Arc(arc) => {
            let start = arc.start_point();
            let end = arc.end_point();
            let large = if arc.sweep() > PI { 1.0 } else { 0.0 };
            let data = Data::new()
                .move_to((round(start.x()), round(start.y())))
                .elliptical_arc_to((
                    round(arc.radius),
                    round(arc.radius),
                    0.0,
                    large,
                    1.0,
                    round(end.x()),
                    round(end.y()),
                ));
            Box::new(Path::new().set("d", data))
        }
        Entity::Polyline(polyline) => {
            let points = polyline
                .vertices
                .iter()
                .map(|vertex| format!("{},{}", round(vertex.x()), round(vertex.y())))
                .collect::<Vec<_>>()
                .join(" ");
            if polyline.is_closed {
                Box::new(Polygon::new().set("points", points))
            } else {
                Box::new(Polyline::new().set("points", points))
            }
        }
        Entity::Text(text) => {
            let font_size = round((text.height * 0.8).max(MIN_FONT_SIZE));
            // 文字需要再翻转一次才能正常阅读
            Box::new(
                Group::new()
                    .set(
                        "transform",
                        format!(
                            "translate({},{}) scale(1,-1)",
                            round(text.insert.x()),
                            round(text.insert.y())
                        ),
                    )
                    .add(
                        Text::new(text.content.as_str())
                            .set("font-size", font_size)
                            .set("font-family", "monospace")
                            .set("fill", entity.layer().preview_color())
                            .set("stroke", "none"),
                    ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadgen_core::geometry::Point2;
    use cadgen_core::sink::DrawingSink;

    #[test]
    fn empty_drawing_yields_placeholder() {
        let svg = SvgPreview::default().encode(&Drawing::new()).unwrap();
        assert!(svg.contains(PLACEHOLDER_TEXT));
        assert!(svg.contains(r#"viewBox="0 0 100 100""#));
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn viewbox_is_padded_and_layers_are_coloured() {
        let mut drawing = Drawing::new();
        drawing.add_line(
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 50.0),
            StandardLayer::FrontView,
        );
        drawing.add_line(
            Point2::new(0.0, -10.0),
            Point2::new(100.0, -10.0),
            StandardLayer::Dimensions,
        );
        let svg = SvgPreview::new(400, 300).encode(&drawing).unwrap();
        assert!(svg.contains(r#"viewBox="-10 -20 120 80""#));
        assert!(svg.contains(r#"width="400""#));
        assert!(svg.contains(r#"height="300""#));
        assert!(svg.contains("translate(0, 40) scale(1, -1)"));
        assert!(svg.contains(r##"stroke="#93c5fd""##));
        assert!(svg.contains(r##"stroke="#f87171""##));
        assert!(svg.contains(r#"stroke-width="0.5""#));
        assert!(svg.contains(r#"id="DIMENSIONS""#));
        assert_eq!(svg.matches("<line").count(), 2);
    }

    #[test]
    fn text_is_escaped_and_closed_polylines_become_polygons() {
        let mut drawing = Drawing::new();
        drawing.add_text(
            Point2::new(0.0, 0.0),
            "A<B & C",
            5.0,
            StandardLayer::Annotations,
        );
        drawing.add_polyline(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
            ],
            true,
            StandardLayer::TopView,
        );
        let svg = SvgPreview::default().encode(&drawing).unwrap();
        assert!(!svg.contains("A<B"));
        assert!(svg.contains("A&lt;B"));
        assert!(svg.contains(r#"points="0,0 10,0 10,10""#));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains(r#"font-size="4""#));
    }

    #[test]
    fn arcs_become_counter_clockwise_paths() {
        let mut drawing = Drawing::new();
        drawing.add_arc(
            Point2::new(0.0, 0.0),
            10.0,
            0.0,
            PI * 1.5,
            StandardLayer::TopView,
        );
        let svg = SvgPreview::default().encode(&drawing).unwrap();
        assert!(svg.contains("<path"));
        assert!(svg.contains("M10,0"));
        assert!(svg.contains("A10,10,0,1,1,0,-10"));
    }
}
