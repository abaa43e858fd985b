//! DXF R12 文本输出。
//!
//! 坐标单位为厘米（`$INSUNITS` = 5），圆弧角度在此处由弧度换算为度。

use std::fmt::{Display, Write};

use cadgen_core::geometry::Point2;
use cadgen_core::layer::StandardLayer;
use cadgen_core::sink::{Drawing, Entity, normalize_angle};
use tracing::debug;

use crate::{DrawingEncoder, IoError};

/// `$INSUNITS` 中厘米的编码。
pub const INSUNITS_CENTIMETERS: i32 = 5;

#[derive(Debug, Default, Clone, Copy)]
pub struct DxfWriter;

impl DxfWriter {
    pub fn new() -> Self {
        Self
    }
}

impl DrawingEncoder for DxfWriter {
    fn extension(&self) -> &'static str {
        "dxf"
    }

    fn encode(&self, drawing: &Drawing) -> Result<String, IoError> {
        let mut out = GroupWriter::default();
        write_header(&mut out, drawing)?;
        write_tables(&mut out)?;

        out.pair(0, "SECTION")?;
        out.pair(2, "ENTITIES")?;
        for (_, entity) in drawing.entities() {
            write_entity(&mut out, entity)?;
        }
        out.pair(0, "ENDSEC")?;
        out.pair(0, "EOF")?;

        debug!(entities = drawing.len(), bytes = out.text.len(), "DXF 编码完成");
        Ok(out.text)
    }
}

#[derive(Default)]
struct GroupWriter {
    text: String,
}

impl GroupWriter {
    fn pair(&mut self, code: i32, value: impl Display) -> Result<(), IoError> {
        writeln!(self.text, "{code:>3}")?;
        writeln!(self.text, "{value}")?;
        Ok(())
    }

    fn real(&mut self, code: i32, value: f64) -> Result<(), IoError> {
        // 避免写出 "-0"
        let value = if value == 0.0 { 0.0 } else { value };
        self.pair(code, format_args!("{value:.6}"))
    }

    fn point(&mut self, base_code: i32, point: Point2) -> Result<(), IoError> {
        self.real(base_code, point.x())?;
        self.real(base_code + 10, point.y())?;
        self.real(base_code + 20, 0.0)
    }
}

fn write_header(out: &mut GroupWriter, drawing: &Drawing) -> Result<(), IoError> {
    out.pair(0, "SECTION")?;
    out.pair(2, "HEADER")?;
    out.pair(9, "$ACADVER")?;
    out.pair(1, "AC1009")?;
    out.pair(9, "$INSUNITS")?;
    out.pair(70, INSUNITS_CENTIMETERS)?;
    if let Some(bounds) = drawing.bounds() {
        out.pair(9, "$EXTMIN")?;
        out.point(10, bounds.min())?;
        out.pair(9, "$EXTMAX")?;
        out.point(10, bounds.max())?;
    }
    out.pair(0, "ENDSEC")
}

fn write_tables(out: &mut GroupWriter) -> Result<(), IoError> {
    out.pair(0, "SECTION")?;
    out.pair(2, "TABLES")?;

    out.pair(0, "TABLE")?;
    out.pair(2, "LTYPE")?;
    out.pair(70, 2)?;
    out.pair(0, "LTYPE")?;
    out.pair(2, "CONTINUOUS")?;
    out.pair(70, 0)?;
    out.pair(3, "Solid line")?;
    out.pair(72, 65)?;
    out.pair(73, 0)?;
    out.real(40, 0.0)?;
    out.pair(0, "LTYPE")?;
    out.pair(2, "CENTER")?;
    out.pair(70, 0)?;
    out.pair(3, "Center ____ _ ____ _")?;
    out.pair(72, 65)?;
    out.pair(73, 4)?;
    out.real(40, 2.0)?;
    for element in [1.25, -0.25, 0.25, -0.25] {
        out.real(49, element)?;
    }
    out.pair(0, "ENDTAB")?;

    out.pair(0, "TABLE")?;
    out.pair(2, "LAYER")?;
    out.pair(70, StandardLayer::ALL.len())?;
    for layer in StandardLayer::ALL {
        out.pair(0, "LAYER")?;
        out.pair(2, layer.name())?;
        out.pair(70, 0)?;
        out.pair(62, layer.aci_color())?;
        out.pair(6, layer.linetype())?;
    }
    out.pair(0, "ENDTAB")?;

    out.pair(0, "ENDSEC")
}

fn write_entity(out: &mut GroupWriter, entity: &Entity) -> Result<(), IoError> {
    let layer = entity.layer().name();
    match entity {
        Entity::Line(line) => {
            out.pair(0, "LINE")?;
            out.pair(8, layer)?;
            out.point(10, line.start)?;
            out.point(11, line.end)?;
        }
        Entity::Circle(circle) => {
            out.pair(0, "CIRCLE")?;
            out.pair(8, layer)?;
            out.point(10, circle.center)?;
            out.real(40, circle.radius)?;
        }
        Entity::Arc(arc) => {
            out.pair(0, "ARC")?;
            out.pair(8, layer)?;
            out.point(10, arc.center)?;
            out.real(40, arc.radius)?;
            out.real(50, normalize_angle(arc.start_angle).to_degrees())?;
            out.real(51, normalize_angle(arc.end_angle).to_degrees())?;
        }
        Entity::Polyline(polyline) => {
            out.pair(0, "POLYLINE")?;
            out.pair(8, layer)?;
            out.pair(66, 1)?;
            out.point(10, Point2::new(0.0, 0.0))?;
            out.pair(70, if polyline.is_closed { 1 } else { 0 })?;
            for vertex in &polyline.vertices {
                out.pair(0, "VERTEX")?;
                out.pair(8, layer)?;
                out.point(10, *vertex)?;
            }
            out.pair(0, "SEQEND")?;
            out.pair(8, layer)?;
        }
        Entity::Text(text) => {
            out.pair(0, "TEXT")?;
            out.pair(8, layer)?;
            out.point(10, text.insert)?;
            out.real(40, text.height)?;
            out.pair(1, text.content.replace(['\r', '\n'], " "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadgen_core::sink::DrawingSink;
    use std::f64::consts::FRAC_PI_2;

    fn group_value(text: &str, code: &str) -> Option<f64> {
        let lines: Vec<&str> = text.lines().collect();
        lines
            .chunks(2)
            .find(|pair| pair[0].trim() == code)
            .and_then(|pair| pair[1].parse().ok())
    }

    #[test]
    fn header_declares_centimeters_and_all_layers() {
        let text = DxfWriter.encode(&Drawing::new()).unwrap();
        assert!(text.contains("$INSUNITS\n 70\n5\n"));
        assert_eq!(text.matches("  0\nLAYER\n").count(), 6);
        assert!(text.contains("  2\nDIMENSIONS\n 70\n0\n 62\n1\n"));
        assert!(text.contains("  2\nCENTER_LINES\n 70\n0\n 62\n2\n  6\nCENTER\n"));
        assert!(!text.contains("$EXTMIN"));
        assert!(text.trim_end().ends_with("EOF"));
    }

    #[test]
    fn arcs_are_written_in_degrees() {
        let mut drawing = Drawing::new();
        drawing.add_arc(
            Point2::new(0.0, 0.0),
            90.0,
            -FRAC_PI_2,
            0.0,
            StandardLayer::TopView,
        );
        let text = DxfWriter.encode(&drawing).unwrap();
        let start = group_value(&text, "50").unwrap();
        let end = group_value(&text, "51").unwrap();
        assert!((start - 270.0).abs() < 1e-6);
        assert!(end.abs() < 1e-6);
    }

    #[test]
    fn polylines_carry_vertices_and_text_stays_on_one_line() {
        let mut drawing = Drawing::new();
        drawing.add_polyline(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
            ],
            true,
            StandardLayer::FrontView,
        );
        drawing.add_text(
            Point2::new(0.0, 2.0),
            "FRONT\nVIEW",
            5.0,
            StandardLayer::Annotations,
        );
        let text = DxfWriter.encode(&drawing).unwrap();
        assert_eq!(text.matches("\nPOLYLINE\n").count(), 1);
        assert_eq!(text.matches("\nVERTEX\n").count(), 3);
        assert_eq!(text.matches("\nSEQEND\n").count(), 1);
        assert!(text.contains("\nFRONT VIEW\n"));
        assert!(text.contains("  8\nANNOTATIONS\n"));
    }
}
