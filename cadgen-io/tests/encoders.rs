mod common;

use std::fs;

use cadgen_core::layer::StandardLayer;
use cadgen_engine::extrude::extrude;
use cadgen_engine::generate::ViewLayout;
use cadgen_engine::{RawParameters, ShapeKind, ShapeParameters, generate};
use cadgen_io::{
    ArtifactSet, DrawingEncoder, DxfWriter, SolidEncoder, StlWriter, SvgPreview, load_parameters,
};
use common::{DxfSummary, summarize};

fn sheet_for(params: &ShapeParameters) -> cadgen_core::sink::Drawing {
    generate(params)
        .expect("generate views")
        .compose(&ViewLayout::default())
}

fn dxf_summary(params: &ShapeParameters) -> DxfSummary {
    let text = DxfWriter.encode(&sheet_for(params)).expect("encode dxf");
    summarize(&text)
}

#[test]
fn dxf_entity_counts_match_the_drawing() {
    for kind in ShapeKind::ALL {
        let params = ShapeParameters::defaults_for(kind);
        let sheet = sheet_for(&params);
        let summary = dxf_summary(&params);

        let mut expected = std::collections::BTreeMap::new();
        for (_, entity) in sheet.entities() {
            *expected
                .entry((
                    entity.kind_name().to_ascii_uppercase(),
                    entity.layer().name().to_string(),
                ))
                .or_insert(0usize) += 1;
        }
        assert_eq!(summary.entities, expected, "{kind}");
        assert_eq!(summary.insunits, Some(5));
    }
}

#[test]
fn chair_dxf_contains_four_leg_circles() {
    let summary = dxf_summary(&ShapeParameters::defaults_for(ShapeKind::Chair));
    assert_eq!(summary.count("CIRCLE", StandardLayer::TopView), 4);
    assert_eq!(summary.total("POLYLINE"), 1 + 2 + 2);
    assert_eq!(summary.count("TEXT", StandardLayer::Annotations), 3);
}

#[test]
fn room_dxf_has_door_arc_and_layer_colours() {
    let raw = RawParameters {
        doors: Some(vec![Default::default()]),
        ..RawParameters::for_shape("ruangan")
    };
    let summary = dxf_summary(&raw.normalize().expect("normalize room"));
    assert_eq!(summary.count("ARC", StandardLayer::TopView), 1);
    for layer in StandardLayer::ALL {
        assert_eq!(summary.layers[layer.name()], i32::from(layer.aci_color()));
    }
}

#[test]
fn svg_preview_uses_every_view_colour() {
    let svg = SvgPreview::default()
        .encode(&sheet_for(&ShapeParameters::defaults_for(ShapeKind::Cylinder)))
        .expect("encode svg");
    assert!(svg.contains("<svg"));
    for layer in StandardLayer::ALL {
        assert!(svg.contains(layer.preview_color()), "{layer}");
    }
    assert!(svg.contains("TOP VIEW"));
}

#[test]
fn stl_follows_extrusion() {
    let chair = ShapeParameters::defaults_for(ShapeKind::Chair);
    let model = extrude(&chair).expect("extrude chair");
    let bytes = StlWriter::default().encode(&model).expect("encode stl");
    let mesh = stl_io::read_stl(&mut std::io::Cursor::new(bytes)).expect("read stl back");
    assert_eq!(mesh.faces.len(), 6 * 12);
    // 靠背顶端 65 cm
    let top = mesh
        .vertices
        .iter()
        .map(|vertex| vertex[2])
        .fold(f32::MIN, f32::max);
    assert!((top - 0.65).abs() < 1e-6);
}

#[test]
fn parameter_file_to_artifacts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let params_path = dir.path().join("meja.json");
    fs::write(
        &params_path,
        r#"{"shape_type": "meja", "unit": "m", "width": 1.6, "length": 0.8, "height": 0.75}"#,
    )
    .expect("write params");

    let params = load_parameters(&params_path)
        .expect("load params")
        .normalize()
        .expect("normalize");
    let sheet = sheet_for(&params);

    let mut artifacts = ArtifactSet::new(dir.path().join("out"), "meja");
    artifacts
        .add("dxf", DxfWriter.encode(&sheet).expect("dxf"))
        .add("svg", SvgPreview::default().encode(&sheet).expect("svg"));
    let written = artifacts.commit().expect("commit");
    assert_eq!(written.len(), 2);

    let dxf = fs::read_to_string(&written[0]).expect("read dxf");
    let summary = summarize(&dxf);
    assert_eq!(summary.count("POLYLINE", StandardLayer::TopView), 1);
    // 宽度尺寸文字：1.6 m 换算为 160 cm
    assert!(dxf.contains("\n160\n"));
}
