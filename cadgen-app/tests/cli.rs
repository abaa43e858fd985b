use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cadgen"));
    command.env_remove("CADGEN_CONFIG");
    command
}

fn files_in(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

#[test]
fn chair_from_flags_writes_all_artifacts() {
    let out = TempDir::new().unwrap();
    cli()
        .args(["--shape", "kursi", "--width", "40", "--length", "40", "--height", "45"])
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("chair.dxf"))
        .stdout(predicate::str::contains("chair.svg"));

    assert_eq!(
        files_in(out.path()),
        vec!["chair.dxf", "chair.json", "chair.svg"]
    );
    let dxf = fs::read_to_string(out.path().join("chair.dxf")).unwrap();
    assert_eq!(dxf.matches("\nCIRCLE\n").count(), 4);

    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("chair.json")).unwrap())
            .unwrap();
    assert_eq!(record["shape"], "chair");
    assert_eq!(record["requested_type"], "kursi");
}

#[test]
fn room_from_parameter_file_with_stl_request() {
    let dir = TempDir::new().unwrap();
    let params = dir.path().join("kamar.json");
    fs::write(
        &params,
        r#"{
            "shape_type": "kamar",
            "unit": "m",
            "width": 4,
            "length": 5,
            "doors": [{"wall": "west", "width": 0.9}],
            "windows": [{"wall": "north", "width": 1.2}]
        }"#,
    )
    .unwrap();
    let out = dir.path().join("out");

    cli()
        .arg("--params")
        .arg(&params)
        .arg("--output-dir")
        .arg(&out)
        .args(["--name", "kamar", "--stl", "--no-record"])
        .assert()
        .success();

    assert_eq!(files_in(&out), vec!["kamar.dxf", "kamar.svg"]);
    let dxf = fs::read_to_string(out.join("kamar.dxf")).unwrap();
    assert_eq!(dxf.matches("\nARC\n").count(), 1);
}

#[test]
fn cylinder_stl_is_written_in_meters() {
    let out = TempDir::new().unwrap();
    cli()
        .args(["--shape", "tiang", "--radius", "15", "--height", "250", "--stl", "--no-svg"])
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success();

    assert_eq!(
        files_in(out.path()),
        vec!["cylinder.dxf", "cylinder.json", "cylinder.stl"]
    );
    let mut file = fs::File::open(out.path().join("cylinder.stl")).unwrap();
    let mesh = stl_io::read_stl(&mut file).unwrap();
    assert_eq!(mesh.faces.len(), 32 * 4);
    assert!(mesh.vertices.iter().any(|vertex| {
        (vertex[0] - 0.15).abs() < 1e-6 && vertex[1].abs() < 1e-6 && (vertex[2] - 2.5).abs() < 1e-6
    }));
}

#[test]
fn unknown_shape_falls_back_to_box() {
    let out = TempDir::new().unwrap();
    cli()
        .args(["--shape", "unknownthing", "--width", "100", "--length", "50", "--height", "30"])
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("box.dxf"));
}

#[test]
fn invalid_width_fails_without_artifacts() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    cli()
        .args(["--shape", "box", "--width=-5", "--length", "50", "--height", "30"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("width"));

    assert!(files_in(&out).is_empty());
}

#[test]
fn bad_wall_name_is_reported() {
    let out = TempDir::new().unwrap();
    cli()
        .args(["--shape", "room", "--door", "ceiling:80"])
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ceiling"));
    assert!(files_in(out.path()).is_empty());
}

#[test]
fn config_file_controls_outputs() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("drawings");
    let config = dir.path().join("cadgen.toml");
    fs::write(
        &config,
        format!(
            "[output]\ndirectory = {:?}\nsvg_preview = false\nrecord = false\n",
            out.display().to_string()
        ),
    )
    .unwrap();

    cli()
        .arg("--config")
        .arg(&config)
        .args(["--shape", "meja"])
        .assert()
        .success();
    assert_eq!(files_in(&out), vec!["box.dxf"]);
}

#[test]
fn list_shapes_prints_aliases() {
    cli()
        .arg("--list-shapes")
        .assert()
        .success()
        .stdout(predicate::str::contains("chair: bangku, kursi, seat, stool"))
        .stdout(predicate::str::contains("room: bedroom, kamar, ruang, ruangan"));
}
