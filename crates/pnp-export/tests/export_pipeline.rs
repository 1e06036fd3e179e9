use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use pnp_board::{B_CU, Board, Component, Point};
use pnp_export::{ExportError, ExportOptions, ManifestFormat, Notify, export};

#[derive(Default)]
struct RecordingNotify {
    errors: Vec<String>,
    infos: Vec<String>,
}

impl Notify for RecordingNotify {
    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn info(&mut self, text: &str) {
        self.infos.push(text.to_string());
    }
}

fn component(reference: &str, x: i64, y: i64, layer: u32) -> Component {
    Component {
        reference: reference.to_string(),
        value: "10kOhm".to_string(),
        package: "Resistor_SMD:R_0402".to_string(),
        fields: BTreeMap::new(),
        position: Point::new(x, y),
        rotation: 90.0,
        layer,
    }
}

fn saved_board(source_path: PathBuf) -> Board {
    Board {
        source_path: Some(source_path),
        aux_origin: Point::default(),
        components: vec![
            component("R1", 1_000_000, 2_000_000, 0),
            component("R2", 3_000_000, 4_000_000, B_CU),
        ],
    }
}

#[test]
fn csv_export_writes_manifest_next_to_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let board = saved_board(dir.path().join("demo.kicad_pcb"));
    let mut notify = RecordingNotify::default();

    let report = export(&board, &ExportOptions::origin_relative_csv(), &mut notify).unwrap();

    assert_eq!(report.output_path, dir.path().join("demo_custom.csv"));
    assert_eq!(report.record_count, 2);

    let text = fs::read_to_string(&report.output_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("# Created on "));
    assert_eq!(
        lines[1],
        "# Unit = mm, Angle = deg. Coordinates relative to board origin. Y inverted."
    );
    assert_eq!(lines[2], "Ref,Val,Package,X,Y,Rot,Side,Height");
    assert_eq!(
        lines[3],
        "R1,10kOhm,Resistor_SMD:R_0402,1.0000,-2.0000,90.000,top,"
    );
    assert_eq!(
        lines[4],
        "R2,10kOhm,Resistor_SMD:R_0402,3.0000,-4.0000,90.000,bottom,"
    );
    assert_eq!(lines.len(), 5);

    assert_eq!(notify.infos.len(), 1);
    assert!(notify.errors.is_empty());
    assert!(notify.infos[0].contains("demo_custom.csv"));
}

#[test]
fn pos_export_uses_the_pos_extension_and_aligned_rows() {
    let dir = tempfile::tempdir().unwrap();
    let board = saved_board(dir.path().join("demo.kicad_pcb"));
    let mut notify = RecordingNotify::default();

    let options = ExportOptions {
        format: ManifestFormat::Pos,
        ..ExportOptions::origin_relative_csv()
    };
    let report = export(&board, &options, &mut notify).unwrap();

    assert_eq!(report.output_path, dir.path().join("demo_custom.pos"));

    let text = fs::read_to_string(&report.output_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("### Created on "));
    assert!(lines[1].starts_with("## Unit = mm, Angle = deg."));
    assert!(lines[2].contains("Ref"));
    assert!(lines[2].contains("PosX"));
    assert!(lines[3].contains("  F"));
    assert!(lines[4].contains("  B"));
    assert_eq!(lines.len(), 5);
}

#[test]
fn aux_origin_translates_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let mut board = saved_board(dir.path().join("demo.kicad_pcb"));
    board.aux_origin = Point::new(1_000_000, 1_000_000);
    let mut notify = RecordingNotify::default();

    let report = export(&board, &ExportOptions::origin_relative_csv(), &mut notify).unwrap();
    let text = fs::read_to_string(&report.output_path).unwrap();
    assert!(text.contains("R1,10kOhm,Resistor_SMD:R_0402,0.0000,-1.0000,90.000,top,"));
}

#[test]
fn empty_component_set_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let board = Board {
        source_path: Some(dir.path().join("demo.kicad_pcb")),
        aux_origin: Point::default(),
        components: Vec::new(),
    };
    let mut notify = RecordingNotify::default();

    let err = export(&board, &ExportOptions::origin_relative_csv(), &mut notify).unwrap_err();
    assert!(matches!(err, ExportError::EmptyComponentSet));
    assert!(!dir.path().join("demo_custom.csv").exists());
    assert_eq!(notify.errors.len(), 1);
    assert!(notify.infos.is_empty());
}

#[test]
fn unsaved_board_is_rejected_before_writing() {
    let board = Board {
        source_path: None,
        aux_origin: Point::default(),
        components: vec![component("R1", 0, 0, 0)],
    };
    let mut notify = RecordingNotify::default();

    let err = export(&board, &ExportOptions::origin_relative_csv(), &mut notify).unwrap_err();
    assert!(matches!(err, ExportError::NoSourceIdentity));
    assert_eq!(notify.errors.len(), 1);
}

#[test]
fn write_failure_leaves_nothing_at_the_output_path() {
    let dir = tempfile::tempdir().unwrap();
    // The parent directory of the derived output path does not exist.
    let board = saved_board(dir.path().join("missing").join("demo.kicad_pcb"));
    let mut notify = RecordingNotify::default();

    let err = export(&board, &ExportOptions::origin_relative_csv(), &mut notify).unwrap_err();
    match err {
        ExportError::Write { path, .. } => {
            assert!(!path.exists());
        }
        other => panic!("expected write failure, got {other:?}"),
    }
    assert_eq!(notify.errors.len(), 1);
}

#[test]
fn existing_manifest_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("demo_custom.csv");
    fs::write(&output, "stale contents").unwrap();

    let board = saved_board(dir.path().join("demo.kicad_pcb"));
    let mut notify = RecordingNotify::default();
    export(&board, &ExportOptions::origin_relative_csv(), &mut notify).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.contains("stale contents"));
    assert!(text.contains("R1,10kOhm"));
}
