use edgekit_camtools::{
    read_commands, BoardOutlineConverter, CamToolError, EdgeExtractor, GerberDecoder,
    InterpolationCode, PenState,
};
use edgekit_core::{Point, Tolerance};
use edgekit_settings::Config;
use std::fs;
use tempfile::TempDir;

const SQUARE_JSON: &str = r#"[
    {"code": "G01", "X": 0.0, "Y": 0.0, "D": "D02"},
    {"code": "G01", "X": 10.0, "Y": 0.0, "D": "D01"},
    {"code": "G01", "X": 10.0, "Y": 10.0, "D": "D01"},
    {"code": "G01", "X": 0.0, "Y": 10.0, "D": "D01"},
    {"code": "G01", "X": 0.0, "Y": 0.0, "D": "D01"}
]"#;

const OUTLINE_GERBER: &str = "G04 Board outline*
%FSLAX24Y24*%
%MOMM*%
%ADD10C,0.100*%
D10*
G01*
X0Y0D02*
X200000Y0D01*
X200000Y100000D01*
X0Y100000D01*
X0Y0D01*
M02*
";

#[test]
fn test_json_file_converts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("outline.json");
    fs::write(&path, SQUARE_JSON).unwrap();

    let commands = read_commands(&path).unwrap();
    assert_eq!(commands.len(), 5);
    assert_eq!(commands[0].pen, PenState::Move);

    let report = BoardOutlineConverter::new(Config::default())
        .convert_file(&path)
        .unwrap();
    assert_eq!(report.summary.contours_cut, 1);
}

#[test]
fn test_malformed_record_aborts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"[
            {"code": "G01", "X": 0.0, "Y": 0.0, "D": "D02"},
            {"code": "G07", "X": 1.0, "Y": 0.0, "D": "D01"}
        ]"#,
    )
    .unwrap();

    let result = BoardOutlineConverter::new(Config::default()).convert_file(&path);
    assert!(matches!(
        result,
        Err(CamToolError::MalformedCommand { index: 1, .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = read_commands(&dir.path().join("absent.gbr"));
    assert!(matches!(result, Err(CamToolError::IoError(_))));
}

#[test]
fn test_gerber_outline_decodes() {
    let commands = GerberDecoder::decode(OUTLINE_GERBER).unwrap();
    assert_eq!(commands.len(), 5);
    assert_eq!(commands[0].pen, PenState::Move);
    assert!(commands[1..]
        .iter()
        .all(|c| c.pen == PenState::Cut && c.code == InterpolationCode::Linear));

    // Closed outline, twice as wide as it is tall.
    let corner = &commands[2];
    assert!(corner.x > 0.0);
    assert!((corner.x - 2.0 * corner.y).abs() < 1e-9);
    assert_eq!(commands[4].x, commands[0].x);
    assert_eq!(commands[4].y, commands[0].y);
}

fn gerber(units: &str, body: &str) -> String {
    format!(
        "%FSLAX24Y24*%\n%MO{}*%\n%ADD10C,0.100*%\nD10*\nG01*\n{}M02*\n",
        units, body
    )
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_gerber_inches_scaled_to_mm() {
    let content = gerber("IN", "X0Y0D02*\nX10000Y5000D01*\n");
    let commands = GerberDecoder::decode(&content).unwrap();
    assert_eq!(commands.len(), 2);
    assert!(close(commands[1].x, 25.4));
    assert!(close(commands[1].y, 12.7));
}

#[test]
fn test_gerber_arcs_keep_direction_and_center_offset() {
    let content = gerber(
        "MM",
        "G75*\nX0Y0D02*\nG03*\nX100000Y0I50000J0D01*\nG02*\nX0Y0I-50000J0D01*\n",
    );
    let commands = GerberDecoder::decode(&content).unwrap();
    assert_eq!(commands.len(), 3);

    let ccw = &commands[1];
    assert_eq!(ccw.code, InterpolationCode::CounterClockwiseArc);
    assert_eq!(ccw.pen, PenState::Cut);
    assert!(close(ccw.x, 10.0));
    assert!(close(ccw.y, 0.0));
    assert!(close(ccw.i, 5.0));
    assert!(close(ccw.j, 0.0));

    let cw = &commands[2];
    assert_eq!(cw.code, InterpolationCode::ClockwiseArc);
    assert!(close(cw.x, 0.0));
    assert!(close(cw.i, -5.0));
}

#[test]
fn test_gerber_missing_axis_is_modal() {
    let content = gerber("MM", "X0Y0D02*\nX100000D01*\nY50000D01*\n");
    let commands = GerberDecoder::decode(&content).unwrap();
    assert_eq!(commands.len(), 3);
    assert!(close(commands[1].x, 10.0) && close(commands[1].y, 0.0));
    assert!(close(commands[2].x, 10.0) && close(commands[2].y, 5.0));
}

#[test]
fn test_gerber_flash_relocates_next_edge() {
    let content = gerber(
        "MM",
        "X0Y0D02*\nX50000Y50000D03*\nX100000Y100000D01*\n",
    );
    let commands = GerberDecoder::decode(&content).unwrap();
    let edges = EdgeExtractor::extract(Tolerance::default(), &commands);

    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].start(), Point::new(5.0, 5.0));
    assert_eq!(edges[0].end(), Point::new(10.0, 10.0));
}
