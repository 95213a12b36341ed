use edgekit_camtools::{BoardOutlineConverter, DrawCommand};
use edgekit_core::Point;
use edgekit_settings::Config;

/// 60 x 40 board with a round slot of radius 5 at (30, 20).
fn board_with_slot() -> Vec<DrawCommand> {
    vec![
        DrawCommand::move_to(0.0, 0.0),
        DrawCommand::line_to(60.0, 0.0),
        DrawCommand::line_to(60.0, 40.0),
        DrawCommand::line_to(0.0, 40.0),
        DrawCommand::line_to(0.0, 0.0),
        DrawCommand::move_to(25.0, 20.0),
        DrawCommand::arc_to(35.0, 20.0, 5.0, 0.0, false),
        DrawCommand::arc_to(25.0, 20.0, -5.0, 0.0, false),
    ]
}

fn config() -> Config {
    let mut config = Config::default();
    config.tool.tool_diameter = 2.0;
    config.machine.entry_point = Point::new(0.0, 0.0);
    config
}

#[test]
fn test_rectangle_with_slot_gives_two_blocks() {
    let report = BoardOutlineConverter::new(config())
        .convert(&board_with_slot())
        .unwrap();

    assert!(report.is_clean(), "{:?}", report.diagnostics);
    assert_eq!(report.summary.contours_cut, 2);
    assert_eq!(report.summary.contours_skipped, 0);
    assert_eq!(report.gcode.matches("G01 Z-1.650").count(), 2);

    // The slot is cut before the board edge.
    let slot = report
        .gcode
        .find("Contour 1 (level 1, inward 1.000 mm)")
        .unwrap();
    let edge = report
        .gcode
        .find("Contour 0 (level 0, outward 1.000 mm)")
        .unwrap();
    assert!(slot < edge);
}

#[test]
fn test_blocks_are_framed_by_rapid_plunge_and_retract() {
    let report = BoardOutlineConverter::new(config())
        .convert(&board_with_slot())
        .unwrap();
    let lines: Vec<&str> = report.gcode.lines().collect();

    let labels: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.starts_with("; Contour "))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(labels.len(), 2);

    for &i in &labels {
        assert_eq!(lines[i + 1], "G00 Z20.000");
        assert!(lines[i + 2].starts_with("G00 X"));
        assert_eq!(lines[i + 3], "G00 Z1.000");
        assert_eq!(lines[i + 4], "G01 Z-1.650");

        let end = lines[i + 5..]
            .iter()
            .position(|l| l.is_empty())
            .map(|n| i + 5 + n)
            .unwrap();
        assert_eq!(lines[end - 1], "G00 Z20.000");
        assert!(lines[i + 5..end - 1]
            .iter()
            .all(|l| l.starts_with("G01 X") || l.starts_with("G02 ") || l.starts_with("G03 ")));
    }
}

#[test]
fn test_board_edge_entered_near_entry_point() {
    let report = BoardOutlineConverter::new(config())
        .convert(&board_with_slot())
        .unwrap();
    let lines: Vec<&str> = report.gcode.lines().collect();
    let label = lines
        .iter()
        .position(|l| l.starts_with("; Contour 0"))
        .unwrap();

    // The compensated corner at the origin starts one radius away from it.
    let rapid = lines[label + 2];
    assert!(
        rapid == "G00 X0.000 Y-1.000" || rapid == "G00 X-1.000 Y0.000",
        "unexpected entry move: {}",
        rapid
    );
}

#[test]
fn test_header_and_footer() {
    let report = BoardOutlineConverter::new(config())
        .convert(&board_with_slot())
        .unwrap();
    let gcode = &report.gcode;

    assert!(gcode.contains("; Contours cut: 2"));
    assert!(gcode.contains("G21 ; Set units to millimeters"));
    assert!(gcode.contains("G90 ; Absolute positioning"));
    assert!(gcode.contains("M03 S10000.000"));
    assert!(gcode.find("M03").unwrap() < gcode.find("; Contour 1").unwrap());
    assert!(gcode.trim_end().ends_with("M30 ; Program end"));
}
