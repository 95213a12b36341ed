use edgekit_camtools::{
    ArcSegmenter, CamToolError, DrawCommand, EdgeExtractor, NestingAnalyzer, OffsetDirection,
    PathLinker,
};
use edgekit_core::{Polygon, Tolerance};

fn square(commands: &mut Vec<DrawCommand>, x0: f64, y0: f64, size: f64) {
    commands.push(DrawCommand::move_to(x0, y0));
    commands.push(DrawCommand::line_to(x0 + size, y0));
    commands.push(DrawCommand::line_to(x0 + size, y0 + size));
    commands.push(DrawCommand::line_to(x0, y0 + size));
    commands.push(DrawCommand::line_to(x0, y0));
}

fn polygons(commands: &[DrawCommand]) -> Vec<(usize, Polygon)> {
    let edges = EdgeExtractor::extract(Tolerance::default(), commands);
    let segmenter = ArcSegmenter::default();
    PathLinker::link(edges)
        .contours
        .iter()
        .enumerate()
        .map(|(i, c)| (i, segmenter.polygon(c).unwrap()))
        .collect()
}

#[test]
fn test_concentric_squares_alternate() {
    let mut commands = Vec::new();
    square(&mut commands, 0.0, 0.0, 100.0);
    square(&mut commands, 10.0, 10.0, 80.0);
    square(&mut commands, 20.0, 20.0, 60.0);

    let nested = NestingAnalyzer::default()
        .analyze(polygons(&commands))
        .unwrap();

    let levels: Vec<(usize, usize)> = nested.iter().map(|n| (n.index, n.level)).collect();
    assert_eq!(levels, vec![(2, 2), (1, 1), (0, 0)]);

    let directions: Vec<OffsetDirection> = nested.iter().map(|n| n.direction()).collect();
    assert_eq!(
        directions,
        vec![
            OffsetDirection::Outward,
            OffsetDirection::Inward,
            OffsetDirection::Outward
        ]
    );
    assert_eq!(nested[1].offset_distance(1.0), -1.0);
    assert_eq!(nested[2].offset_distance(1.0), 1.0);
}

#[test]
fn test_siblings_share_a_level() {
    let mut commands = Vec::new();
    square(&mut commands, 0.0, 0.0, 100.0);
    square(&mut commands, 10.0, 10.0, 10.0);
    square(&mut commands, 50.0, 50.0, 10.0);
    square(&mut commands, 200.0, 0.0, 10.0);

    let nested = NestingAnalyzer::default()
        .analyze(polygons(&commands))
        .unwrap();
    let levels: Vec<(usize, usize)> = nested.iter().map(|n| (n.index, n.level)).collect();
    assert_eq!(levels, vec![(1, 1), (2, 1), (0, 0), (3, 0)]);
}

#[test]
fn test_circle_inside_square() {
    let mut commands = Vec::new();
    square(&mut commands, 0.0, 0.0, 60.0);
    commands.push(DrawCommand::move_to(25.0, 20.0));
    commands.push(DrawCommand::arc_to(35.0, 20.0, 5.0, 0.0, false));
    commands.push(DrawCommand::arc_to(25.0, 20.0, -5.0, 0.0, false));

    let nested = NestingAnalyzer::default()
        .analyze(polygons(&commands))
        .unwrap();
    assert_eq!(nested[0].index, 1);
    assert_eq!(nested[0].level, 1);
}

#[test]
fn test_partial_overlap_is_fatal() {
    let mut commands = Vec::new();
    square(&mut commands, 0.0, 0.0, 10.0);
    square(&mut commands, 5.0, 5.0, 10.0);

    let result = NestingAnalyzer::default().analyze(polygons(&commands));
    assert!(matches!(
        result,
        Err(CamToolError::OverlappingContours {
            first: 0,
            second: 1
        })
    ));
}
