use edgekit_camtools::{Diagnostic, PathLinker};
use edgekit_core::{Contour, Edge, Point};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square_edges(x0: f64, y0: f64, size: f64) -> Vec<Edge> {
    let a = p(x0, y0);
    let b = p(x0 + size, y0);
    let c = p(x0 + size, y0 + size);
    let d = p(x0, y0 + size);
    vec![
        Edge::line(a, b),
        Edge::line(b, c),
        Edge::line(c, d),
        Edge::line(d, a),
    ]
}

#[test]
fn test_square_closes_from_shuffled_reversed_edges() {
    let e = square_edges(0.0, 0.0, 10.0);
    let pool = vec![e[2].reversed(), e[0], e[3], e[1].reversed()];

    let result = PathLinker::link(pool);
    assert_eq!(result.contours.len(), 1);
    assert!(result.orphans.is_empty());
    assert!(result.diagnostics.is_empty());

    let contour = &result.contours[0];
    assert_eq!(contour.len(), 4);
    assert!(contour.is_closed());
    assert!(contour.is_connected());
    assert!((contour.length() - 40.0).abs() < 1e-12);
}

#[test]
fn test_two_disjoint_squares() {
    let mut pool = square_edges(0.0, 0.0, 10.0);
    pool.extend(square_edges(20.0, 0.0, 5.0));

    let result = PathLinker::link(pool);
    assert_eq!(result.contours.len(), 2);
    assert!(result.contours.iter().all(Contour::is_closed));
    assert!(result.orphans.is_empty());
    assert_eq!(result.closed_contours().count(), 2);
}

#[test]
fn test_arcs_reverse_while_linking() {
    // Both halves of a slot drawn from the left end; the upper one gets reversed.
    let left = p(25.0, 20.0);
    let right = p(35.0, 20.0);
    let center = p(30.0, 20.0);
    let lower = Edge::arc(left, right, center, false);
    let upper = Edge::arc(left, right, center, true);

    let result = PathLinker::link(vec![lower, upper]);
    assert_eq!(result.contours.len(), 1);
    let contour = &result.contours[0];
    assert!(contour.is_closed());
    match contour.edges()[0] {
        Edge::Arc {
            start,
            end,
            center: c,
            clockwise,
        } => {
            assert_eq!(start, right);
            assert_eq!(end, left);
            assert_eq!(c, center);
            assert!(!clockwise);
        }
        Edge::Line { .. } => panic!("expected an arc"),
    }
}

#[test]
fn test_leftover_edges_are_reported() {
    let mut pool = square_edges(0.0, 0.0, 10.0);
    pool.push(Edge::line(p(50.0, 50.0), p(60.0, 50.0)));
    pool.push(Edge::line(p(70.0, 50.0), p(80.0, 50.0)));

    let result = PathLinker::link(pool);
    assert_eq!(result.contours.len(), 1);
    assert_eq!(result.orphans.len(), 2);
    match result.diagnostics.as_slice() {
        [Diagnostic::DisconnectedGeometry { loop_index, edges }] => {
            assert_eq!(*loop_index, 1);
            assert_eq!(edges.len(), 2);
        }
        other => panic!("unexpected diagnostics: {:?}", other),
    }
}

#[test]
fn test_reversal_round_trip() {
    let arc = Edge::arc(p(1.0, 0.0), p(0.0, 1.0), p(0.0, 0.0), false);
    let reversed = arc.reversed();
    assert_eq!(reversed.start(), arc.end());
    assert_eq!(reversed.end(), arc.start());
    assert_eq!(reversed.reversed(), arc);
}

#[test]
fn test_squares_sharing_a_corner_stay_separate() {
    // B touches A only at the origin, where A closes.
    let mut pool = square_edges(0.0, 0.0, 10.0);
    let b = [p(0.0, 0.0), p(-10.0, 0.0), p(-10.0, -10.0), p(0.0, -10.0)];
    pool.extend((0..4).map(|i| Edge::line(b[i], b[(i + 1) % 4])));

    let result = PathLinker::link(pool);
    assert_eq!(result.contours.len(), 2);
    assert!(result.orphans.is_empty());
    assert!(result.diagnostics.is_empty());
    for contour in &result.contours {
        assert!(contour.is_closed());
        assert_eq!(contour.len(), 4);
        assert!((contour.length() - 40.0).abs() < 1e-12);
    }
    assert!(result.contours[0]
        .edges()
        .iter()
        .all(|e| e.start().x >= 0.0 && e.start().y >= 0.0));
}
