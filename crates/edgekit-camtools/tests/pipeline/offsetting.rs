use edgekit_camtools::offset::contour_area;
use edgekit_camtools::{
    compensate, nearest_edge, rotate_to_entry, CavalierBuffer, Diagnostic, NestedContour,
    PolygonBuffer,
};
use edgekit_core::{Contour, Edge, Point, Polygon};

fn square(size: f64) -> Polygon {
    Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(size, 0.0),
        Point::new(size, size),
        Point::new(0.0, size),
    ])
    .unwrap()
}

#[test]
fn test_outward_offset_area_grows_with_distance() {
    let polygon = square(10.0);
    let areas: Vec<f64> = [0.5, 1.0, 2.0, 3.0]
        .iter()
        .map(|d| {
            let rings = CavalierBuffer.offset(&polygon, *d).unwrap();
            assert_eq!(rings.len(), 1);
            contour_area(&rings[0]).unwrap()
        })
        .collect();

    assert!(areas[0] > polygon.area());
    assert!(areas.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_orientation_does_not_change_direction() {
    let ccw = square(10.0);
    let cw = ccw.clone().into_clockwise();
    assert!(!ccw.is_clockwise());

    let a = contour_area(&CavalierBuffer.offset(&ccw, -1.0).unwrap()[0]).unwrap();
    let b = contour_area(&CavalierBuffer.offset(&cw, -1.0).unwrap()[0]).unwrap();
    assert!((a - 64.0).abs() < 1e-6);
    assert!((b - 64.0).abs() < 1e-6);
}

#[test]
fn test_inward_beyond_inradius_is_infeasible() {
    let nested = vec![
        NestedContour {
            index: 4,
            level: 1,
            polygon: square(10.0),
        },
        NestedContour {
            index: 0,
            level: 0,
            polygon: square(10.0),
        },
    ];

    let (compensated, diagnostics) = compensate(&CavalierBuffer, &nested, 6.0);
    assert_eq!(compensated.len(), 1);
    assert_eq!(compensated[0].index, 0);
    assert_eq!(compensated[0].distance, 6.0);
    match diagnostics.as_slice() {
        [Diagnostic::OffsetInfeasible {
            loop_index,
            distance,
            ..
        }] => {
            assert_eq!(*loop_index, 4);
            assert_eq!(*distance, -6.0);
        }
        other => panic!("unexpected diagnostics: {:?}", other),
    }
}

#[test]
fn test_rotation_preserves_cyclic_adjacency() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    let c = Point::new(10.0, 10.0);
    let d = Point::new(0.0, 10.0);
    let edges = vec![
        Edge::line(a, b),
        Edge::line(b, c),
        Edge::line(c, d),
        Edge::line(d, a),
    ];
    let contour = Contour::new(edges.clone());

    let rotated = contour.rotated(2);
    assert_eq!(
        rotated.edges(),
        &[edges[2], edges[3], edges[0], edges[1]]
    );
    assert!(rotated.is_closed());
    assert!(rotated.is_connected());

    // Entry near C selects the same rotation.
    assert_eq!(nearest_edge(&contour, Point::new(11.0, 12.0)), Some(2));
    assert_eq!(rotate_to_entry(&contour, Point::new(11.0, 12.0)), rotated);
}
