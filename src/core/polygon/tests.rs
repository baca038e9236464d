use super::*;

fn unit_square() -> Vec<DVec3> {
    vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    ]
}

// ── Grundfunktionen ──

#[test]
fn test_triangle_area_right_triangle() {
    let area = triangle_area(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    );
    assert!((area - 0.5).abs() < 1e-12);
}

#[test]
fn test_newell_normal_of_ccw_square_points_up() {
    let normal = newell_normal(&unit_square());
    assert!(normal.z > 0.0);
    assert!(normal.x.abs() < 1e-12 && normal.y.abs() < 1e-12);
    assert_eq!(dominant_axis(normal), DropAxis::Z);
}

#[test]
fn test_dominant_axis_prefers_largest_component() {
    assert_eq!(dominant_axis(DVec3::new(-3.0, 1.0, 2.0)), DropAxis::X);
    assert_eq!(dominant_axis(DVec3::new(0.1, -5.0, 2.0)), DropAxis::Y);
    assert_eq!(dominant_axis(DVec3::new(1.0, 1.0, 1.0)), DropAxis::X);
    assert_eq!(
        project(DVec3::new(1.0, 2.0, 3.0), DropAxis::Y),
        DVec2::new(1.0, 3.0)
    );
}

// ── Ear-Clipping ──

#[test]
fn test_ear_clip_square_gives_two_triangles() {
    let poly: Vec<DVec2> = unit_square().iter().map(|p| p.truncate()).collect();
    let tri = ear_clip(&poly);
    assert!(tri.complete);
    assert_eq!(tri.triangles.len(), 2);
}

#[test]
fn test_ear_clip_concave_l_shape() {
    // L-Form, Fläche 3
    let points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(2.0, 1.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(1.0, 2.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
    ];
    let result = triangulated_area(&points);
    assert!(result.complete);
    assert!((result.area - 3.0).abs() < 1e-9, "Fläche war {}", result.area);

    // Gleiches Polygon im Uhrzeigersinn
    let reversed: Vec<DVec3> = points.iter().rev().copied().collect();
    let result = triangulated_area(&reversed);
    assert!((result.area - 3.0).abs() < 1e-9);
}

#[test]
fn test_ear_clip_without_ears_flags_incomplete() {
    // Kollineare Ecken: keine konvexe Ecke, kein Ohr
    let poly = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(3.0, 0.0),
    ];
    let tri = ear_clip(&poly);
    assert!(!tri.complete);
    assert!(tri.triangles.is_empty());
}

// ── Flächen ──

#[test]
fn test_polygon_area_unit_square() {
    let area = polygon_area(&unit_square()).expect("Fläche erwartet");
    assert!((area - 1.0).abs() < 1e-12);
}

#[test]
fn test_polygon_area_tilted_square_uses_3d_lengths() {
    // Quadrat mit Kantenlänge sqrt(2) in der Ebene x = z
    let points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(1.0, 1.414_213_562_373_095, 1.0),
        DVec3::new(0.0, 1.414_213_562_373_095, 0.0),
    ];
    let area = polygon_area(&points).expect("Fläche erwartet");
    assert!((area - 2.0).abs() < 1e-9, "Fläche war {area}");
}

#[test]
fn test_polygon_area_ignores_sequential_duplicates() {
    let mut points = unit_square();
    points.insert(2, DVec3::new(1.0, 0.0, 1e-9));
    let area = polygon_area(&points).expect("Fläche erwartet");
    assert!((area - 1.0).abs() < 1e-9);
}

#[test]
fn test_polygon_area_degenerate_inputs() {
    assert!(polygon_area(&[]).is_none());
    assert!(polygon_area(&unit_square()[..2]).is_none());
    // Kollinear
    let line = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
    ];
    assert!(polygon_area(&line).is_none());
    // Duplikate reduzieren auf 2 Punkte
    let dupes = vec![DVec3::ZERO, DVec3::ZERO, DVec3::X, DVec3::X];
    assert!(polygon_area(&dupes).is_none());
}

#[test]
fn test_triangulated_area_short_input_is_zero() {
    let result = triangulated_area(&unit_square()[..2]);
    assert_eq!(result.area, 0.0);
    assert!(!result.complete);
}

// ── Planarität ──

#[test]
fn test_planarity_of_flat_square_is_zero() {
    let planarity = planarity(&unit_square()).expect("Planarität erwartet");
    assert_eq!(planarity, Planarity { rms: 0.0, max: 0.0 });
}

#[test]
fn test_planarity_detects_lifted_corner() {
    let mut points = unit_square();
    points[2].z = 0.2;
    let planarity = planarity(&points).expect("Planarität erwartet");
    assert!(planarity.max > 0.0);
    assert!(planarity.rms > 0.0 && planarity.rms <= planarity.max);
}

#[test]
fn test_planarity_needs_three_points() {
    assert!(planarity(&unit_square()[..2]).is_none());
    let collinear = vec![DVec3::ZERO, DVec3::X, DVec3::X * 2.0];
    assert_eq!(planarity(&collinear), Some(Planarity::default()));
}

// ── Kanten ──

#[test]
fn test_build_edges_open_and_closed() {
    let square = unit_square();
    assert_eq!(build_edges(&square, false).len(), 3);

    let closed = build_edges(&square, true);
    assert_eq!(closed.len(), 4);
    assert_eq!(closed[3].a, square[3]);
    assert_eq!(closed[3].b, square[0]);
    assert!((closed[3].length - 1.0).abs() < 1e-12);
}

#[test]
fn test_build_edges_skips_degenerate() {
    let points = vec![DVec3::ZERO, DVec3::ZERO, DVec3::X];
    let edges = build_edges(&points, false);
    assert_eq!(edges.len(), 1);
}
