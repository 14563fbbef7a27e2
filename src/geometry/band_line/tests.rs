use super::*;
use approx::assert_relative_eq;

/// Horizontaler Rahmen: Quelle bei x=0 (y 0..100), Ziel bei x=400 (y 0..100).
fn frame(samples: usize) -> BandLine {
    let line = |y: f32| {
        (0..=samples)
            .map(|i| Vec2::new(400.0 * i as f32 / samples as f32, y))
            .collect::<Vec<_>>()
    };
    BandLine::new(PolyLine::new(line(0.0), 0), PolyLine::new(line(100.0), 0))
}

#[test]
fn test_mismatched_counts_are_invalid() {
    let band = BandLine::new(
        PolyLine::new(vec![Vec2::ZERO, Vec2::X], 0),
        PolyLine::new(vec![Vec2::ZERO, Vec2::X, Vec2::Y], 0),
    );
    assert!(!band.is_valid());
    assert!(band.compute_stub(Side::Source, 0.0, 1.0, 1000.0, 30.0).is_none());
}

#[test]
fn test_non_finite_coordinates_are_invalid() {
    let band = BandLine::straight(
        (Vec2::ZERO, Vec2::new(0.0, f32::NAN)),
        (Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)),
    );
    assert!(!band.is_valid());
}

#[test]
fn test_compute_line_blends_between_edges() {
    let band = frame(4);
    let line = band.compute_line(0.25, 0.75);
    let points = line.points();
    assert_relative_eq!(points[0].y, 25.0, epsilon = 1e-4);
    assert_relative_eq!(points[2].y, 50.0, epsilon = 1e-4);
    assert_relative_eq!(points[4].y, 75.0, epsilon = 1e-4);
}

#[test]
fn test_compute_area_orders_min_max() {
    let band = frame(2);
    let area = band.compute_area(0.6, 0.2, 0.5, 0.1, 0.05);
    let Area::Filled(polygons) = area else {
        panic!("Fläche erwartet");
    };
    assert_eq!(polygons.len(), 1);
    let polygon = &polygons[0];
    assert_eq!(polygon.len(), 6);
    assert_relative_eq!(polygon[0].y, 20.0, epsilon = 1e-4);
    assert_relative_eq!(polygon[2].y, 10.0, epsilon = 1e-4);
    assert_relative_eq!(polygon[3].y, 50.0, epsilon = 1e-4);
    assert_relative_eq!(polygon[5].y, 60.0, epsilon = 1e-4);
}

#[test]
fn test_degenerate_area_is_stroked() {
    let band = frame(2);
    let area = band.compute_area(0.5, 0.5, 0.3, 0.3, 0.05);
    assert!(area.is_stroked());
    assert_eq!(area.parts().len(), 1);
}

#[test]
fn test_stubify_preserves_endpoints_of_both_edges() {
    let band = frame(10);
    let stub = band.stubify(30.0);

    assert!(stub.is_stubbed());
    assert_eq!(stub.top().first(), band.top().first());
    assert_eq!(stub.top().last(), band.top().last());
    assert_eq!(stub.bottom().first(), band.bottom().first());
    assert_eq!(stub.bottom().last(), band.bottom().last());
    assert_eq!(stub.top().len(), stub.bottom().len());
}

#[test]
fn test_stubified_area_has_two_polygons() {
    let stub = frame(10).stubify(30.0);
    let area = stub.compute_area(0.0, 0.5, 0.0, 0.5, 0.05);
    let Area::Filled(polygons) = area else {
        panic!("Fläche erwartet");
    };
    assert_eq!(polygons.len(), 2);
    for polygon in &polygons {
        let max_x = polygon.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        let min_x = polygon.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        assert!(max_x - min_x <= 30.0 + 1e-3);
    }
}

#[test]
fn test_short_band_is_not_stubified() {
    let band = frame(4);
    assert_eq!(band.stubify(300.0), band);
}

#[test]
fn test_compute_stub_points_into_band() {
    let band = frame(4);
    let stub = band
        .compute_stub(Side::Source, 0.6, 1.0, 1000.0, 30.0)
        .expect("Stub erwartet");
    assert_eq!(stub.direction, Vec2::X);
    assert_relative_eq!(stub.polygon[0].y, 60.0, epsilon = 1e-4);
    assert_relative_eq!(stub.polygon[2].x, 30.0, epsilon = 1e-3);

    let target = band
        .compute_stub(Side::Target, 0.0, 0.5, 1000.0, 30.0)
        .expect("Stub erwartet");
    assert_eq!(target.direction, -Vec2::X);
    assert_relative_eq!(target.polygon[2].x, 370.0, epsilon = 1e-3);
}
