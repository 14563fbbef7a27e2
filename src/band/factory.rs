//! Wahl der Band-Form aus der relativen Lage zweier Blöcke und Aufbau der Anker.

use super::lod::{Band, BandEnd};
use super::shape::{BandShape, ShapeKind};
use crate::core::algebra::shared_set;
use crate::core::{edge_normal, Axis, Bounds, EdgeSide, IdMappingRegistry};
use crate::geometry::{BandLine, CrossGeometry, PolyLine};
use crate::shared::curve_geometry::anchored_curve;
use crate::shared::BandOptions;

/// Anzahl gepinnter Punkte je Ende (Anker + gerader Vorlauf).
const PINNED_POINTS: usize = 2;

/// Erzeugt Bands zwischen Blöcken.
#[derive(Debug, Clone)]
pub struct BandFactory<'a> {
    registry: &'a IdMappingRegistry,
    options: BandOptions,
}

impl<'a> BandFactory<'a> {
    /// Erstellt eine Factory mit Registry und Optionen.
    pub fn new(registry: &'a IdMappingRegistry, options: BandOptions) -> Self {
        Self { registry, options }
    }

    /// Optionen der erzeugten Bands.
    pub fn options(&self) -> &BandOptions {
        &self.options
    }

    /// Form, die zwischen zwei Seiten gewählt würde.
    pub fn shape_kind(&self, source: &BandEnd, target: &BandEnd) -> Option<ShapeKind> {
        choose_kind(source, target, self.options.min_gap)
    }

    /// Erzeugt ein Band oder `None`, wenn keine Beziehung darstellbar ist.
    pub fn create(&self, source: BandEnd, target: BandEnd) -> Option<Band> {
        let shared = shared_set(&source.sequence, &target.sequence, self.registry);
        if shared.is_empty() {
            log::debug!(
                "Keine gemeinsamen Elemente zwischen {} und {}",
                source.sequence.id_type(),
                target.sequence.id_type()
            );
            return None;
        }
        let shape = build_shape(&source, &target, &self.options)?;
        log::info!(
            "Band erzeugt: {} mit {} gemeinsamen Elementen",
            shape.kind(),
            shared.len()
        );
        Some(Band::new(
            source,
            target,
            shared,
            shape,
            self.registry,
            self.options.clone(),
        ))
    }
}

/// Wählt die Form aus Achsen und Abständen.
///
/// Gleiche Achse: die größere Trennung entscheidet (quer ⇒ Parallel,
/// entlang ⇒ FreeForm), sie muss mindestens `min_gap` betragen.
fn choose_kind(source: &BandEnd, target: &BandEnd, min_gap: f32) -> Option<ShapeKind> {
    if !source.bounds.is_finite() || !target.bounds.is_finite() {
        log::warn!("Nicht-endliches Ankerrechteck, kein Band");
        return None;
    }
    if source.axis != target.axis {
        return Some(ShapeKind::Cross);
    }
    let axis = source.axis;
    let across = source.bounds.separation(&target.bounds, axis.perpendicular());
    let along = source.bounds.separation(&target.bounds, axis);
    let (kind, separation) = if across >= along {
        (ShapeKind::Parallel, across)
    } else {
        (ShapeKind::FreeForm, along)
    };
    if separation < min_gap {
        log::debug!("Blöcke zu nah ({:.1} < {:.1}), kein Band", separation, min_gap);
        return None;
    }
    Some(kind)
}

/// Baut die Geometrie der gewählten Form.
pub(crate) fn build_shape(
    source: &BandEnd,
    target: &BandEnd,
    options: &BandOptions,
) -> Option<BandShape> {
    match choose_kind(source, target, options.min_gap)? {
        ShapeKind::Parallel => Some(BandShape::Parallel(parallel_line(
            &source.bounds,
            &target.bounds,
            source.axis,
            options,
        ))),
        ShapeKind::FreeForm => Some(BandShape::FreeForm(free_form_line(
            &source.bounds,
            &target.bounds,
            source.axis,
            options,
        ))),
        ShapeKind::Cross => CrossGeometry::new(
            &source.bounds,
            source.axis,
            &target.bounds,
            target.axis,
            options.min_gap,
        )
        .map(BandShape::Cross),
    }
}

/// Rahmen zwischen den einander zugewandten Kanten.
fn parallel_line(source: &Bounds, target: &Bounds, axis: Axis, options: &BandOptions) -> BandLine {
    let across = axis.perpendicular();
    let (source_side, target_side) = if source.is_before(target, across) {
        (EdgeSide::Max, EdgeSide::Min)
    } else {
        (EdgeSide::Min, EdgeSide::Max)
    };
    let separation = source.separation(target, across).max(0.0);
    let shift = options.anchor_shift.min(separation * 0.25);
    let bulge = ((separation - 2.0 * shift) * 0.4).max(0.0);

    let (s0, s1) = source.edge(axis, source_side);
    let (t0, t1) = target.edge(axis, target_side);
    let source_dir = edge_normal(axis, source_side);
    let target_dir = edge_normal(axis, target_side);
    let samples = options.curve_samples;

    let top = anchored_curve(s0, source_dir, t0, target_dir, shift, bulge, samples);
    let bottom = anchored_curve(s1, source_dir, t1, target_dir, shift, bulge, samples);
    BandLine::new(
        PolyLine::new(top, PINNED_POINTS),
        PolyLine::new(bottom, PINNED_POINTS),
    )
}

/// Rahmen zwischen den Max-Kanten gestapelter Blöcke, nach außen gewölbt.
fn free_form_line(source: &Bounds, target: &Bounds, axis: Axis, options: &BandOptions) -> BandLine {
    let (s0, s1) = source.edge(axis, EdgeSide::Max);
    let (t0, t1) = target.edge(axis, EdgeSide::Max);
    let normal = edge_normal(axis, EdgeSide::Max);
    let shift = options.anchor_shift;
    let samples = options.curve_samples;
    let bulge = |a: glam::Vec2, b: glam::Vec2| (a.distance(b) * 0.5).max(options.min_gap);

    let top = anchored_curve(s0, normal, t0, normal, shift, bulge(s0, t0), samples);
    let bottom = anchored_curve(s1, normal, t1, normal, shift, bulge(s1, t1), samples);
    BandLine::new(
        PolyLine::new(top, PINNED_POINTS),
        PolyLine::new(bottom, PINNED_POINTS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GroupedSequence, IdType, LocatorArena, SequenceLocator};
    use crate::shared::curve_geometry::polyline_length;
    use approx::assert_relative_eq;
    use glam::Vec2;
    use std::sync::Arc;

    fn end(ids: Vec<u64>, origin: Vec2, size: Vec2, axis: Axis) -> BandEnd {
        let sequence = GroupedSequence::ungrouped(IdType::new("gene"), ids);
        let extent = axis.component(size);
        let locator =
            LocatorArena::new().insert(SequenceLocator::new(&sequence, extent, 0.0, true));
        BandEnd::new(
            Arc::new(sequence),
            locator,
            Bounds::from_origin_size(origin, size),
            axis,
        )
    }

    #[test]
    fn test_side_by_side_blocks_are_parallel() {
        let registry = IdMappingRegistry::new();
        let factory = BandFactory::new(&registry, BandOptions::default());
        let source = end(vec![1, 2], Vec2::ZERO, Vec2::new(20.0, 100.0), Axis::Vertical);
        let target = end(vec![2, 3], Vec2::new(200.0, 0.0), Vec2::new(20.0, 60.0), Axis::Vertical);

        assert_eq!(factory.shape_kind(&source, &target), Some(ShapeKind::Parallel));
        let band = factory.create(source, target).expect("Band erwartet");
        let line = band.shape().band_line().expect("Rahmen erwartet");
        assert_eq!(line.top().first(), Some(Vec2::new(20.0, 0.0)));
        assert_eq!(line.bottom().last(), Some(Vec2::new(200.0, 60.0)));
        assert_eq!(line.top().percentages()[1], 0.0);
    }

    #[test]
    fn test_stacked_blocks_are_free_form() {
        let registry = IdMappingRegistry::new();
        let factory = BandFactory::new(&registry, BandOptions::default());
        let source = end(vec![1], Vec2::ZERO, Vec2::new(20.0, 100.0), Axis::Vertical);
        let target = end(vec![1], Vec2::new(0.0, 200.0), Vec2::new(20.0, 60.0), Axis::Vertical);

        let band = factory.create(source, target).expect("Band erwartet");
        assert_eq!(band.shape().kind(), ShapeKind::FreeForm);
        let line = band.shape().band_line().expect("Rahmen erwartet");
        let max_x = line.top().points().iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!(max_x > 20.0);
    }

    #[test]
    fn test_perpendicular_blocks_are_cross() {
        let registry = IdMappingRegistry::new();
        let factory = BandFactory::new(&registry, BandOptions::default());
        let source = end(vec![1], Vec2::new(300.0, 100.0), Vec2::new(20.0, 150.0), Axis::Vertical);
        let target = end(vec![1], Vec2::ZERO, Vec2::new(200.0, 20.0), Axis::Horizontal);

        let band = factory.create(source, target).expect("Band erwartet");
        assert_eq!(band.shape().kind(), ShapeKind::Cross);
    }

    #[test]
    fn test_overlapping_blocks_yield_no_band() {
        let registry = IdMappingRegistry::new();
        let factory = BandFactory::new(&registry, BandOptions::default());
        let source = end(vec![1], Vec2::ZERO, Vec2::new(20.0, 100.0), Axis::Vertical);
        let target = end(vec![1], Vec2::new(24.0, 50.0), Vec2::new(20.0, 100.0), Axis::Vertical);

        assert_eq!(factory.shape_kind(&source, &target), None);
        assert!(factory.create(source, target).is_none());
    }

    #[test]
    fn test_empty_shared_set_yields_no_band() {
        let registry = IdMappingRegistry::new();
        let factory = BandFactory::new(&registry, BandOptions::default());
        let source = end(vec![1, 2], Vec2::ZERO, Vec2::new(20.0, 100.0), Axis::Vertical);
        let target = end(vec![3], Vec2::new(200.0, 0.0), Vec2::new(20.0, 60.0), Axis::Vertical);
        assert!(factory.create(source, target).is_none());
    }

    #[test]
    fn test_long_band_is_stubified_automatically() {
        let registry = IdMappingRegistry::new();
        let factory = BandFactory::new(&registry, BandOptions::default());
        let source = end(vec![1], Vec2::ZERO, Vec2::new(20.0, 100.0), Axis::Vertical);
        let target = end(vec![1], Vec2::new(1000.0, 0.0), Vec2::new(20.0, 100.0), Axis::Vertical);

        let mut band = factory.create(source, target).expect("Band erwartet");
        assert!(band.is_stubified());
        assert!(band.shape().band_line().expect("Rahmen").is_stubbed());

        band.set_stubified(false);
        assert!(!band.shape().band_line().expect("Rahmen").is_stubbed());
    }

    #[test]
    fn test_auto_stubified_ends_keep_stub_distance() {
        let registry = IdMappingRegistry::new();
        let options = BandOptions::default();
        let distance = options.stub_distance;
        let factory = BandFactory::new(&registry, options);
        let source = end(vec![1], Vec2::ZERO, Vec2::new(20.0, 100.0), Axis::Vertical);
        let target = end(vec![1], Vec2::new(1000.0, 0.0), Vec2::new(20.0, 60.0), Axis::Vertical);

        let band = factory.create(source, target).expect("Band erwartet");
        let line = band.shape().band_line().expect("Rahmen erwartet");
        for edge in [line.top(), line.bottom()] {
            let segments = edge.segments();
            assert_eq!(segments.len(), 2);
            assert_relative_eq!(polyline_length(segments[0]), distance, epsilon = 0.1);
            assert_relative_eq!(polyline_length(segments[1]), distance, epsilon = 0.1);
        }
    }

    #[test]
    fn test_distant_cross_band_is_not_stubified() {
        let registry = IdMappingRegistry::new();
        let factory = BandFactory::new(&registry, BandOptions::default());
        let source = end(vec![1], Vec2::ZERO, Vec2::new(20.0, 110.0), Axis::Vertical);
        let target = end(
            vec![1],
            Vec2::new(100.0, 1000.0),
            Vec2::new(60.0, 20.0),
            Axis::Horizontal,
        );

        let mut band = factory.create(source, target).expect("Band erwartet");
        assert_eq!(band.shape().kind(), ShapeKind::Cross);
        assert!(!band.is_stubified());

        band.set_stubified(true);
        assert!(!band.is_stubified());
    }
}
