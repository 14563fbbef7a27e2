//! Kreuz-Geometrie für senkrecht zueinander stehende Blöcke.
//!
//! Beide Blöcke werden über je einen geraden Adapter-Streifen mit dem
//! Mosaik verbunden, dem Schnittrechteck aus der X-Spanne des horizontalen
//! und der Y-Spanne des vertikalen Blocks.

use super::area::{Area, Side, Stub};
use super::band_line::BandLine;
use crate::core::{Axis, Bounds, EdgeSide};
use glam::Vec2;

/// Geometrie eines Kreuz-Bands.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossGeometry {
    source_adapter: BandLine,
    target_adapter: BandLine,
    mosaic: Bounds,
    source_axis: Axis,
}

impl CrossGeometry {
    /// Baut die Kreuz-Geometrie. `None`, wenn die Achsen nicht senkrecht
    /// stehen oder das Mosaik einen der Blöcke um weniger als `min_gap` verfehlt.
    pub fn new(
        source: &Bounds,
        source_axis: Axis,
        target: &Bounds,
        target_axis: Axis,
        min_gap: f32,
    ) -> Option<Self> {
        if source_axis == target_axis {
            return None;
        }
        let (horizontal, vertical) = match source_axis {
            Axis::Horizontal => (source, target),
            Axis::Vertical => (target, source),
        };

        let (x_min, x_max) = horizontal.span(Axis::Horizontal);
        let (y_min, y_max) = vertical.span(Axis::Vertical);
        let mosaic = Bounds::new(Vec2::new(x_min, y_min), Vec2::new(x_max, y_max));

        let vertical_gap = mosaic.separation(horizontal, Axis::Vertical);
        let horizontal_gap = mosaic.separation(vertical, Axis::Horizontal);
        if vertical_gap < min_gap || horizontal_gap < min_gap {
            log::debug!(
                "Kreuz-Band verworfen: Mosaik-Abstand {:.1}/{:.1} < {:.1}",
                vertical_gap,
                horizontal_gap,
                min_gap
            );
            return None;
        }

        Some(Self {
            source_adapter: adapter(source, source_axis, &mosaic),
            target_adapter: adapter(target, target_axis, &mosaic),
            mosaic,
            source_axis,
        })
    }

    /// Adapter-Streifen vom Quell-Block zum Mosaik.
    pub fn source_adapter(&self) -> &BandLine {
        &self.source_adapter
    }

    /// Adapter-Streifen vom Ziel-Block zum Mosaik.
    pub fn target_adapter(&self) -> &BandLine {
        &self.target_adapter
    }

    /// Schnittrechteck.
    pub fn mosaic(&self) -> &Bounds {
        &self.mosaic
    }

    /// Gibt `true` zurück, wenn beide Adapter gültig sind.
    pub fn is_valid(&self) -> bool {
        self.source_adapter.is_valid() && self.target_adapter.is_valid() && self.mosaic.is_finite()
    }

    /// Zelle im Mosaik für die Quell-Anteile `(s1, s2)` und Ziel-Anteile `(t1, t2)`.
    pub fn cell(&self, s1: f32, s2: f32, t1: f32, t2: f32) -> Bounds {
        let (source_span, target_span) = match self.source_axis {
            Axis::Horizontal => (
                self.mosaic.span(Axis::Horizontal),
                self.mosaic.span(Axis::Vertical),
            ),
            Axis::Vertical => (
                self.mosaic.span(Axis::Vertical),
                self.mosaic.span(Axis::Horizontal),
            ),
        };
        let along = |(lo, hi): (f32, f32), f: f32| lo + (hi - lo) * f;
        let (a, b) = (along(source_span, s1), along(source_span, s2));
        let (c, d) = (along(target_span, t1), along(target_span, t2));
        match self.source_axis {
            Axis::Horizontal => Bounds::new(Vec2::new(a, c), Vec2::new(b, d)),
            Axis::Vertical => Bounds::new(Vec2::new(c, a), Vec2::new(d, b)),
        }
    }

    /// Flächen beider Adapter und die Mosaik-Zelle einer Route.
    pub fn compute_areas(
        &self,
        source: (f32, f32),
        target: (f32, f32),
        epsilon: f32,
    ) -> (Area, Area, Bounds) {
        let source_area = self
            .source_adapter
            .compute_area(source.0, source.1, source.0, source.1, epsilon);
        let target_area = self
            .target_adapter
            .compute_area(target.0, target.1, target.0, target.1, epsilon);
        let cell = self.cell(source.0, source.1, target.0, target.1);
        (source_area, target_area, cell)
    }

    /// Stub am Block der gegebenen Seite.
    pub fn compute_stub(
        &self,
        side: Side,
        f1: f32,
        f2: f32,
        far_offset: f32,
        distance: f32,
    ) -> Option<Stub> {
        let adapter = match side {
            Side::Source => &self.source_adapter,
            Side::Target => &self.target_adapter,
        };
        let mut stub = adapter.compute_stub(Side::Source, f1, f2, far_offset, distance)?;
        stub.side = side;
        Some(stub)
    }
}

/// Gerader Streifen von der zum Mosaik zeigenden Blockkante zur gegenüberliegenden Mosaik-Kante.
fn adapter(block: &Bounds, axis: Axis, mosaic: &Bounds) -> BandLine {
    let across = axis.perpendicular();
    let (block_side, mosaic_side) = if block.is_before(mosaic, across) {
        (EdgeSide::Max, EdgeSide::Min)
    } else {
        (EdgeSide::Min, EdgeSide::Max)
    };
    BandLine::straight(block.edge(axis, block_side), mosaic.edge(axis, mosaic_side))
}
