//! Form-Varianten eines Bands und Dispatch auf die jeweilige Geometrie.

use super::route::RouteShape;
use crate::geometry::{BandLine, CrossGeometry, Side};
use crate::shared::BandOptions;
use std::fmt;

/// Art der Band-Form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Gleiche Achse, Blöcke quer zur Achse getrennt
    Parallel,
    /// Gleiche Achse, Blöcke entlang der Achse gestapelt
    FreeForm,
    /// Senkrechte Achsen
    Cross,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parallel => "parallel",
            Self::FreeForm => "free-form",
            Self::Cross => "cross",
        };
        f.write_str(name)
    }
}

/// Geometrie eines Bands, je nach Form.
#[derive(Debug, Clone, PartialEq)]
pub enum BandShape {
    /// Gekrümmter Rahmen zwischen gegenüberliegenden Kanten
    Parallel(BandLine),
    /// Nach außen gewölbter Rahmen zwischen gleichseitigen Kanten
    FreeForm(BandLine),
    /// Adapter-Streifen und Mosaik
    Cross(CrossGeometry),
}

impl BandShape {
    /// Art der Form.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Parallel(_) => ShapeKind::Parallel,
            Self::FreeForm(_) => ShapeKind::FreeForm,
            Self::Cross(_) => ShapeKind::Cross,
        }
    }

    /// Gibt `false` zurück, wenn die Geometrie degeneriert ist.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Parallel(line) | Self::FreeForm(line) => line.is_valid(),
            Self::Cross(cross) => cross.is_valid(),
        }
    }

    /// Rahmen, falls die Form einen durchgehenden Rahmen hat.
    pub fn band_line(&self) -> Option<&BandLine> {
        match self {
            Self::Parallel(line) | Self::FreeForm(line) => Some(line),
            Self::Cross(_) => None,
        }
    }

    /// Gekürzte Variante; `None` für Kreuz-Formen (gerade Adapter, nichts zu kürzen).
    pub fn stubify(&self, distance: f32) -> Option<Self> {
        match self {
            Self::Parallel(line) => Some(Self::Parallel(line.stubify(distance))),
            Self::FreeForm(line) => Some(Self::FreeForm(line.stubify(distance))),
            Self::Cross(_) => None,
        }
    }

    /// Form einer Route über die normierten Bereiche beider Seiten.
    pub fn area(
        &self,
        source: (f32, f32),
        target: (f32, f32),
        options: &BandOptions,
    ) -> Option<RouteShape> {
        if !self.is_valid() {
            return None;
        }
        let epsilon = options.degenerate_epsilon;
        match self {
            Self::Parallel(line) | Self::FreeForm(line) => Some(RouteShape::Band(
                line.compute_area(source.0, source.1, target.0, target.1, epsilon),
            )),
            Self::Cross(cross) => {
                let (source, target, cell) = cross.compute_areas(source, target, epsilon);
                Some(RouteShape::Cross {
                    source,
                    target,
                    cell,
                })
            }
        }
    }

    /// Stub-Form für den Bereich `range` einer Seite.
    pub fn stub(&self, side: Side, range: (f32, f32), options: &BandOptions) -> Option<RouteShape> {
        let far = options.virtual_far_offset;
        let distance = options.stub_distance;
        let stub = match self {
            Self::Parallel(line) | Self::FreeForm(line) => {
                line.compute_stub(side, range.0, range.1, far, distance)
            }
            Self::Cross(cross) => cross.compute_stub(side, range.0, range.1, far, distance),
        }?;
        Some(RouteShape::Stub(stub))
    }
}
