//! Ergebnis-Geometrien einer Route: gefüllte Fläche, Linie oder Stub.

use glam::Vec2;

/// Fläche zwischen zwei Bruchteil-Bereichen eines Bands.
#[derive(Debug, Clone, PartialEq)]
pub enum Area {
    /// Gefüllte Polygone, eines pro Linien-Lauf
    Filled(Vec<Vec<Vec2>>),
    /// Ober- und Unterkante fallen zusammen: als Pfad zeichnen
    Stroked(Vec<Vec<Vec2>>),
}

impl Area {
    /// Alle Polygone bzw. Pfade.
    pub fn parts(&self) -> &[Vec<Vec2>] {
        match self {
            Self::Filled(parts) | Self::Stroked(parts) => parts,
        }
    }

    /// Gibt `true` zurück, wenn die Fläche zu einer Linie entartet ist.
    pub fn is_stroked(&self) -> bool {
        matches!(self, Self::Stroked(_))
    }

    /// Gibt `true` zurück, wenn keine Punkte vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.parts().iter().all(|part| part.is_empty())
    }

    /// Schwerpunkt aller Punkte (für Marker und Labels).
    pub fn centroid(&self) -> Option<Vec2> {
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;
        for point in self.parts().iter().flatten() {
            sum += *point;
            count += 1;
        }
        (count > 0).then(|| sum / count as f32)
    }
}

/// Seite eines Bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Quell-Sequenz S
    Source,
    /// Ziel-Sequenz T
    Target,
}

/// Halbe Form für nicht abgebildete Elemente einer Seite.
///
/// Läuft vom Anker in Richtung eines virtuellen Fernpunkts und endet nach
/// der Stub-Distanz; beim Zeichnen wird sie ausgeblendet dargestellt.
#[derive(Debug, Clone, PartialEq)]
pub struct Stub {
    /// Seite, an der der Stub hängt
    pub side: Side,
    /// Umriss `[Anker a, Anker b, Ende b, Ende a]`
    pub polygon: Vec<Vec2>,
    /// Normierte Richtung vom Anker weg
    pub direction: Vec2,
}
