//! Achsenparallele Rechtecke und Block-Ausrichtung in Screen-Koordinaten.

use glam::Vec2;

/// Richtung, entlang der die Elemente eines Blocks angeordnet sind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Elemente liegen nebeneinander entlang X
    Horizontal,
    /// Elemente liegen untereinander entlang Y
    Vertical,
}

impl Axis {
    /// Die orthogonale Achse.
    pub fn perpendicular(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Einheitsvektor entlang der Achse.
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::X,
            Self::Vertical => Vec2::Y,
        }
    }

    /// Komponente eines Punkts entlang der Achse.
    pub fn component(self, point: Vec2) -> f32 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }
}

/// Seite eines Rechtecks quer zur Element-Achse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    /// Kante mit kleinerer Koordinate (links bzw. oben)
    Min,
    /// Kante mit größerer Koordinate (rechts bzw. unten)
    Max,
}

/// Achsenparalleles Rechteck (min inklusiv, max inklusiv).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Linke obere Ecke
    pub min: Vec2,
    /// Rechte untere Ecke
    pub max: Vec2,
}

impl Bounds {
    /// Erstellt ein Rechteck; die Ecken werden normalisiert.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Rechteck aus Ursprung und Größe.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Mittelpunkt.
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Gibt `true` zurück, wenn alle Koordinaten endlich sind.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Intervall `(min, max)` entlang einer Achse.
    pub fn span(&self, axis: Axis) -> (f32, f32) {
        (axis.component(self.min), axis.component(self.max))
    }

    /// Länge entlang einer Achse.
    pub fn extent(&self, axis: Axis) -> f32 {
        let (lo, hi) = self.span(axis);
        hi - lo
    }

    /// Abstand zweier Rechtecke entlang einer Achse.
    ///
    /// Positiv bei Lücke, negativ bei Überlappung.
    pub fn separation(&self, other: &Bounds, axis: Axis) -> f32 {
        let (a_lo, a_hi) = self.span(axis);
        let (b_lo, b_hi) = other.span(axis);
        (b_lo - a_hi).max(a_lo - b_hi)
    }

    /// Liegt `other` entlang der Achse auf der Max-Seite von `self`?
    pub fn is_before(&self, other: &Bounds, axis: Axis) -> bool {
        axis.component(other.center()) >= axis.component(self.center())
    }

    /// Kante quer zu `axis` als Segment `(Anteil 0, Anteil 1)`.
    ///
    /// Für einen vertikalen Block liegt die Kante bei `x = min/max` und
    /// läuft von oben nach unten.
    pub fn edge(&self, axis: Axis, side: EdgeSide) -> (Vec2, Vec2) {
        match (axis, side) {
            (Axis::Vertical, EdgeSide::Min) => (self.min, Vec2::new(self.min.x, self.max.y)),
            (Axis::Vertical, EdgeSide::Max) => (Vec2::new(self.max.x, self.min.y), self.max),
            (Axis::Horizontal, EdgeSide::Min) => (self.min, Vec2::new(self.max.x, self.min.y)),
            (Axis::Horizontal, EdgeSide::Max) => (Vec2::new(self.min.x, self.max.y), self.max),
        }
    }

    /// Eckpunkte im Uhrzeigersinn (für Polygon-Ausgabe).
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}

/// Nach außen zeigende Normale einer Kante quer zu `axis`.
pub fn edge_normal(axis: Axis, side: EdgeSide) -> Vec2 {
    let normal = axis.perpendicular().unit();
    match side {
        EdgeSide::Min => -normal,
        EdgeSide::Max => normal,
    }
}
