//! Routen: renderbare, unveränderliche Einheiten eines Bands auf einer Detailstufe.

use crate::core::{Bounds, IdSet, LevelOfDetail};
use crate::geometry::{Area, Stub};

/// Art einer Route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// Gesamte gemeinsame Menge
    Overview,
    /// Überlappung einer Quell- mit einer Ziel-Gruppe
    Group,
    /// Genau ein Element-Paar (Marker)
    Point,
    /// Mehrere zusammengefasste Element-Paare
    List,
    /// Nicht abgebildeter Rest einer Seite
    NotMapped,
}

/// Vorberechnete Form einer Route.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteShape {
    /// Fläche bzw. Linie zwischen beiden Ankern
    Band(Area),
    /// Zwei Adapter-Flächen und die Zelle im Mosaik
    Cross {
        /// Fläche im Quell-Adapter
        source: Area,
        /// Fläche im Ziel-Adapter
        target: Area,
        /// Zelle im Mosaik
        cell: Bounds,
    },
    /// Halbe Form eines Not-Mapped-Rests
    Stub(Stub),
}

/// Eine renderbare Route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Anzeigename (Pick-Label)
    pub label: String,
    /// Art der Route
    pub kind: RouteKind,
    /// Abgedeckte IDs der Quell-Seite
    pub source_ids: IdSet,
    /// Abgedeckte IDs der Ziel-Seite
    pub target_ids: IdSet,
    /// Normierter Bereich auf der Quell-Seite
    pub source_range: Option<(f32, f32)>,
    /// Normierter Bereich auf der Ziel-Seite
    pub target_range: Option<(f32, f32)>,
    /// Geometrie
    pub shape: RouteShape,
}

impl Route {
    /// Gibt `true` zurück, wenn die Route einen Not-Mapped-Rest darstellt.
    pub fn is_stub(&self) -> bool {
        matches!(self.shape, RouteShape::Stub(_))
    }
}

/// Geordnete Routen einer Detailstufe. Der Listen-Index ist der Pick-Index.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteList {
    level: LevelOfDetail,
    routes: Vec<Route>,
}

impl RouteList {
    /// Erstellt eine Routenliste.
    pub fn new(level: LevelOfDetail, routes: Vec<Route>) -> Self {
        Self { level, routes }
    }

    /// Leere Liste für eine Stufe.
    pub fn empty(level: LevelOfDetail) -> Self {
        Self::new(level, Vec::new())
    }

    /// Stufe, für die die Liste gebaut wurde.
    pub fn level(&self) -> LevelOfDetail {
        self.level
    }

    /// Route per Pick-Index.
    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    /// Anzahl der Routen.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Gibt `true` zurück, wenn keine Route gebaut wurde.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routen in Render-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Alle Routen als Slice.
    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }
}
