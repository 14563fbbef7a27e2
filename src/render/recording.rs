//! Zeichenfläche, die alle Aufrufe als Befehle aufzeichnet.

use super::surface::DrawSurface;
use glam::Vec2;

/// Ein aufgezeichneter Zeichenbefehl.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Farbwechsel
    SetColor([f32; 4]),
    /// Gefülltes Polygon
    FillPolygon(Vec<Vec2>),
    /// Pfad
    DrawPath {
        /// Stützpunkte
        points: Vec<Vec2>,
        /// Geschlossen?
        closed: bool,
    },
    /// Punkt-Marker
    DrawPoint(Vec2),
    /// Beginn einer Route im Pick-Pass
    BeginPick(usize),
}

impl DrawCommand {
    /// Gibt `true` zurück, wenn der Befehl Geometrie erzeugt.
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            Self::FillPolygon(_) | Self::DrawPath { .. } | Self::DrawPoint(_)
        )
    }
}

/// Zeichnet Befehle auf, statt sie auszuführen.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Leere Aufzeichnung.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alle Befehle in Reihenfolge.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Nur geometrieerzeugende Befehle.
    pub fn geometry(&self) -> Vec<&DrawCommand> {
        self.commands.iter().filter(|c| c.is_geometry()).collect()
    }

    /// Verwirft alle Befehle.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn set_color(&mut self, rgba: [f32; 4]) {
        self.commands.push(DrawCommand::SetColor(rgba));
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        self.commands.push(DrawCommand::FillPolygon(points.to_vec()));
    }

    fn draw_path(&mut self, points: &[Vec2], closed: bool) {
        self.commands.push(DrawCommand::DrawPath {
            points: points.to_vec(),
            closed,
        });
    }

    fn draw_point(&mut self, point: Vec2) {
        self.commands.push(DrawCommand::DrawPoint(point));
    }

    fn begin_pick(&mut self, index: usize) {
        self.commands.push(DrawCommand::BeginPick(index));
    }
}
