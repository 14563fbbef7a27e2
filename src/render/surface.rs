//! Abstrakte Zeichenfläche, gegen die Bands gerendert werden.

use glam::Vec2;

/// Zeichen-Primitiven des Host-Toolkits.
pub trait DrawSurface {
    /// Setzt die Farbe für alle folgenden Primitiven (RGBA).
    fn set_color(&mut self, rgba: [f32; 4]);

    /// Füllt ein Polygon.
    fn fill_polygon(&mut self, points: &[Vec2]);

    /// Zeichnet einen Pfad, optional geschlossen.
    fn draw_path(&mut self, points: &[Vec2], closed: bool);

    /// Zeichnet einen Punkt-Marker.
    fn draw_point(&mut self, point: Vec2);

    /// Beginnt im Pick-Pass die Primitiven der Route mit Listen-Index `index`.
    fn begin_pick(&mut self, _index: usize) {}
}

/// Render-Durchgang eines Frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    /// Farbiger Durchgang inkl. Selektions-Tönung
    Paint,
    /// Hit-Test-Durchgang; jede Route wird mit ihrem Listen-Index markiert
    Pick,
}
