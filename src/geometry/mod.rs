//! Band-Geometrie: parametrisierte Polylinien, Zwei-Kanten-Rahmen,
//! Flächen, Stubs und Kreuz-Geometrie.

pub mod area;
pub mod band_line;
pub mod cross;
pub mod poly_line;

pub use area::{Area, Side, Stub};
pub use band_line::BandLine;
pub use cross::CrossGeometry;
pub use poly_line::PolyLine;
