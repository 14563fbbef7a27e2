//! Geteilte Konfiguration und layer-neutrale Geometrie-Helfer.
//!
//! Wird von `geometry`, `band` und `render` gleichermaßen genutzt.

pub mod curve_geometry;
pub mod options;

pub use options::BandOptions;
