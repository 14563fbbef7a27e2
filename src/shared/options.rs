//! Zentrale Konfiguration der Band-Engine.
//!
//! `BandOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Routen-Aufbau ───────────────────────────────────────────────────

/// Toleranz (Pixel), innerhalb der DETAIL-Intervalle als anschließend gelten.
pub const MERGE_EPSILON: f32 = 0.01;
/// Toleranz (Pixel), unter der Ober- und Unterkante als deckungsgleich gelten.
pub const DEGENERATE_EPSILON: f32 = 0.05;

// ── Geometrie ───────────────────────────────────────────────────────

/// Erhaltene Länge (Pixel) an jedem Ende eines gekürzten Bands.
pub const STUB_DISTANCE: f32 = 30.0;
/// Entfernung (Pixel) des virtuellen Fernpunkts für Not-Mapped-Stubs.
pub const VIRTUAL_FAR_OFFSET: f32 = 1000.0;
/// Ab dieser Anker-Distanz (Pixel) wird ein Band automatisch gekürzt.
pub const STUBIFY_MIN_LENGTH: f32 = 600.0;
/// Stützstellen pro Bézier-Kante.
pub const CURVE_SAMPLES: usize = 24;
/// Gerader Vorlauf (Pixel) an jedem Anker vor Beginn der Kurve.
pub const ANCHOR_SHIFT: f32 = 10.0;
/// Minimaler Abstand (Pixel) zwischen zwei Blöcken für ein Band.
pub const MIN_GAP: f32 = 8.0;

// ── Darstellung ─────────────────────────────────────────────────────

/// Zähler der Deckkraft-Formel `min(scale / sqrt(n), max)`.
pub const ALPHA_SCALE: f32 = 6.0;
/// Obergrenze der Deckkraft.
pub const ALPHA_MAX: f32 = 0.8;
/// Deckkraft-Faktor für Not-Mapped-Stubs.
pub const STUB_ALPHA_FACTOR: f32 = 0.5;
/// Grundfarbe der Bänder (RGBA: Grau).
pub const BAND_COLOR: [f32; 4] = [0.55, 0.55, 0.6, 1.0];
/// Farbe selektierter Anteile (RGBA: Orange).
pub const SELECTION_COLOR: [f32; 4] = [1.0, 0.45, 0.0, 1.0];
/// Farbe für Mouse-Over-Anteile (RGBA: Gelb).
pub const MOUSE_OVER_COLOR: [f32; 4] = [1.0, 0.8, 0.0, 1.0];

/// Alle zur Laufzeit änderbaren Band-Optionen.
/// Wird als `band_layout.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BandOptions {
    // ── Routen ──────────────────────────────────────────────────
    /// Merge-Toleranz auf DETAIL-Stufe (Pixel)
    pub merge_epsilon: f32,
    /// Toleranz für degenerierte (linienförmige) Flächen
    pub degenerate_epsilon: f32,

    // ── Geometrie ───────────────────────────────────────────────
    /// Erhaltene Länge an jedem Ende beim Kürzen (Pixel)
    pub stub_distance: f32,
    /// Entfernung des virtuellen Fernpunkts (Pixel)
    pub virtual_far_offset: f32,
    /// Anker-Distanz, ab der automatisch gekürzt wird (Pixel)
    pub stubify_min_length: f32,
    /// Stützstellen pro Kurve
    pub curve_samples: usize,
    /// Gerader Vorlauf an den Ankern (Pixel)
    pub anchor_shift: f32,
    /// Minimaler Blockabstand (Pixel)
    pub min_gap: f32,

    // ── Darstellung ─────────────────────────────────────────────
    /// Zähler der Deckkraft-Formel
    pub alpha_scale: f32,
    /// Maximale Deckkraft
    pub alpha_max: f32,
    /// Deckkraft-Faktor für Stubs
    #[serde(default = "default_stub_alpha_factor")]
    pub stub_alpha_factor: f32,
    /// Grundfarbe (RGBA)
    pub band_color: [f32; 4],
    /// Farbe selektierter Anteile (RGBA)
    pub selection_color: [f32; 4],
    /// Farbe für Mouse-Over (RGBA)
    pub mouse_over_color: [f32; 4],
}

impl Default for BandOptions {
    fn default() -> Self {
        Self {
            merge_epsilon: MERGE_EPSILON,
            degenerate_epsilon: DEGENERATE_EPSILON,

            stub_distance: STUB_DISTANCE,
            virtual_far_offset: VIRTUAL_FAR_OFFSET,
            stubify_min_length: STUBIFY_MIN_LENGTH,
            curve_samples: CURVE_SAMPLES,
            anchor_shift: ANCHOR_SHIFT,
            min_gap: MIN_GAP,

            alpha_scale: ALPHA_SCALE,
            alpha_max: ALPHA_MAX,
            stub_alpha_factor: STUB_ALPHA_FACTOR,
            band_color: BAND_COLOR,
            selection_color: SELECTION_COLOR,
            mouse_over_color: MOUSE_OVER_COLOR,
        }
    }
}

/// Serde-Default für `stub_alpha_factor` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_stub_alpha_factor() -> f32 {
    STUB_ALPHA_FACTOR
}

impl BandOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("band_layout"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("band_layout.toml")
    }

    /// Deckkraft eines Batches aus `route_count` gleichzeitig gezeichneten Routen.
    ///
    /// `min(alpha_scale / sqrt(n), alpha_max)`; dichte Batches werden transparenter.
    pub fn route_alpha(&self, route_count: usize) -> f32 {
        if route_count == 0 {
            return self.alpha_max;
        }
        (self.alpha_scale / (route_count as f32).sqrt()).min(self.alpha_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_route_alpha_saturates_for_small_batches() {
        let options = BandOptions::default();
        assert_relative_eq!(options.route_alpha(1), 0.8);
        assert_relative_eq!(options.route_alpha(56), 0.8);
        assert_relative_eq!(options.route_alpha(100), 0.6);
        assert_relative_eq!(options.route_alpha(400), 0.3);
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut options = BandOptions::default();
        options.stub_distance = 42.0;
        options.curve_samples = 8;

        let content = toml::to_string_pretty(&options).expect("TOML serialisierbar");
        let parsed: BandOptions = toml::from_str(&content).expect("TOML lesbar");
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_missing_stub_alpha_factor_uses_default() {
        let content = toml::to_string_pretty(&BandOptions::default()).expect("TOML");
        let legacy: String = content
            .lines()
            .filter(|line| !line.starts_with("stub_alpha_factor"))
            .map(|line| format!("{line}\n"))
            .collect();
        let parsed: BandOptions = toml::from_str(&legacy).expect("Default greift");
        assert_relative_eq!(parsed.stub_alpha_factor, STUB_ALPHA_FACTOR);
    }

    #[test]
    fn test_load_from_missing_file_falls_back_to_defaults() {
        let options = BandOptions::load_from_file(std::path::Path::new(
            "/nonexistent/band_layout.toml",
        ));
        assert_eq!(options, BandOptions::default());
    }
}
