//! Zwei-Kanten-Rahmen eines Bands (Ober- und Unterkante) und Flächenaufbau.

use super::area::{Area, Side, Stub};
use super::poly_line::{locate_length, split_at, PolyLine};
use crate::shared::curve_geometry::cumulative_lengths;
use glam::Vec2;

/// Rahmen eines Bands aus Ober- und Unterkante mit gemeinsamer Parametrisierung.
///
/// Die Oberkante verbindet die Anteile 0 beider Ankerkanten, die Unterkante
/// die Anteile 1. Punkt `i` beider Kanten teilt den Parameter `p_i`
/// (Mittel der beiden Einzel-Parametrisierungen).
#[derive(Debug, Clone, PartialEq)]
pub struct BandLine {
    top: PolyLine,
    bottom: PolyLine,
    percentages: Vec<f32>,
    valid: bool,
}

impl BandLine {
    /// Erstellt einen Rahmen. Bei ungleicher Punktanzahl, weniger als zwei
    /// Punkten oder nicht-endlichen Koordinaten ist der Rahmen ungültig.
    pub fn new(top: PolyLine, bottom: PolyLine) -> Self {
        let valid = if top.len() != bottom.len() {
            log::warn!(
                "BandLine ungültig: Ober-/Unterkante mit {} bzw. {} Punkten",
                top.len(),
                bottom.len()
            );
            false
        } else if top.len() < 2 {
            log::warn!("BandLine ungültig: weniger als zwei Punkte");
            false
        } else if !top.is_finite() || !bottom.is_finite() {
            log::warn!("BandLine ungültig: nicht-endliche Koordinaten");
            false
        } else {
            true
        };

        let percentages = if valid {
            top.percentages()
                .iter()
                .zip(bottom.percentages())
                .map(|(a, b)| (a + b) * 0.5)
                .collect()
        } else {
            Vec::new()
        };

        Self {
            top,
            bottom,
            percentages,
            valid,
        }
    }

    /// Gerader Rahmen zwischen zwei Ankerkanten `(Anteil 0, Anteil 1)`.
    pub fn straight(source_edge: (Vec2, Vec2), target_edge: (Vec2, Vec2)) -> Self {
        Self::new(
            PolyLine::new(vec![source_edge.0, target_edge.0], 0),
            PolyLine::new(vec![source_edge.1, target_edge.1], 0),
        )
    }

    /// Oberkante.
    pub fn top(&self) -> &PolyLine {
        &self.top
    }

    /// Unterkante.
    pub fn bottom(&self) -> &PolyLine {
        &self.bottom
    }

    /// Gemeinsame Parametrisierung.
    pub fn percentages(&self) -> &[f32] {
        &self.percentages
    }

    /// Gibt `false` zurück, wenn der Rahmen beim Rendern übersprungen werden muss.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Gibt `true` zurück, wenn der Rahmen gekürzt wurde.
    pub fn is_stubbed(&self) -> bool {
        self.top.is_stubbed()
    }

    /// Mittlere Länge beider Kanten.
    pub fn length(&self) -> f32 {
        (self.top.length() + self.bottom.length()) * 0.5
    }

    /// Interpolierte Linie zwischen Quell-Anteil `v0` und Ziel-Anteil `v1`.
    ///
    /// Punkt `i` = lerp(top_i, bottom_i, v0 + (v1 − v0)·p_i).
    pub fn compute_line(&self, v0: f32, v1: f32) -> PolyLine {
        let points = self
            .top
            .points()
            .iter()
            .zip(self.bottom.points())
            .zip(&self.percentages)
            .map(|((top, bottom), p)| top.lerp(*bottom, v0 + (v1 - v0) * p))
            .collect();
        PolyLine::from_parts(points, self.percentages.clone(), self.top.gap_after())
    }

    /// Fläche zwischen den Quell-Anteilen `(s1, s2)` und den Ziel-Anteilen `(t1, t2)`.
    ///
    /// Liegen Ober- und Unterkante an beiden Enden innerhalb `epsilon`
    /// aufeinander, entsteht eine Linie statt einer Fläche.
    pub fn compute_area(&self, s1: f32, s2: f32, t1: f32, t2: f32, epsilon: f32) -> Area {
        let top = self.compute_line(s1.min(s2), t1.min(t2));
        let bottom = self.compute_line(s1.max(s2), t1.max(t2));

        let coincide = |a: Option<Vec2>, b: Option<Vec2>| match (a, b) {
            (Some(a), Some(b)) => a.distance(b) <= epsilon,
            _ => true,
        };
        if coincide(top.first(), bottom.first()) && coincide(top.last(), bottom.last()) {
            return Area::Stroked(top.segments().iter().map(|run| run.to_vec()).collect());
        }

        let polygons = top
            .segments()
            .iter()
            .zip(bottom.segments())
            .map(|(upper, lower)| {
                let mut polygon = Vec::with_capacity(upper.len() + lower.len());
                polygon.extend_from_slice(upper);
                polygon.extend(lower.iter().rev());
                polygon
            })
            .collect();
        Area::Filled(polygons)
    }

    /// Kürzt beide Kanten synchron auf `distance` (Bogenlänge) an jedem Ende.
    ///
    /// Geschnitten wird auf der mittleren kumulierten Länge beider Kanten,
    /// damit Ober- und Unterkante dieselben Punkt-Indizes behalten.
    pub fn stubify(&self, distance: f32) -> BandLine {
        if !self.valid || self.is_stubbed() || distance <= 0.0 {
            return self.clone();
        }
        let cumulative: Vec<f32> = cumulative_lengths(self.top.points())
            .iter()
            .zip(cumulative_lengths(self.bottom.points()))
            .map(|(top, bottom)| (top + bottom) * 0.5)
            .collect();
        let length = cumulative.last().copied().unwrap_or(0.0);
        if length <= 2.0 * distance {
            return self.clone();
        }
        let (Some(head), Some(tail)) = (
            locate_length(&cumulative, distance),
            locate_length(&cumulative, length - distance),
        ) else {
            return self.clone();
        };

        let (top_points, pct, gap) = split_at(self.top.points(), &self.percentages, head, tail);
        let (bottom_points, _, _) = split_at(self.bottom.points(), &self.percentages, head, tail);

        Self {
            top: PolyLine::from_parts(top_points, pct.clone(), gap),
            bottom: PolyLine::from_parts(bottom_points, pct.clone(), gap),
            percentages: pct,
            valid: true,
        }
    }

    /// Halbe Form für den nicht abgebildeten Bereich `[f1, f2]` einer Seite.
    ///
    /// Die Form läuft von der Ankerkante Richtung eines virtuellen Fernpunkts
    /// im Abstand `far_offset` und wird nach `distance` abgeschnitten.
    pub fn compute_stub(
        &self,
        side: Side,
        f1: f32,
        f2: f32,
        far_offset: f32,
        distance: f32,
    ) -> Option<Stub> {
        if !self.valid {
            return None;
        }
        let top = self.top.points();
        let bottom = self.bottom.points();
        let (anchor_index, next_index) = match side {
            Side::Source => (0, 1),
            Side::Target => (top.len() - 1, top.len() - 2),
        };

        let a = top[anchor_index].lerp(bottom[anchor_index], f1);
        let b = top[anchor_index].lerp(bottom[anchor_index], f2);
        let anchor_mid = (top[anchor_index] + bottom[anchor_index]) * 0.5;
        let next_mid = (top[next_index] + bottom[next_index]) * 0.5;
        let direction = (next_mid - anchor_mid)
            .try_normalize()
            .or_else(|| (bottom[anchor_index] - top[anchor_index]).perp().try_normalize())?;

        let far_line = PolyLine::new(vec![Vec2::ZERO, direction * far_offset], 0);
        let reach = far_line.truncate(distance).last()?;

        Some(Stub {
            side,
            polygon: vec![a, b, b + reach, a + reach],
            direction,
        })
    }
}

#[cfg(test)]
mod tests;
