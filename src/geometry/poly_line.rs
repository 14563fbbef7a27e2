//! Polylinie mit Distanz-Parametrisierung (0..1) und Kürzung ("stubify").

use crate::shared::curve_geometry::cumulative_lengths;
use glam::Vec2;

/// Polylinie, deren Punkte über die kumulierte Distanz auf 0..1 parametrisiert sind.
///
/// Nach einer Kürzung besteht die Linie aus zwei Läufen; `gap_after` markiert
/// den letzten Punkt des ersten Laufs. Die Parametrisierung der erhaltenen
/// Punkte bleibt dabei unverändert.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyLine {
    points: Vec<Vec2>,
    percentages: Vec<f32>,
    length: f32,
    gap_after: Option<usize>,
}

impl PolyLine {
    /// Erstellt eine Polylinie.
    ///
    /// Die ersten/letzten `fix_first_last` Punkte werden exakt auf 0 bzw. 1
    /// gepinnt (gerader Vorlauf an den Ankern); die Punkte dazwischen werden
    /// auf den verbleibenden Abschnitt normiert.
    pub fn new(points: Vec<Vec2>, fix_first_last: usize) -> Self {
        let n = points.len();
        let cumulative = cumulative_lengths(&points);
        let length = cumulative.last().copied().unwrap_or(0.0);

        let fix = fix_first_last.min(n / 2);
        let (lo_index, hi_index) = if fix > 0 && n > 1 {
            (fix - 1, n - fix)
        } else {
            (0, n.saturating_sub(1))
        };

        let lo = cumulative.get(lo_index).copied().unwrap_or(0.0);
        let hi = cumulative.get(hi_index).copied().unwrap_or(0.0);
        let span = hi - lo;

        let percentages = (0..n)
            .map(|i| {
                if i <= lo_index {
                    0.0
                } else if i >= hi_index {
                    1.0
                } else if span > f32::EPSILON {
                    ((cumulative[i] - lo) / span).clamp(0.0, 1.0)
                } else {
                    (i - lo_index) as f32 / (hi_index - lo_index) as f32
                }
            })
            .collect();

        Self {
            points,
            percentages,
            length,
            gap_after: None,
        }
    }

    /// Baut eine Polylinie aus bereits parametrisierten Punkten.
    pub(crate) fn from_parts(
        points: Vec<Vec2>,
        percentages: Vec<f32>,
        gap_after: Option<usize>,
    ) -> Self {
        let length = match gap_after {
            Some(gap) if gap + 1 < points.len() => {
                crate::shared::curve_geometry::polyline_length(&points[..=gap])
                    + crate::shared::curve_geometry::polyline_length(&points[gap + 1..])
            }
            _ => crate::shared::curve_geometry::polyline_length(&points),
        };
        Self {
            points,
            percentages,
            length,
            gap_after,
        }
    }

    /// Alle Punkte.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Parametrisierung jedes Punkts (0..1, monoton steigend).
    pub fn percentages(&self) -> &[f32] {
        &self.percentages
    }

    /// Anzahl der Punkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück, wenn die Linie keine Punkte hat.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gezeichnete Länge (ohne Lücke).
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Erster Punkt.
    pub fn first(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// Letzter Punkt.
    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Gibt `true` zurück, wenn die Linie gekürzt wurde.
    pub fn is_stubbed(&self) -> bool {
        self.gap_after.is_some()
    }

    /// Index des letzten Punkts vor der Lücke.
    pub fn gap_after(&self) -> Option<usize> {
        self.gap_after
    }

    /// Gibt `true` zurück, wenn alle Koordinaten endlich sind.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Zusammenhängende Punkt-Läufe (einer, nach Kürzung zwei).
    pub fn segments(&self) -> Vec<&[Vec2]> {
        match self.gap_after {
            Some(gap) if gap + 1 < self.points.len() => {
                vec![&self.points[..=gap], &self.points[gap + 1..]]
            }
            _ => vec![&self.points[..]],
        }
    }

    /// Interpolierter Punkt bei Parameter `percentage`.
    pub fn point_at(&self, percentage: f32) -> Option<Vec2> {
        interpolate(&self.points, &self.percentages, percentage)
    }

    /// Kürzt die Linie auf die Abschnitte innerhalb `distance` (Bogenlänge)
    /// von beiden Enden.
    ///
    /// An den Schnittstellen werden Punkt und Parameter interpoliert; erster
    /// und letzter Punkt bleiben exakt erhalten. Ist die Linie nicht länger
    /// als `2 × distance`, bleibt sie unverändert.
    pub fn stubify(&self, distance: f32) -> PolyLine {
        if self.gap_after.is_some() || distance <= 0.0 || self.length <= 2.0 * distance {
            return self.clone();
        }
        let cumulative = cumulative_lengths(&self.points);
        let (Some(head), Some(tail)) = (
            locate_length(&cumulative, distance),
            locate_length(&cumulative, self.length - distance),
        ) else {
            return self.clone();
        };
        let (points, percentages, gap) = split_at(&self.points, &self.percentages, head, tail);
        Self::from_parts(points, percentages, gap)
    }

    /// Behält nur den Abschnitt innerhalb `distance` (Bogenlänge) vom Start.
    pub fn truncate(&self, distance: f32) -> PolyLine {
        let cumulative = cumulative_lengths(&self.points);
        let Some(cut) = locate_length(&cumulative, distance) else {
            return self.clone();
        };
        let mut points = self.points[..=cut.segment].to_vec();
        let mut percentages = self.percentages[..=cut.segment].to_vec();
        if cut.t > 0.0 {
            let (point, pct) = lerp_at(&self.points, &self.percentages, cut);
            points.push(point);
            percentages.push(pct);
        }
        Self::from_parts(points, percentages, None)
    }
}

/// Lineare Interpolation auf einer parametrisierten Punktliste.
fn interpolate(points: &[Vec2], percentages: &[f32], percentage: f32) -> Option<Vec2> {
    let first = *points.first()?;
    let last = *points.last()?;
    let idx = percentages.partition_point(|&p| p < percentage);
    if idx == 0 {
        return Some(first);
    }
    if idx >= points.len() {
        return Some(last);
    }
    let span = percentages[idx] - percentages[idx - 1];
    if span <= f32::EPSILON {
        return Some(points[idx]);
    }
    let t = (percentage - percentages[idx - 1]) / span;
    Some(points[idx - 1].lerp(points[idx], t))
}

/// Stelle auf einer Punktliste: Segment `segment → segment + 1` bei Anteil `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CutPoint {
    pub segment: usize,
    pub t: f32,
}

/// Stelle bei kumulierter Länge `at`; `None` außerhalb von `(0, Gesamtlänge)`.
pub(crate) fn locate_length(cumulative: &[f32], at: f32) -> Option<CutPoint> {
    let total = *cumulative.last()?;
    if !(at > 0.0 && at < total) {
        return None;
    }
    let next = cumulative.partition_point(|&c| c <= at);
    let (start, end) = (cumulative[next - 1], cumulative[next]);
    Some(CutPoint {
        segment: next - 1,
        t: (at - start) / (end - start),
    })
}

/// Interpolierter Punkt und Parameter an einer Schnittstelle.
fn lerp_at(points: &[Vec2], percentages: &[f32], cut: CutPoint) -> (Vec2, f32) {
    let (i, j) = (cut.segment, cut.segment + 1);
    let point = points[i].lerp(points[j], cut.t);
    let pct = percentages[i] + (percentages[j] - percentages[i]) * cut.t;
    (point, pct)
}

/// Entfernt den Abschnitt zwischen `head` und `tail` einer parametrisierten Punktliste.
///
/// Liefert Punkte, Parameter und den Index des letzten Punkts vor der Lücke.
/// `head` muss vor `tail` liegen.
pub(crate) fn split_at(
    points: &[Vec2],
    percentages: &[f32],
    head: CutPoint,
    tail: CutPoint,
) -> (Vec<Vec2>, Vec<f32>, Option<usize>) {
    let mut out_points = Vec::with_capacity(points.len() + 2);
    let mut out_pct = Vec::with_capacity(points.len() + 2);

    out_points.extend_from_slice(&points[..=head.segment]);
    out_pct.extend_from_slice(&percentages[..=head.segment]);
    if head.t > 0.0 {
        let (point, pct) = lerp_at(points, percentages, head);
        out_points.push(point);
        out_pct.push(pct);
    }
    let gap_after = out_points.len().checked_sub(1);

    if tail.t < 1.0 {
        let (point, pct) = lerp_at(points, percentages, tail);
        out_points.push(point);
        out_pct.push(pct);
    }
    out_points.extend_from_slice(&points[tail.segment + 1..]);
    out_pct.extend_from_slice(&percentages[tail.segment + 1..]);

    (out_points, out_pct, gap_after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight(len: f32, segments: usize) -> PolyLine {
        let points = (0..=segments)
            .map(|i| Vec2::new(len * i as f32 / segments as f32, 0.0))
            .collect();
        PolyLine::new(points, 0)
    }

    #[test]
    fn test_percentages_follow_cumulative_distance() {
        let line = PolyLine::new(
            vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 30.0)],
            0,
        );
        assert_relative_eq!(line.length(), 40.0);
        assert_relative_eq!(line.percentages()[1], 0.25);
        assert_relative_eq!(line.percentages()[2], 1.0);
    }

    #[test]
    fn test_fix_first_last_pins_lead_in() {
        let line = PolyLine::new(
            vec![
                Vec2::ZERO,
                Vec2::new(10.0, 0.0),
                Vec2::new(20.0, 0.0),
                Vec2::new(30.0, 0.0),
                Vec2::new(40.0, 0.0),
            ],
            2,
        );
        assert_eq!(line.percentages(), &[0.0, 0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_point_at_interpolates() {
        let line = straight(100.0, 4);
        let point = line.point_at(0.6).expect("Punkt erwartet");
        assert_relative_eq!(point.x, 60.0, epsilon = 1e-4);
        assert_eq!(line.point_at(-1.0), Some(Vec2::ZERO));
        assert_eq!(line.point_at(2.0), Some(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_stubify_keeps_endpoints_and_cuts_middle() {
        let line = straight(200.0, 10);
        let stub = line.stubify(30.0);

        assert!(stub.is_stubbed());
        assert_eq!(stub.first(), line.first());
        assert_eq!(stub.last(), line.last());

        let segments = stub.segments();
        assert_eq!(segments.len(), 2);
        let head_end = *segments[0].last().unwrap();
        let tail_start = segments[1][0];
        assert_relative_eq!(head_end.x, 30.0, epsilon = 1e-3);
        assert_relative_eq!(tail_start.x, 170.0, epsilon = 1e-3);
        assert_relative_eq!(stub.length(), 60.0, epsilon = 1e-3);
    }

    #[test]
    fn test_stubify_cuts_by_arc_length_with_pinned_lead_in() {
        let xs = [0.0, 10.0, 30.0, 50.0, 70.0, 90.0, 110.0, 130.0, 150.0, 170.0, 190.0, 200.0];
        let line = PolyLine::new(xs.iter().map(|&x| Vec2::new(x, 0.0)).collect(), 2);
        let stub = line.stubify(30.0);

        let segments = stub.segments();
        assert_eq!(segments.len(), 2);
        assert_relative_eq!(segments[0].last().map_or(0.0, |p| p.x), 30.0, epsilon = 1e-3);
        assert_relative_eq!(segments[1][0].x, 170.0, epsilon = 1e-3);
        assert_relative_eq!(stub.length(), 60.0, epsilon = 1e-3);

        let pct = stub.percentages();
        assert!(pct.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(pct[0], 0.0);
        assert_eq!(pct[pct.len() - 1], 1.0);
    }

    #[test]
    fn test_stubify_short_line_is_unchanged() {
        let line = straight(50.0, 5);
        assert_eq!(line.stubify(30.0), line);
    }

    #[test]
    fn test_truncate_keeps_start_portion() {
        let line = PolyLine::new(vec![Vec2::ZERO, Vec2::new(1000.0, 0.0)], 0);
        let stub = line.truncate(30.0);
        assert_eq!(stub.len(), 2);
        assert_eq!(stub.first(), Some(Vec2::ZERO));
        assert_relative_eq!(stub.last().unwrap().x, 30.0, epsilon = 1e-3);
    }
}
