//! Reine Geometrie-Funktionen für Band-Kanten (Bézier-Sampling, Polylinien).
//!
//! Layer-neutral: wird von `geometry` und `band` importiert, ohne
//! Zirkel-Abhängigkeiten zu erzeugen.

use glam::Vec2;

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// Tastet eine kubische Bézier-Kurve mit `samples` Segmenten gleichmäßig in t ab.
///
/// Liefert `samples + 1` Punkte; erster und letzter Punkt sind exakt P0 bzw. P3.
pub fn sample_cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, samples: usize) -> Vec<Vec2> {
    let samples = samples.max(1);
    let mut result = Vec::with_capacity(samples + 1);
    result.push(p0);
    for i in 1..samples {
        let t = i as f32 / samples as f32;
        result.push(cubic_bezier(p0, p1, p2, p3, t));
    }
    result.push(p3);
    result
}

/// Kante mit geradem Vorlauf an beiden Ankern und Bézier-Bogen dazwischen.
///
/// `start_dir`/`end_dir` zeigen jeweils vom Anker weg ins Band hinein.
/// `bulge` ist der Abstand der Kontrollpunkte vom jeweiligen Vorlauf-Ende.
/// Ergebnis: `[start, start + shift, Bogen …, end + shift, end]`.
pub fn anchored_curve(
    start: Vec2,
    start_dir: Vec2,
    end: Vec2,
    end_dir: Vec2,
    shift: f32,
    bulge: f32,
    samples: usize,
) -> Vec<Vec2> {
    let shifted_start = start + start_dir * shift;
    let shifted_end = end + end_dir * shift;
    let cp1 = shifted_start + start_dir * bulge;
    let cp2 = shifted_end + end_dir * bulge;

    let mut points = Vec::with_capacity(samples + 3);
    points.push(start);
    points.extend(sample_cubic(shifted_start, cp1, cp2, shifted_end, samples));
    points.push(end);
    points
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Kumulierte Distanzen entlang einer Polyline (erster Eintrag 0).
pub fn cumulative_lengths(points: &[Vec2]) -> Vec<f32> {
    let mut result = Vec::with_capacity(points.len());
    let mut acc = 0.0f32;
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            acc += points[i - 1].distance(*point);
        }
        result.push(acc);
    }
    result
}
