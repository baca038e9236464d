//! Kubische Hermite-Splines über N-dimensionale Keyframe-Daten.
//!
//! Jeder Keyframe speichert pro Kanal ein Tripel (In-Tangente, Wert,
//! Out-Tangente). Die Tangenten sind bereits auf die normierte
//! Segment-Zeit `t ∈ [0, 1]` skaliert, die Auswertung braucht daher nur
//! die Hermite-Basisfunktionen.

use anyhow::bail;

/// Kubischer Spline über monoton steigende Keyframe-Zeiten.
///
/// `knots` hat die Länge `times.len() * dim * 3`. Nach der Konstruktion
/// werden weder `times` noch `knots` verändert.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    times: Vec<f64>,
    knots: Vec<f64>,
    dim: usize,
}

impl CubicSpline {
    /// Erstellt einen Spline aus fertigen Knot-Tripeln.
    ///
    /// Erwartet mindestens zwei Zeiten; 0/1 Keyframes behandelt der Aufrufer.
    pub fn new(times: Vec<f64>, knots: Vec<f64>) -> Self {
        let dim = if times.is_empty() {
            0
        } else {
            knots.len() / times.len() / 3
        };
        debug_assert_eq!(knots.len(), times.len() * dim * 3);
        Self { times, knots, dim }
    }

    /// Anzahl der Kanäle pro Keyframe.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Keyframe-Zeiten.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Knot-Tripel (In-Tangente, Wert, Out-Tangente) pro Kanal und Keyframe.
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Wertet den Spline zur Zeit `time` aus und schreibt `dim` Werte nach `out`.
    ///
    /// Außerhalb des Keyframe-Bereichs wird auf den ersten bzw. letzten
    /// Keyframe geklemmt.
    pub fn evaluate(&self, time: f64, out: &mut [f64]) {
        let Some(last) = self.times.len().checked_sub(1) else {
            return;
        };

        if time <= self.times[0] {
            self.knot_value(0, out);
        } else if time >= self.times[last] {
            self.knot_value(last, out);
        } else {
            let mut seg = 0;
            while time >= self.times[seg + 1] {
                seg += 1;
            }
            let t = (time - self.times[seg]) / (self.times[seg + 1] - self.times[seg]);
            self.evaluate_segment(seg, t, out);
        }
    }

    /// Bequemlichkeits-Variante von [`evaluate`](Self::evaluate) mit eigenem Puffer.
    pub fn evaluate_vec(&self, time: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        self.evaluate(time, &mut out);
        out
    }

    /// Kopiert die Werte des Keyframes `index` nach `out`.
    pub fn knot_value(&self, index: usize, out: &mut [f64]) {
        let base = index * 3 * self.dim;
        for (channel, slot) in out.iter_mut().take(self.dim).enumerate() {
            *slot = self.knots[base + channel * 3 + 1];
        }
    }

    /// Hermite-Auswertung eines Segments bei normierter Zeit `t`.
    fn evaluate_segment(&self, segment: usize, t: f64, out: &mut [f64]) {
        let dim = self.dim;
        let t2 = t * t;
        let two_t = t + t;
        let omt = 1.0 - t;
        let omt2 = omt * omt;

        let h00 = (1.0 + two_t) * omt2;
        let h10 = t * omt2;
        let h01 = t2 * (3.0 - two_t);
        let h11 = t2 * (t - 1.0);

        let mut idx = segment * 3 * dim;
        for slot in out.iter_mut().take(dim) {
            let p0 = self.knots[idx + 1];
            let m0 = self.knots[idx + 2];
            let m1 = self.knots[idx + 3 * dim];
            let p1 = self.knots[idx + 3 * dim + 1];
            idx += 3;

            *slot = p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11;
        }
    }

    /// Berechnet die Knot-Tripel für die interpolierenden Punkte.
    ///
    /// `points` enthält `times.len() * dim` Werte (keyframe-major).
    /// `smoothness` skaliert alle Tangenten: 0 = keine Tangenten (Ease-In/Out
    /// zwischen den Keyframes, kein Überschwingen), 1 = volle Catmull-Rom-Glättung.
    pub fn calc_knots(times: &[f64], points: &[f64], smoothness: f64) -> Vec<f64> {
        let n = times.len();
        if n == 0 {
            return Vec::new();
        }
        let dim = points.len() / n;
        let mut knots = vec![0.0; n * dim * 3];

        for i in 0..n {
            let t = times[i];
            let (in_scale, out_scale) = segment_scales(times, i);

            for j in 0..dim {
                let idx = i * dim + j;
                let p = points[idx];

                let tangent = if n < 2 {
                    0.0
                } else if i == 0 {
                    (points[idx + dim] - p) / (times[i + 1] - t)
                } else if i == n - 1 {
                    (p - points[idx - dim]) / (t - times[i - 1])
                } else {
                    (points[idx + dim] - points[idx - dim]) / (times[i + 1] - times[i - 1])
                };

                knots[idx * 3] = tangent * in_scale * smoothness;
                knots[idx * 3 + 1] = p;
                knots[idx * 3 + 2] = tangent * out_scale * smoothness;
            }
        }

        knots
    }

    /// Erstellt einen Spline, der exakt durch `points` läuft.
    pub fn from_points(times: &[f64], points: &[f64], smoothness: f64) -> Self {
        Self::new(times.to_vec(), Self::calc_knots(times, points, smoothness))
    }

    /// Erstellt einen geschlossenen Spline über eine Timeline der Länge `length`.
    ///
    /// Die letzten zwei Keyframes werden um `-length` verschoben vorangestellt,
    /// die ersten zwei um `+length` verschoben angehängt. Dadurch stimmen
    /// Werte und Tangenten am Übergang `length → 0` überein.
    pub fn from_points_looping(length: f64, times: &[f64], points: &[f64], smoothness: f64) -> Self {
        if times.len() < 2 {
            return Self::from_points(times, points, smoothness);
        }

        let n = times.len();
        let dim = points.len() / n;

        let mut looped_times = Vec::with_capacity(n + 4);
        looped_times.push(times[n - 2] - length);
        looped_times.push(times[n - 1] - length);
        looped_times.extend_from_slice(times);
        looped_times.push(times[0] + length);
        looped_times.push(times[1] + length);

        let mut looped_points = Vec::with_capacity(points.len() + 4 * dim);
        looped_points.extend_from_slice(&points[points.len() - 2 * dim..]);
        looped_points.extend_from_slice(points);
        looped_points.extend_from_slice(&points[..2 * dim]);

        Self::from_points(&looped_times, &looped_points, smoothness)
    }

    /// Erstellt einen natürlichen, C2-stetigen kubischen Spline.
    ///
    /// Die Tangenten ergeben sich aus dem tridiagonalen System der zweiten
    /// Ableitungen (Randbedingung M[0] = M[n-1] = 0). Doppelte Zeiten sind
    /// hier ein Fehler, weil die Steigungen vorab berechnet werden.
    pub fn from_points_c2(times: &[f64], points: &[f64]) -> anyhow::Result<Self> {
        let n = times.len();
        if n < 2 {
            return Ok(Self::from_points(times, points, 1.0));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] - w[0] == 0.0) {
            bail!("Keyframes {} und {} haben dieselbe Zeit {}", i, i + 1, times[i]);
        }

        let dim = points.len() / n;
        let mut knots = vec![0.0; n * dim * 3];
        let mut channel = vec![0.0; n];

        for j in 0..dim {
            for (i, value) in channel.iter_mut().enumerate() {
                *value = points[i * dim + j];
            }
            let tangents = natural_tangents(times, &channel);

            for i in 0..n {
                let (in_scale, out_scale) = segment_scales(times, i);
                let idx = i * dim + j;
                knots[idx * 3] = tangents[i] * in_scale;
                knots[idx * 3 + 1] = channel[i];
                knots[idx * 3 + 2] = tangents[i] * out_scale;
            }
        }

        Ok(Self::new(times.to_vec(), knots))
    }
}

/// Dauer des vorherigen bzw. nächsten Segments eines Keyframes.
///
/// Am Rand wird das jeweils einzige angrenzende Segment verwendet.
fn segment_scales(times: &[f64], i: usize) -> (f64, f64) {
    let n = times.len();
    if n < 2 {
        return (0.0, 0.0);
    }
    let in_scale = if i > 0 {
        times[i] - times[i - 1]
    } else {
        times[1] - times[0]
    };
    let out_scale = if i < n - 1 {
        times[i + 1] - times[i]
    } else {
        times[i] - times[i - 1]
    };
    (in_scale, out_scale)
}

/// Erste Ableitungen eines natürlichen kubischen Splines (Thomas-Algorithmus).
fn natural_tangents(times: &[f64], values: &[f64]) -> Vec<f64> {
    let n = times.len();

    let h: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
    let d: Vec<f64> = (0..n - 1)
        .map(|i| (values[i + 1] - values[i]) / h[i])
        .collect();

    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut c = vec![0.0; n];
    let mut r = vec![0.0; n];

    b[0] = 1.0;
    for i in 1..n - 1 {
        a[i] = h[i - 1] / 6.0;
        b[i] = (h[i - 1] + h[i]) / 3.0;
        c[i] = h[i] / 6.0;
        r[i] = d[i] - d[i - 1];
    }
    b[n - 1] = 1.0;

    for i in 1..n {
        let w = a[i] / b[i - 1];
        b[i] -= w * c[i - 1];
        r[i] -= w * r[i - 1];
    }

    let mut m = vec![0.0; n];
    m[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        m[i] = (r[i] - c[i] * m[i + 1]) / b[i];
    }

    let mut tangents = vec![0.0; n];
    for i in 0..n - 1 {
        tangents[i] = d[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0;
    }
    tangents[n - 1] = d[n - 2] + h[n - 2] * (2.0 * m[n - 1] + m[n - 2]) / 6.0;
    tangents
}
