//! Abgeleitete Geometrie: Fläche, Planarität, Teilflächen aus Bruchkanten.
//!
//! Wird bei jeder Abfrage frisch aus Punkten und Bruchkanten berechnet.

use super::state::{AreaMeasurementTool, Breakline, SplitAreas};
use crate::core::polygon::{self, Edge, Planarity, TriangulatedArea};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Teilfläche eines durch Bruchkanten zerlegten Polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Punkt-Indizes der Teilfläche in Umlaufreihenfolge
    pub indices: Vec<usize>,
    /// Fläche der Teilfläche
    pub area: f64,
    /// Abweichung von der Ausgleichsebene
    pub planarity: Option<Planarity>,
    /// `false`, wenn das Ear-Clipping Ecken übrig ließ
    pub complete: bool,
}

/// Zerlegt einen Index-Zyklus an den Positionen von `i` und `j`.
///
/// Beide Teilzyklen enthalten die Bruchkante als Kante. `None`, wenn einer
/// der Endpunkte nicht im Zyklus liegt.
pub fn split_loop(seq: &[usize], i: usize, j: usize) -> Option<(Vec<usize>, Vec<usize>)> {
    let pi = seq.iter().position(|&k| k == i)?;
    let pj = seq.iter().position(|&k| k == j)?;
    let (lo, hi) = if pi <= pj { (pi, pj) } else { (pj, pi) };

    let first = seq[lo..=hi].to_vec();
    let mut second = seq[hi..].to_vec();
    second.extend_from_slice(&seq[..=lo]);
    Some((first, second))
}

/// Wendet Bruchkanten nacheinander auf den Zyklus `0..n` an.
///
/// Jede Bruchkante teilt den ersten Teilzyklus, der beide Endpunkte enthält.
/// Bruchkanten ohne passenden Teilzyklus sind redundant und werden übersprungen.
pub fn split_by_breaklines<'a>(
    n: usize,
    breaklines: impl IntoIterator<Item = &'a Breakline>,
) -> Vec<Vec<usize>> {
    let mut loops: Vec<Vec<usize>> = vec![(0..n).collect()];
    for breakline in breaklines {
        let split = loops
            .iter()
            .enumerate()
            .find_map(|(idx, seq)| split_loop(seq, breakline.i, breakline.j).map(|s| (idx, s)));
        match split {
            Some((idx, (first, second))) => {
                loops[idx] = first;
                loops.insert(idx + 1, second);
            }
            None => {
                log::debug!(
                    "Bruchkante {}-{} ist redundant und wird ignoriert",
                    breakline.i,
                    breakline.j
                );
            }
        }
    }
    loops
}

impl AreaMeasurementTool {
    /// Kanten des Polygonzugs (mit Schlusskante, wenn geschlossen).
    pub fn edges(&self) -> Vec<Edge> {
        polygon::build_edges(&self.points, self.closed)
    }

    /// Fläche des geschlossenen Polygons ohne Berücksichtigung der Bruchkanten.
    pub fn area(&self) -> Option<f64> {
        self.area_detailed().map(|result| result.area)
    }

    /// Wie [`area`](Self::area), zusätzlich mit Vollständigkeits-Flag.
    pub fn area_detailed(&self) -> Option<TriangulatedArea> {
        if !self.closed {
            return None;
        }
        polygon::polygon_area_detailed(&self.points)
    }

    /// Planarität des geschlossenen Polygons.
    pub fn planarity(&self) -> Option<Planarity> {
        if !self.closed {
            return None;
        }
        polygon::planarity(&self.points)
    }

    /// Teilflächen aus den Bruchkanten.
    ///
    /// `None` bei offenem Polygon, weniger als 3 Punkten oder ohne Bruchkanten.
    pub fn surfaces(&self) -> Option<Vec<Surface>> {
        if !self.closed || self.points.len() < 3 || self.breaklines.is_empty() {
            return None;
        }

        let surfaces = split_by_breaklines(self.points.len(), &self.breaklines)
            .into_iter()
            .filter(|seq| seq.len() >= 3)
            .map(|indices| {
                let pts: Vec<DVec3> = indices.iter().map(|&i| self.points[i]).collect();
                let triangulated = polygon::triangulated_area(&pts);
                Surface {
                    area: triangulated.area,
                    planarity: polygon::planarity(&pts),
                    complete: triangulated.complete,
                    indices,
                }
            })
            .collect();
        Some(surfaces)
    }

    /// Summe aller Teilflächen.
    pub fn surfaces_total(&self) -> Option<f64> {
        self.surfaces()
            .map(|surfaces| surfaces.iter().map(|s| s.area).sum())
    }

    /// Gemessene Gesamtfläche: Summe der Teilflächen, sonst Polygonfläche.
    pub fn measured_area(&self) -> Option<f64> {
        self.surfaces_total().or_else(|| self.area())
    }

    /// Was-wäre-wenn-Teilung der unveränderten Punktfolge an `i` und `j`.
    ///
    /// Unabhängig von bestehenden Bruchkanten. `None` bei `i == j`, weniger
    /// als 3 Punkten oder wenn ein Bogen weniger als 3 Punkte hätte.
    pub fn compute_split_areas(&self, i: usize, j: usize) -> Option<SplitAreas> {
        let breakline = Breakline::new(i, j)?;
        let n = self.points.len();
        if n < 3 || breakline.j >= n {
            return None;
        }

        let first = &self.points[breakline.i..=breakline.j];
        let mut second = self.points[breakline.j..].to_vec();
        second.extend_from_slice(&self.points[..=breakline.i]);
        if first.len() < 3 || second.len() < 3 {
            return None;
        }

        let a = polygon::triangulated_area(first).area;
        let b = polygon::triangulated_area(&second).area;
        Some(SplitAreas { a, b, total: a + b })
    }
}
