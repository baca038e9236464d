//! Polygon-Geometrie für die Flächenmessung auf Splat-Oberflächen.
//!
//! Gemessene Punkte stammen aus Ray-Picks und liegen daher nur annähernd in
//! einer Ebene. Die Normale wird nach Newell bestimmt, trianguliert wird per
//! Ear-Clipping in der dominanten Achsen-Ebene, die Flächen der Dreiecke
//! werden aber in Original-3D-Koordinaten summiert.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Allgemeine Toleranz für Längen und Flächen.
pub const EPSILON: f64 = 1e-6;

/// Schutz gegen Endlosschleifen beim Ear-Clipping.
pub const EAR_CLIP_MAX_ITERATIONS: usize = 10_000;

/// Koordinatenachse, die bei der 2D-Projektion entfällt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAxis {
    /// YZ-Ebene
    X,
    /// XZ-Ebene
    Y,
    /// XY-Ebene
    Z,
}

/// Kante eines (offenen oder geschlossenen) Polygonzugs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Startpunkt
    pub a: DVec3,
    /// Endpunkt
    pub b: DVec3,
    /// Länge der Kante
    pub length: f64,
}

/// Abweichung der Punkte von ihrer Ausgleichsebene.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Planarity {
    /// Quadratisches Mittel der Abstände
    pub rms: f64,
    /// Größter Abstand
    pub max: f64,
}

/// Ergebnis des Ear-Clippings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Triangulation {
    /// Dreiecke als Indizes in die Eingabe-Punktliste
    pub triangles: Vec<[usize; 3]>,
    /// `false`, wenn Ecken übrig blieben (selbstschneidendes/degeneriertes Polygon)
    pub complete: bool,
}

/// Fläche eines triangulierten Polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulatedArea {
    /// Summe der 3D-Dreiecksflächen
    pub area: f64,
    /// Ob die Triangulation alle Ecken erfasst hat
    pub complete: bool,
}

/// Fläche eines 3D-Dreiecks.
pub fn triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    0.5 * (b - a).cross(c - a).length()
}

/// Nicht normierte Polygon-Normale nach Newell.
///
/// Robust auch für leicht verrauschte, nicht exakt planare Punkte.
pub fn newell_normal(points: &[DVec3]) -> DVec3 {
    let n = points.len();
    let mut normal = DVec3::ZERO;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    normal
}

/// Wählt die Achse mit der größten Normalen-Komponente (Gleichstand: X vor Y vor Z).
pub fn dominant_axis(normal: DVec3) -> DropAxis {
    let abs = normal.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        DropAxis::X
    } else if abs.y >= abs.z {
        DropAxis::Y
    } else {
        DropAxis::Z
    }
}

/// Projiziert einen Punkt durch Weglassen von `axis` in die Ebene.
pub fn project(point: DVec3, axis: DropAxis) -> DVec2 {
    match axis {
        DropAxis::X => DVec2::new(point.y, point.z),
        DropAxis::Y => DVec2::new(point.x, point.z),
        DropAxis::Z => DVec2::new(point.x, point.y),
    }
}

/// Doppelte vorzeichenbehaftete Fläche (Shoelace); > 0 = gegen den Uhrzeigersinn.
fn signed_area_2x(poly: &[DVec2]) -> f64 {
    let n = poly.len();
    (0..n)
        .map(|i| {
            let p = poly[i];
            let q = poly[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum()
}

/// Trianguliert ein einfaches 2D-Polygon (ohne Löcher) per Ear-Clipping.
///
/// Findet sich keine Ecke mehr, die ein gültiges Ohr bildet, bricht das
/// Verfahren ab und meldet `complete = false`. Die bis dahin gefundenen
/// Dreiecke bleiben erhalten.
pub fn ear_clip(poly: &[DVec2]) -> Triangulation {
    let n = poly.len();
    if n < 3 {
        return Triangulation {
            triangles: Vec::new(),
            complete: false,
        };
    }

    // Degenerierte Orientierung wird wie CCW behandelt
    let ccw = signed_area_2x(poly) >= 0.0;

    let is_convex = |a: DVec2, b: DVec2, c: DVec2| {
        let cross = (b - a).perp_dot(c - a);
        if ccw {
            cross > 0.0
        } else {
            cross < 0.0
        }
    };

    let inside_triangle = |a: DVec2, b: DVec2, c: DVec2, p: DVec2| {
        let c1 = (b - a).perp_dot(p - a);
        let c2 = (c - b).perp_dot(p - b);
        let c3 = (a - c).perp_dot(p - c);
        if ccw {
            c1 >= 0.0 && c2 >= 0.0 && c3 >= 0.0
        } else {
            c1 <= 0.0 && c2 <= 0.0 && c3 <= 0.0
        }
    };

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    let mut iterations = 0;

    while remaining.len() > 3 && iterations < EAR_CLIP_MAX_ITERATIONS {
        iterations += 1;
        let len = remaining.len();

        let ear = (0..len).find(|&i| {
            let i0 = remaining[(i + len - 1) % len];
            let i1 = remaining[i];
            let i2 = remaining[(i + 1) % len];
            let (a, b, c) = (poly[i0], poly[i1], poly[i2]);
            if !is_convex(a, b, c) {
                return false;
            }
            !remaining
                .iter()
                .filter(|&&k| k != i0 && k != i1 && k != i2)
                .any(|&k| inside_triangle(a, b, c, poly[k]))
        });

        let Some(i) = ear else {
            break;
        };
        triangles.push([
            remaining[(i + len - 1) % len],
            remaining[i],
            remaining[(i + 1) % len],
        ]);
        remaining.remove(i);
    }

    let complete = remaining.len() == 3;
    if complete {
        triangles.push([remaining[0], remaining[1], remaining[2]]);
    }

    Triangulation {
        triangles,
        complete,
    }
}

/// Trianguliert einen 3D-Polygonzug und summiert die Dreiecksflächen.
///
/// Weniger als 3 Punkte ergeben Fläche 0, genau 3 Punkte das direkte Dreieck.
pub fn triangulated_area(points: &[DVec3]) -> TriangulatedArea {
    match points.len() {
        0..=2 => TriangulatedArea {
            area: 0.0,
            complete: false,
        },
        3 => TriangulatedArea {
            area: triangle_area(points[0], points[1], points[2]),
            complete: true,
        },
        _ => {
            let axis = dominant_axis(newell_normal(points));
            let poly: Vec<DVec2> = points.iter().map(|&p| project(p, axis)).collect();
            let triangulation = ear_clip(&poly);
            let area = triangulation
                .triangles
                .iter()
                .map(|&[a, b, c]| triangle_area(points[a], points[b], points[c]))
                .sum();
            TriangulatedArea {
                area,
                complete: triangulation.complete,
            }
        }
    }
}

/// Entfernt direkt aufeinanderfolgende (nahezu) identische Punkte.
pub fn dedup_sequential(points: &[DVec3]) -> Vec<DVec3> {
    let mut result = Vec::with_capacity(points.len());
    for (i, &p) in points.iter().enumerate() {
        if i == 0 || p.distance_squared(points[i - 1]) > EPSILON * EPSILON {
            result.push(p);
        }
    }
    result
}

/// Fläche eines geschlossenen Polygons.
///
/// Gibt `None` zurück bei weniger als 3 unterscheidbaren Punkten oder
/// wenn die Fläche nicht größer als [`EPSILON`] ist.
pub fn polygon_area(points: &[DVec3]) -> Option<f64> {
    polygon_area_detailed(points).map(|result| result.area)
}

/// Wie [`polygon_area`], liefert zusätzlich das Vollständigkeits-Flag der Triangulation.
pub fn polygon_area_detailed(points: &[DVec3]) -> Option<TriangulatedArea> {
    let pts = dedup_sequential(points);
    if pts.len() < 3 {
        return None;
    }
    let result = triangulated_area(&pts);
    if !result.complete {
        log::warn!(
            "Triangulation unvollständig ({} Punkte), Fläche ist nur eine Näherung",
            pts.len()
        );
    }
    (result.area > EPSILON).then_some(result)
}

/// Abweichung der Punkte von der Ebene durch den ersten Punkt (Newell-Normale).
pub fn planarity(points: &[DVec3]) -> Option<Planarity> {
    if points.len() < 3 {
        return None;
    }
    let normal = newell_normal(points);
    let len = normal.length();
    if len < EPSILON {
        return Some(Planarity::default());
    }
    let normal = normal / len;
    let origin = points[0];

    let mut sum_sq = 0.0;
    let mut max = 0.0_f64;
    for &p in points {
        let d = normal.dot(p - origin).abs();
        sum_sq += d * d;
        max = max.max(d);
    }

    Some(Planarity {
        rms: (sum_sq / points.len() as f64).sqrt(),
        max,
    })
}

/// Baut die Kanten des Polygonzugs, degenerierte Kanten werden ausgelassen.
pub fn build_edges(points: &[DVec3], closed: bool) -> Vec<Edge> {
    let mut edges: Vec<Edge> = points
        .windows(2)
        .filter_map(|w| make_edge(w[0], w[1]))
        .collect();

    if closed && points.len() >= 3 {
        if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
            edges.extend(make_edge(last, first));
        }
    }
    edges
}

fn make_edge(a: DVec3, b: DVec3) -> Option<Edge> {
    let length = a.distance(b);
    (length > EPSILON).then_some(Edge { a, b, length })
}

#[cfg(test)]
mod tests;
