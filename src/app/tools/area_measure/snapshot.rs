//! Vollständiger Messzustand für Overlay und Panel.

use super::geometry::Surface;
use super::state::{AreaMeasurementTool, AreaState, Breakline, SplitAreas};
use crate::core::polygon::{Edge, Planarity};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Momentaufnahme des Flächenmess-Tools nach jeder Änderung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMeasurementSnapshot {
    pub state: AreaState,
    pub points: Vec<DVec3>,
    pub edges: Vec<Edge>,
    pub closed: bool,
    /// Summe der Teilflächen, falls Bruchkanten existieren, sonst Polygonfläche
    pub area: Option<f64>,
    /// `false`, wenn das Ear-Clipping beim Polygon oder einer Teilfläche
    /// Ecken übrig ließ
    pub triangulation_complete: bool,
    pub redo_index: Option<usize>,
    pub planarity: Option<Planarity>,
    pub split_selection: Option<Vec<usize>>,
    pub split_areas: Option<SplitAreas>,
    pub breaklines: Vec<Breakline>,
    pub surfaces: Option<Vec<Surface>>,
    pub surfaces_total: Option<f64>,
}

impl AreaMeasurementTool {
    /// Erstellt eine Momentaufnahme des aktuellen Zustands.
    pub fn snapshot(&self) -> AreaMeasurementSnapshot {
        let surfaces = self.surfaces();
        let surfaces_total = surfaces
            .as_ref()
            .map(|list| list.iter().map(|s| s.area).sum::<f64>());
        let detailed = self.area_detailed();
        let area = surfaces_total.or(detailed.map(|d| d.area));

        AreaMeasurementSnapshot {
            state: self.state,
            points: self.points.clone(),
            edges: self.edges(),
            closed: self.closed,
            area,
            triangulation_complete: detailed.is_none_or(|d| d.complete)
                && surfaces
                    .as_ref()
                    .is_none_or(|list| list.iter().all(|s| s.complete)),
            redo_index: self.redo_index(),
            planarity: self.planarity(),
            split_selection: (!self.split_selection.is_empty())
                .then(|| self.split_selection.clone()),
            split_areas: self.split_areas,
            breaklines: self.breaklines.iter().copied().collect(),
            surfaces,
            surfaces_total,
        }
    }
}
