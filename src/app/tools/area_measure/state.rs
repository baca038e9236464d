//! State-Definitionen des Flächenmess-Tools.

use glam::DVec3;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Phase des Flächenmess-Tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AreaState {
    /// Tool aus, Klicks werden ignoriert
    #[default]
    Inactive,
    /// Punkte werden per Klick erfasst
    Active,
    /// Nächster Klick ersetzt den Punkt `redo_index`
    WaitingRedo,
    /// Klicks auf Punkt-Indizes wählen Bruchkanten-Endpunkte
    SplitSelect,
}

/// Bruchkante zwischen zwei Polygon-Punkten, normalisiert auf `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breakline {
    /// Kleinerer Punkt-Index
    pub i: usize,
    /// Größerer Punkt-Index
    pub j: usize,
}

impl Breakline {
    /// Erstellt eine Bruchkante; gleiche Indizes ergeben `None`.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { i: a, j: b }),
            std::cmp::Ordering::Greater => Some(Self { i: b, j: a }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Vorschau einer Teilung in zwei Teilflächen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitAreas {
    /// Fläche des Bogens `[min..=max]`
    pub a: f64,
    /// Fläche des Restbogens
    pub b: f64,
    /// Summe beider Teilflächen
    pub total: f64,
}

/// Flächenmess-Tool: Polygon aus gepickten Punkten, optional durch
/// Bruchkanten in Teilflächen zerlegt.
#[derive(Debug, Clone, Default)]
pub struct AreaMeasurementTool {
    pub(crate) state: AreaState,
    pub(crate) points: Vec<DVec3>,
    pub(crate) closed: bool,
    pub(crate) redo_index: Option<usize>,
    /// Höchstens zwei gewählte Punkt-Indizes
    pub(crate) split_selection: Vec<usize>,
    pub(crate) split_areas: Option<SplitAreas>,
    /// Einfügereihenfolge bestimmt die Anwendungsreihenfolge beim Zerlegen
    pub(crate) breaklines: IndexSet<Breakline>,
    /// Dauer-Modus: jedes vollständige Paar wird sofort als Bruchkante übernommen
    pub(crate) auto_add_breaklines: bool,
}

impl AreaMeasurementTool {
    /// Erstellt ein inaktives Tool ohne Punkte.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuelle Phase.
    pub fn state(&self) -> AreaState {
        self.state
    }

    /// Ob das Tool aktiv ist (jede Phase außer `Inactive`).
    pub fn is_active(&self) -> bool {
        self.state != AreaState::Inactive
    }

    /// Erfasste Punkte in Klick-Reihenfolge.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Ob das Polygon geschlossen ist.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Index des Punkts, der beim nächsten Klick ersetzt wird.
    pub fn redo_index(&self) -> Option<usize> {
        match self.state {
            AreaState::WaitingRedo => self.redo_index,
            _ => None,
        }
    }

    /// Aktuell gewählte Bruchkanten-Endpunkte.
    pub fn split_selection(&self) -> &[usize] {
        &self.split_selection
    }

    /// Vorschau der zuletzt gewählten Teilung.
    pub fn split_areas(&self) -> Option<SplitAreas> {
        self.split_areas
    }

    /// Bruchkanten in Einfügereihenfolge.
    pub fn breaklines(&self) -> impl ExactSizeIterator<Item = &Breakline> + '_ {
        self.breaklines.iter()
    }

    /// Anzahl der Bruchkanten.
    pub fn breakline_count(&self) -> usize {
        self.breaklines.len()
    }

    /// Ob der Dauer-Modus für Bruchkanten aktiv ist.
    pub fn is_auto_adding_breaklines(&self) -> bool {
        self.auto_add_breaklines
    }

    /// Setzt Auswahl und Teilungs-Vorschau zurück.
    pub(crate) fn reset_split_selection(&mut self) {
        self.split_selection.clear();
        self.split_areas = None;
    }
}
