//! Zustandsübergänge des Flächenmess-Tools.
//!
//! Alle Operationen sind bei ungültiger Eingabe No-ops und melden über den
//! Rückgabewert, ob sich der Zustand geändert hat.

use super::state::{AreaMeasurementTool, AreaState, Breakline};
use glam::DVec3;

impl AreaMeasurementTool {
    /// Schaltet das Tool ein bzw. aus.
    pub fn toggle(&mut self) -> bool {
        if self.is_active() {
            self.deactivate()
        } else {
            self.activate()
        }
    }

    /// Aktiviert das Tool mit leerem Polygon.
    pub fn activate(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = AreaState::Active;
        self.points.clear();
        self.closed = false;
        self.redo_index = None;
        self.auto_add_breaklines = false;
        self.reset_split_selection();
        self.breaklines.clear();
        log::debug!("Flächenmessung aktiviert");
        true
    }

    /// Deaktiviert das Tool. Bruchkanten und Auswahl werden verworfen.
    pub fn deactivate(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = AreaState::Inactive;
        self.redo_index = None;
        self.auto_add_breaklines = false;
        self.reset_split_selection();
        self.breaklines.clear();
        log::debug!("Flächenmessung deaktiviert");
        true
    }

    /// Verwirft alle Punkte; das Polygon ist danach wieder offen.
    ///
    /// Bruchkanten verweisen auf Punkt-Indizes und werden mit verworfen.
    pub fn clear(&mut self) {
        self.points.clear();
        self.closed = false;
        self.redo_index = None;
        self.reset_split_selection();
        self.breaklines.clear();
        if self.state == AreaState::WaitingRedo {
            self.state = AreaState::Active;
        }
    }

    /// Schließt das Polygon (mindestens 3 Punkte).
    pub fn close_polygon(&mut self) -> bool {
        if self.points.len() < 3 || self.closed {
            return false;
        }
        self.closed = true;
        log::debug!("Polygon mit {} Punkten geschlossen", self.points.len());
        true
    }

    /// Merkt Punkt `index` zum Ersetzen durch den nächsten Klick vor.
    pub fn prepare_redo(&mut self, index: usize) -> bool {
        if !self.is_active() || index >= self.points.len() {
            return false;
        }
        self.redo_index = Some(index);
        self.state = AreaState::WaitingRedo;
        true
    }

    /// Übernimmt einen gepickten Weltpunkt.
    ///
    /// `WaitingRedo`: ersetzt den vorgemerkten Punkt. `Active` bei offenem
    /// Polygon: hängt den Punkt an. Sonst ignoriert.
    pub fn commit_point(&mut self, point: DVec3) -> bool {
        match (self.state, self.redo_index) {
            (AreaState::WaitingRedo, Some(index)) if index < self.points.len() => {
                self.points[index] = point;
                self.redo_index = None;
                self.state = AreaState::Active;
                true
            }
            (AreaState::Active, _) if !self.closed => {
                self.points.push(point);
                true
            }
            _ => false,
        }
    }

    /// Startet die manuelle Bruchkanten-Auswahl.
    pub fn start_split(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.reset_split_selection();
        self.auto_add_breaklines = false;
        self.state = AreaState::SplitSelect;
        true
    }

    /// Bricht die Bruchkanten-Auswahl ab (bestehende Bruchkanten bleiben).
    pub fn cancel_split(&mut self) {
        if self.state == AreaState::SplitSelect {
            self.state = AreaState::Active;
        }
        self.reset_split_selection();
        self.auto_add_breaklines = false;
    }

    /// Startet den Dauer-Modus: jedes vollständige Paar wird zur Bruchkante.
    pub fn start_breakline_mode(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.auto_add_breaklines = true;
        self.state = AreaState::SplitSelect;
        true
    }

    /// Beendet den Dauer-Modus.
    pub fn stop_breakline_mode(&mut self) {
        self.auto_add_breaklines = false;
        self.reset_split_selection();
        if self.is_active() {
            self.state = AreaState::Active;
        }
    }

    /// Wählt Punkt `index` als Bruchkanten-Endpunkt.
    ///
    /// Liegt bereits ein vollständiges Paar vor, wird es zuerst als
    /// Bruchkante übernommen. Bei zwei gewählten Punkten wird die
    /// Teilungs-Vorschau berechnet bzw. im Dauer-Modus direkt übernommen.
    pub fn pick_split_index(&mut self, index: usize) -> bool {
        if self.state != AreaState::SplitSelect || index >= self.points.len() {
            return false;
        }

        if self.split_selection.len() == 2 {
            self.commit_selection();
        }
        if !self.split_selection.contains(&index) {
            self.split_selection.push(index);
        }

        if let [a, b] = self.split_selection[..] {
            self.split_areas = self.compute_split_areas(a, b);
            if self.auto_add_breaklines {
                self.commit_selection();
            }
        }
        true
    }

    /// Übernimmt das gewählte Paar als Bruchkante.
    ///
    /// Ohne vollständiges Paar wird stattdessen der Dauer-Modus gestartet.
    pub fn add_breakline_from_selection(&mut self) -> bool {
        if self.split_selection.len() == 2 {
            self.commit_selection();
            if self.is_active() {
                self.state = AreaState::SplitSelect;
            }
            return true;
        }
        self.start_breakline_mode()
    }

    /// Fügt eine Bruchkante hinzu; Duplikate (in beliebiger Reihenfolge) und
    /// ungültige Indizes werden abgelehnt.
    pub fn add_breakline(&mut self, a: usize, b: usize) -> bool {
        let Some(breakline) = Breakline::new(a, b) else {
            return false;
        };
        if breakline.j >= self.points.len() {
            return false;
        }
        let inserted = self.breaklines.insert(breakline);
        if inserted {
            log::debug!("Bruchkante {}-{} hinzugefügt", breakline.i, breakline.j);
        }
        inserted
    }

    /// Entfernt die zuletzt hinzugefügte Bruchkante.
    pub fn undo_last_breakline(&mut self) -> Option<Breakline> {
        self.breaklines.pop()
    }

    /// Entfernt alle Bruchkanten.
    pub fn clear_all_breaklines(&mut self) -> bool {
        if self.breaklines.is_empty() {
            return false;
        }
        self.breaklines.clear();
        true
    }

    fn commit_selection(&mut self) {
        if let [a, b] = self.split_selection[..] {
            self.add_breakline(a, b);
        }
        self.reset_split_selection();
    }
}
