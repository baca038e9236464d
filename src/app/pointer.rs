//! Klick-Erkennung auf der Zeichenfläche.
//!
//! Unterscheidet statische Klicks von Drags (Kamera-Orbit) und unterdrückt
//! Canvas-Klicks, die unmittelbar auf einen UI-Button-Klick folgen.
//! Zeitstempel kommen in Millisekunden vom Host.

use crate::shared::EditorOptions;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Maustaste bzw. Pointer-Button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Schwellwerte der Klick-Erkennung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickThresholds {
    pub drag_threshold_px: f64,
    pub static_click_max_ms: u64,
    pub button_debounce_ms: u64,
    pub click_disable_ms: u64,
}

impl From<&EditorOptions> for ClickThresholds {
    fn from(options: &EditorOptions) -> Self {
        Self {
            drag_threshold_px: options.drag_threshold_px,
            static_click_max_ms: options.static_click_max_ms,
            button_debounce_ms: options.button_debounce_ms,
            click_disable_ms: options.click_disable_ms,
        }
    }
}

impl ClickThresholds {
    /// Quadrierte Drag-Schwelle für Distanzvergleiche ohne Wurzel.
    pub fn drag_threshold_sq(&self) -> f64 {
        self.drag_threshold_px * self.drag_threshold_px
    }
}

impl Default for ClickThresholds {
    fn default() -> Self {
        Self::from(&EditorOptions::default())
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingClick {
    pointer_id: u64,
    start: DVec2,
    start_ms: u64,
    moved: bool,
}

/// Zustandsautomat: Pointer-Down → (Move)* → Pointer-Up.
#[derive(Debug, Clone, Default)]
pub struct ClickDetector {
    thresholds: ClickThresholds,
    pending: Option<PendingClick>,
    last_button_ms: Option<u64>,
}

impl ClickDetector {
    pub fn new(thresholds: ClickThresholds) -> Self {
        Self {
            thresholds,
            pending: None,
            last_button_ms: None,
        }
    }

    pub fn thresholds(&self) -> ClickThresholds {
        self.thresholds
    }

    /// Übernimmt neue Schwellwerte; ein laufender Klick bleibt erhalten.
    pub fn set_thresholds(&mut self, thresholds: ClickThresholds) {
        self.thresholds = thresholds;
    }

    /// Meldet einen UI-Button-Druck zum Zeitpunkt `now_ms`.
    pub fn suppress_after_button(&mut self, now_ms: u64) {
        self.last_button_ms = Some(now_ms);
        self.pending = None;
    }

    fn elapsed_since_button(&self, now_ms: u64) -> Option<u64> {
        self.last_button_ms.map(|t| now_ms.saturating_sub(t))
    }

    /// Canvas-Klicks sind nach einem Button-Druck hart gesperrt.
    pub fn is_disabled(&self, now_ms: u64) -> bool {
        self.elapsed_since_button(now_ms)
            .is_some_and(|elapsed| elapsed < self.thresholds.click_disable_ms)
    }

    fn is_debounced(&self, now_ms: u64) -> bool {
        self.elapsed_since_button(now_ms)
            .is_some_and(|elapsed| elapsed < self.thresholds.button_debounce_ms)
    }

    /// Startet einen Klick-Kandidaten. Gibt `true` zurück, wenn er angenommen wurde.
    pub fn pointer_down(
        &mut self,
        pointer_id: u64,
        position: DVec2,
        button: PointerButton,
        now_ms: u64,
    ) -> bool {
        if button != PointerButton::Primary || self.is_disabled(now_ms) {
            self.pending = None;
            return false;
        }
        self.pending = Some(PendingClick {
            pointer_id,
            start: position,
            start_ms: now_ms,
            moved: false,
        });
        true
    }

    /// Markiert den Kandidaten als Drag, sobald die Schwelle überschritten ist.
    pub fn pointer_move(&mut self, pointer_id: u64, position: DVec2) {
        let threshold_sq = self.thresholds.drag_threshold_sq();
        if let Some(pending) = self.pending.as_mut() {
            if pending.pointer_id == pointer_id
                && position.distance_squared(pending.start) > threshold_sq
            {
                pending.moved = true;
            }
        }
    }

    /// Beendet den Kandidaten und liefert die Klickposition bei gültigem Klick.
    pub fn pointer_up(
        &mut self,
        pointer_id: u64,
        position: DVec2,
        button: PointerButton,
        now_ms: u64,
    ) -> Option<DVec2> {
        let pending = self.pending.take_if(|p| p.pointer_id == pointer_id)?;
        self.evaluate_release(&pending, position, button, now_ms)
    }

    fn evaluate_release(
        &self,
        pending: &PendingClick,
        position: DVec2,
        button: PointerButton,
        now_ms: u64,
    ) -> Option<DVec2> {
        let threshold_sq = self.thresholds.drag_threshold_sq();
        let moved = pending.moved || position.distance_squared(pending.start) > threshold_sq;
        let held_ms = now_ms.saturating_sub(pending.start_ms);

        if moved
            || button != PointerButton::Primary
            || held_ms > self.thresholds.static_click_max_ms
            || self.is_debounced(now_ms)
            || self.is_disabled(now_ms)
        {
            log::debug!("Pointer-Up verworfen (Drag oder gesperrt)");
            return None;
        }
        Some(position)
    }

    /// Verwirft einen laufenden Kandidaten (z.B. Pointer verlässt die Fläche).
    pub fn pointer_cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
