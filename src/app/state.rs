//! Application State — zentrale Datenhaltung.

use super::events::AppNotification;
use super::pointer::{ClickDetector, ClickThresholds};
use super::tools::AreaMeasurementTool;
use super::CommandLog;
use crate::anim::{track_params, AnimationTracks, Timeline, TrackKind, TrackParams};
use crate::shared::EditorOptions;

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Flächenmess-Tool
    pub area_tool: AreaMeasurementTool,
    /// Klick-vs-Drag-Erkennung für die Zeichenfläche
    pub click_detector: ClickDetector,
    /// Wiedergabezustand
    pub timeline: Timeline,
    /// Alle Keyframe-Spuren
    pub tracks: AnimationTracks,
    /// Spur, deren Keys die Timeline-Navigation verwendet
    pub active_track: TrackKind,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Gesammelte Ausgaben für den Host
    notifications: Vec<AppNotification>,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen App-State mit vorgegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        let mut timeline = Timeline::new();
        timeline.set_frames(options.timeline_frames);
        timeline.set_frame_rate(options.timeline_frame_rate);
        timeline.set_smoothness(options.timeline_smoothness);

        Self {
            area_tool: AreaMeasurementTool::new(),
            click_detector: ClickDetector::new(ClickThresholds::from(&options)),
            timeline,
            tracks: AnimationTracks::new(),
            active_track: TrackKind::default(),
            command_log: CommandLog::new(),
            options,
            notifications: Vec::new(),
        }
    }

    /// Timeline-Parameter für den Aufbau der Spur-Evaluatoren.
    pub fn track_params(&self) -> TrackParams {
        track_params(&self.timeline)
    }

    /// Key-Frames der aktiven Spur.
    pub fn active_track_keys(&self) -> Vec<u32> {
        self.tracks.key_frames(self.active_track)
    }

    /// Reiht eine Ausgabe für den Host ein.
    pub fn notify(&mut self, notification: AppNotification) {
        self.notifications.push(notification);
    }

    /// Noch nicht abgeholte Ausgaben.
    pub fn pending_notifications(&self) -> &[AppNotification] {
        &self.notifications
    }

    /// Holt alle gesammelten Ausgaben ab.
    pub fn drain_notifications(&mut self) -> Vec<AppNotification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
