//! Headless-Sessions: aufgezeichnete Eingaben als JSON, abgespielt über
//! den Controller, Ergebnis als JSON-Report.

use super::tools::AreaMeasurementSnapshot;
use super::{AppController, AppIntent, AppState};
use crate::anim::{
    AnimationDocument, AnimationFrame, KeyDirection, KeyframeValue, SplatId, TrackKind,
};
use anyhow::Context;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ein Schritt einer aufgezeichneten Session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionStep {
    Activate,
    Deactivate,
    /// Weltpunkt übernehmen
    Point { position: DVec3 },
    Close,
    Clear,
    /// Punkt `index` durch `position` ersetzen
    Redo { index: usize, position: DVec3 },
    StartSplit,
    CancelSplit,
    SplitPoint { index: usize },
    /// Auswahl übernehmen bzw. Dauer-Modus starten
    AddBreakline,
    Breakline { a: usize, b: usize },
    StopBreaklineMode,
    UndoBreakline,
    ClearBreaklines,
    Frames { frames: u32 },
    FrameRate { frame_rate: f64 },
    Smoothness { smoothness: f64 },
    Frame { frame: u32 },
    PrevFrame,
    NextFrame,
    SkipKey { direction: KeyDirection },
    Play,
    Pause,
    /// Wiedergabe um `dt` Sekunden fortschreiben
    Tick { dt: f64 },
    Keyframe {
        #[serde(default)]
        frame: Option<u32>,
        value: KeyframeValue,
    },
    RemoveKeyframe { track: TrackKind, frame: u32 },
    MoveKeyframe { track: TrackKind, from: u32, to: u32 },
    SelectTrack { track: TrackKind },
    RemoveSplat { splat: SplatId },
    ClearAnimation,
}

impl SessionStep {
    /// Übersetzt den Schritt in App-Intents.
    pub fn into_intents(self) -> Vec<AppIntent> {
        match self {
            Self::Activate => vec![AppIntent::AreaToolActivated],
            Self::Deactivate => vec![AppIntent::AreaToolDeactivated],
            Self::Point { position } => vec![AppIntent::AreaPointPicked {
                world_pos: position,
            }],
            Self::Close => vec![AppIntent::AreaCloseRequested],
            Self::Clear => vec![AppIntent::AreaClearRequested],
            Self::Redo { index, position } => vec![
                AppIntent::AreaRedoPointRequested { index },
                AppIntent::AreaPointPicked {
                    world_pos: position,
                },
            ],
            Self::StartSplit => vec![AppIntent::AreaSplitStartRequested],
            Self::CancelSplit => vec![AppIntent::AreaSplitCancelled],
            Self::SplitPoint { index } => vec![AppIntent::AreaSplitPointSelected { index }],
            Self::AddBreakline => vec![AppIntent::AreaBreaklineAddRequested],
            Self::Breakline { a, b } => vec![AppIntent::AreaBreaklineBetweenRequested { a, b }],
            Self::StopBreaklineMode => vec![AppIntent::AreaBreaklineModeStopped],
            Self::UndoBreakline => vec![AppIntent::AreaBreaklineUndoRequested],
            Self::ClearBreaklines => vec![AppIntent::AreaBreaklinesCleared],
            Self::Frames { frames } => vec![AppIntent::TimelineFramesChanged { frames }],
            Self::FrameRate { frame_rate } => {
                vec![AppIntent::TimelineFrameRateChanged { frame_rate }]
            }
            Self::Smoothness { smoothness } => {
                vec![AppIntent::TimelineSmoothnessChanged { smoothness }]
            }
            Self::Frame { frame } => vec![AppIntent::TimelineFrameRequested { frame }],
            Self::PrevFrame => vec![AppIntent::TimelinePrevFrameRequested],
            Self::NextFrame => vec![AppIntent::TimelineNextFrameRequested],
            Self::SkipKey { direction } => vec![AppIntent::TimelineKeySkipRequested { direction }],
            Self::Play => vec![AppIntent::TimelinePlayingSet { playing: true }],
            Self::Pause => vec![AppIntent::TimelinePlayingSet { playing: false }],
            Self::Tick { dt } => vec![AppIntent::TimelineTick { dt }],
            Self::Keyframe { frame, value } => vec![AppIntent::KeyframeAddRequested { frame, value }],
            Self::RemoveKeyframe { track, frame } => {
                vec![AppIntent::KeyframeRemoveRequested { track, frame }]
            }
            Self::MoveKeyframe { track, from, to } => {
                vec![AppIntent::KeyframeMoveRequested { track, from, to }]
            }
            Self::SelectTrack { track } => vec![AppIntent::TrackSelected { track }],
            Self::RemoveSplat { splat } => vec![AppIntent::SplatTransformsRemoved { splat }],
            Self::ClearAnimation => vec![AppIntent::AnimationCleared],
        }
    }
}

/// Aufgezeichnete Session: optionales Start-Dokument plus Schritte.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub animation: Option<AnimationDocument>,
    pub steps: Vec<SessionStep>,
}

impl Session {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Session-Datei ist kein gültiges JSON")
    }

    /// Lädt eine Session aus einer JSON-Datei.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Session nicht lesbar: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Session fehlerhaft: {}", path.display()))
    }
}

/// Timeline-Stand am Ende der Session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineReport {
    pub frames: u32,
    pub frame: u32,
    pub time: f64,
    pub playing: bool,
}

/// Ergebnis einer abgespielten Session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub area: AreaMeasurementSnapshot,
    /// Gemessene Fläche, gerundet auf `report_decimals`
    pub area_display: Option<String>,
    pub timeline: TimelineReport,
    pub animation: AnimationFrame,
    pub commands: usize,
    pub notifications: usize,
}

impl SessionReport {
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Report konnte nicht serialisiert werden")
    }
}

/// Spielt eine Session über den Controller ab.
pub fn run_session(
    controller: &mut AppController,
    state: &mut AppState,
    session: Session,
) -> anyhow::Result<SessionReport> {
    if let Some(document) = session.animation {
        controller.handle_intent(state, AppIntent::AnimationDocumentLoaded { document })?;
    }

    let mut notifications = state.drain_notifications().len();
    for (index, step) in session.steps.into_iter().enumerate() {
        for intent in step.into_intents() {
            controller
                .handle_intent(state, intent)
                .with_context(|| format!("Session-Schritt {} fehlgeschlagen", index + 1))?;
        }
        notifications += state.drain_notifications().len();
    }

    let area = state.area_tool.snapshot();
    let decimals = state.options.report_decimals;
    let area_display = area.area.map(|a| format!("{a:.decimals$}"));
    let timeline = TimelineReport {
        frames: state.timeline.frames(),
        frame: state.timeline.frame(),
        time: state.timeline.time(),
        playing: state.timeline.is_playing(),
    };
    let animation = state
        .tracks
        .evaluate(state.timeline.time(), state.timeline.frames());

    log::info!(
        "Session abgespielt: {} Commands, Fläche {}",
        state.command_log.len(),
        area_display.as_deref().unwrap_or("-")
    );

    Ok(SessionReport {
        area,
        area_display,
        timeline,
        animation,
        commands: state.command_log.len(),
        notifications,
    })
}
