use crate::anim::{AnimationDocument, KeyDirection, KeyframeValue, SplatId, TrackKind};
use crate::app::pointer::PointerButton;
use crate::shared::EditorOptions;
use glam::{DVec2, DVec3};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // ── Flächenmessung ──
    /// Messwerkzeug aktivieren
    ActivateAreaTool,
    /// Messwerkzeug deaktivieren
    DeactivateAreaTool,
    /// Klick-Kandidat starten
    BeginCanvasClick {
        pointer_id: u64,
        screen_pos: DVec2,
        button: PointerButton,
        time_ms: u64,
    },
    /// Klick-Kandidat verfolgen
    TrackCanvasPointer { pointer_id: u64, screen_pos: DVec2 },
    /// Klick-Kandidat abschließen und ggf. Punkt picken
    EndCanvasClick {
        pointer_id: u64,
        screen_pos: DVec2,
        button: PointerButton,
        time_ms: u64,
    },
    /// Klick-Kandidat verwerfen
    CancelCanvasClick,
    /// Canvas-Klicks nach Button-Druck sperren
    SuppressCanvasClicks { time_ms: u64 },
    /// Weltpunkt übernehmen (Anhängen oder Redo)
    CommitAreaPoint { world_pos: DVec3 },
    /// Punkte verwerfen
    ClearAreaPoints,
    /// Polygon schließen
    CloseAreaPolygon,
    /// Redo für Punkt `index` vormerken
    PrepareAreaRedo { index: usize },
    /// Manuelle Bruchkanten-Auswahl starten
    StartAreaSplit,
    /// Bruchkanten-Auswahl abbrechen
    CancelAreaSplit,
    /// Bruchkanten-Endpunkt wählen
    PickAreaSplitIndex { index: usize },
    /// Auswahl übernehmen bzw. Dauer-Modus starten
    AddBreaklineFromSelection,
    /// Bruchkante direkt anlegen
    AddBreakline { a: usize, b: usize },
    /// Dauer-Modus beenden
    StopBreaklineMode,
    /// Letzte Bruchkante entfernen
    UndoBreakline,
    /// Alle Bruchkanten entfernen
    ClearBreaklines,

    // ── Timeline ──
    SetTimelineFrames { frames: u32 },
    SetTimelineFrameRate { frame_rate: f64 },
    SetTimelineSmoothness { smoothness: f64 },
    SetTimelineFrame { frame: u32 },
    SetTimelinePlaying { playing: bool },
    AdvanceTimeline { dt: f64 },
    /// Einen Frame vor bzw. zurück (läuft im Kreis)
    StepTimelineFrame { forward: bool },
    SkipToKey { direction: KeyDirection },

    // ── Keyframes ──
    SelectTrack { track: TrackKind },
    AddKeyframe { frame: u32, value: KeyframeValue },
    RemoveKeyframe { track: TrackKind, frame: u32 },
    MoveKeyframe { track: TrackKind, from: u32, to: u32 },
    RemoveSplatTransforms { splat: SplatId },
    ClearAnimation,
    LoadAnimationDocument { document: AnimationDocument },

    // ── Optionen ──
    ApplyOptions { options: EditorOptions },
}
