use crate::anim::{AnimationDocument, KeyDirection, KeyframeValue, SplatId, TrackKind};
use crate::app::pointer::PointerButton;
use crate::shared::EditorOptions;
use glam::{DVec2, DVec3};

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    // ── Flächenmessung ──
    /// Messwerkzeug ein-/ausschalten
    AreaToolToggled,
    /// Messwerkzeug aktivieren
    AreaToolActivated,
    /// Messwerkzeug deaktivieren
    AreaToolDeactivated,
    /// Pointer auf der Zeichenfläche gedrückt
    CanvasPointerDown {
        pointer_id: u64,
        screen_pos: DVec2,
        button: PointerButton,
        time_ms: u64,
    },
    /// Pointer auf der Zeichenfläche bewegt
    CanvasPointerMoved { pointer_id: u64, screen_pos: DVec2 },
    /// Pointer auf der Zeichenfläche losgelassen
    CanvasPointerUp {
        pointer_id: u64,
        screen_pos: DVec2,
        button: PointerButton,
        time_ms: u64,
    },
    /// Pointer hat die Zeichenfläche verlassen
    CanvasPointerCancelled,
    /// Ein UI-Button wurde gedrückt (unterdrückt folgende Canvas-Klicks)
    UiButtonPressed { time_ms: u64 },
    /// Weltpunkt direkt übergeben (bereits gepickt)
    AreaPointPicked { world_pos: DVec3 },
    /// Alle Punkte verwerfen
    AreaClearRequested,
    /// Polygon schließen
    AreaCloseRequested,
    /// Punkt `index` durch den nächsten Klick ersetzen
    AreaRedoPointRequested { index: usize },
    /// Manuelle Bruchkanten-Auswahl starten
    AreaSplitStartRequested,
    /// Bruchkanten-Auswahl abbrechen
    AreaSplitCancelled,
    /// Punkt-Index als Bruchkanten-Endpunkt gewählt
    AreaSplitPointSelected { index: usize },
    /// Gewähltes Paar übernehmen bzw. Dauer-Modus starten
    AreaBreaklineAddRequested,
    /// Bruchkante direkt zwischen zwei Punkten anlegen
    AreaBreaklineBetweenRequested { a: usize, b: usize },
    /// Dauer-Modus beenden
    AreaBreaklineModeStopped,
    /// Letzte Bruchkante entfernen
    AreaBreaklineUndoRequested,
    /// Alle Bruchkanten entfernen
    AreaBreaklinesCleared,

    // ── Timeline ──
    /// Frame-Anzahl geändert
    TimelineFramesChanged { frames: u32 },
    /// Framerate geändert
    TimelineFrameRateChanged { frame_rate: f64 },
    /// Spline-Glättung geändert
    TimelineSmoothnessChanged { smoothness: f64 },
    /// Auf Frame springen
    TimelineFrameRequested { frame: u32 },
    /// Wiedergabe starten/stoppen
    TimelinePlayToggled,
    /// Wiedergabe explizit setzen
    TimelinePlayingSet { playing: bool },
    /// Update-Tick des Hosts (Sekunden)
    TimelineTick { dt: f64 },
    /// Einen Frame zurück
    TimelinePrevFrameRequested,
    /// Einen Frame vor
    TimelineNextFrameRequested,
    /// Zum vorherigen/nächsten Key der aktiven Spur
    TimelineKeySkipRequested { direction: KeyDirection },

    // ── Keyframes ──
    /// Aktive Spur für Key-Navigation wählen
    TrackSelected { track: TrackKind },
    /// Keyframe setzen (`None` = aktueller Frame)
    KeyframeAddRequested {
        frame: Option<u32>,
        value: KeyframeValue,
    },
    /// Keyframe entfernen
    KeyframeRemoveRequested { track: TrackKind, frame: u32 },
    /// Keyframe verschieben
    KeyframeMoveRequested {
        track: TrackKind,
        from: u32,
        to: u32,
    },
    /// Alle Transform-Keys eines Splats entfernen
    SplatTransformsRemoved { splat: SplatId },
    /// Alle Spuren leeren (Szene geschlossen)
    AnimationCleared,
    /// Animations-Dokument übernehmen
    AnimationDocumentLoaded { document: AnimationDocument },

    // ── Optionen ──
    /// Neue Optionen übernehmen
    OptionsChanged { options: EditorOptions },
}
