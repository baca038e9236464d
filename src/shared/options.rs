//! Zentrale Konfiguration der Splat-Editor-Tools.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Klick-Erkennung ─────────────────────────────────────────────────

/// Bewegung in Screen-Pixeln, ab der ein Pointer-Down als Drag gilt.
pub const DRAG_THRESHOLD_PX: f64 = 6.0;
/// Maximale Haltedauer eines statischen Klicks in Millisekunden.
pub const STATIC_CLICK_MAX_MS: u64 = 300;
/// Canvas-Klicks kurz nach einem Button-Klick werden ignoriert (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 250;
/// Harte Sperre für Canvas-Klicks nach einem Button-Druck (ms).
pub const CLICK_DISABLE_MS: u64 = 300;

// ── Timeline ────────────────────────────────────────────────────────

/// Frame-Anzahl neuer Timelines.
pub const TIMELINE_FRAMES: u32 = crate::anim::timeline::DEFAULT_FRAMES;
/// Framerate neuer Timelines.
pub const TIMELINE_FRAME_RATE: f64 = crate::anim::timeline::DEFAULT_FRAME_RATE;
/// Spline-Glättung neuer Timelines.
pub const TIMELINE_SMOOTHNESS: f64 = crate::anim::timeline::DEFAULT_SMOOTHNESS;

// ── Report ──────────────────────────────────────────────────────────

/// Nachkommastellen für formatierte Flächenwerte.
pub const REPORT_DECIMALS: usize = 3;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `splat_editor_tools.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    // ── Klick-Erkennung ─────────────────────────────────────────
    /// Drag-Schwelle in Screen-Pixeln
    pub drag_threshold_px: f64,
    /// Maximale Dauer eines statischen Klicks (ms)
    pub static_click_max_ms: u64,
    /// Entprellzeit nach Button-Klicks (ms)
    pub button_debounce_ms: u64,
    /// Sperrzeit für Canvas-Klicks nach Button-Druck (ms)
    pub click_disable_ms: u64,

    // ── Timeline ────────────────────────────────────────────────
    /// Frame-Anzahl neuer Timelines
    pub timeline_frames: u32,
    /// Framerate neuer Timelines
    pub timeline_frame_rate: f64,
    /// Spline-Glättung neuer Timelines (0..=1)
    pub timeline_smoothness: f64,

    // ── Report ──────────────────────────────────────────────────
    /// Nachkommastellen für Flächen im Report
    pub report_decimals: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            static_click_max_ms: STATIC_CLICK_MAX_MS,
            button_debounce_ms: BUTTON_DEBOUNCE_MS,
            click_disable_ms: CLICK_DISABLE_MS,
            timeline_frames: TIMELINE_FRAMES,
            timeline_frame_rate: TIMELINE_FRAME_RATE,
            timeline_smoothness: TIMELINE_SMOOTHNESS,
            report_decimals: REPORT_DECIMALS,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("splat_editor_tools"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("splat_editor_tools.toml")
    }
}
