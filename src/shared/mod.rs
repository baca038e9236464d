//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die von `app` und dem Binary gemeinsam
//! genutzt werden.

pub mod options;

pub use options::EditorOptions;
pub use options::{BUTTON_DEBOUNCE_MS, CLICK_DISABLE_MS, DRAG_THRESHOLD_PX, STATIC_CLICK_MAX_MS};
