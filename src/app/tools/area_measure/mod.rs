//! Flächenmess-Tool: Punkte auf der Splat-Oberfläche picken, Polygon
//! schließen, Fläche und Planarität berechnen.
//!
//! **Ablauf:** Tool aktivieren → Punkte per Klick setzen → Polygon schließen.
//! Danach können einzelne Punkte neu gesetzt (`prepare_redo`) oder das
//! Polygon über Bruchkanten in Teilflächen zerlegt werden.
//!
//! Phasen: `Inactive → Active → {WaitingRedo, SplitSelect} → Active → Inactive`.

mod geometry;
mod lifecycle;
mod snapshot;
mod state;

pub use geometry::{split_by_breaklines, split_loop, Surface};
pub use snapshot::AreaMeasurementSnapshot;
pub use state::{AreaMeasurementTool, AreaState, Breakline, SplitAreas};
