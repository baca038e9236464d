//! Application-Layer: Controller, State, Events, Handler und Tools.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod pointer;
pub mod session;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Messwerkzeug, Timeline, Spuren).
pub mod state;
pub mod tools;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent, AppNotification};
pub use pointer::{ClickDetector, ClickThresholds, PointerButton};
pub use session::{run_session, Session, SessionReport, SessionStep};
pub use state::AppState;
pub use tools::{AreaMeasurementTool, AreaState, NoPicker, PointPicker};
