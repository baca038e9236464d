//! Splat-Editor-Tools Library.
//! Flächenmessung und Keyframe-Animation als Library exportiert für Host,
//! Tests und Wiederverwendung.

pub mod anim;
pub mod app;
pub mod core;
pub mod shared;

pub use anim::{AnimationDocument, AnimationTracks, KeyframeValue, Timeline, TrackKind};
pub use app::{
    run_session, AppCommand, AppController, AppIntent, AppNotification, AppState,
    AreaMeasurementTool, AreaState, PointPicker, Session, SessionReport,
};
pub use core::{polygon_area, CubicSpline, Planarity};
pub use shared::EditorOptions;
