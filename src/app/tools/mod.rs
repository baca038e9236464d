//! Mess-Werkzeuge im 3D-Viewport.
//!
//! Werkzeuge erhalten aufgelöste 3D-Weltpunkte über einen [`PointPicker`];
//! das Picking selbst (Ray-Cast gegen die Splats) liegt beim Host.

/// Flächenmessung mit Polygon-Erfassung, Triangulation und Bruchkanten.
pub mod area_measure;
mod point_picker;

pub use area_measure::{
    split_by_breaklines, split_loop, AreaMeasurementSnapshot, AreaMeasurementTool, AreaState,
    Breakline, SplitAreas, Surface,
};
pub use point_picker::{NoPicker, PointPicker};
