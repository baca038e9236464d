//! Core-Geometrie: Keyframe-Splines und Polygon-Flächen.
//!
//! Reine Mathematik ohne Abhängigkeit zur Render-Engine.

pub mod polygon;
pub mod spline;

pub use polygon::{
    build_edges, planarity, polygon_area, triangulated_area, Edge, Planarity, TriangulatedArea,
    Triangulation, EPSILON,
};
pub use spline::CubicSpline;
