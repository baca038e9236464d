//! Schnittstelle zum Ray-Picking des Hosts.

use glam::{DVec2, DVec3};

/// Löst eine Bildschirm-Koordinate in einen 3D-Weltpunkt auf.
///
/// Implementiert vom Host (Kamera + Splat-Picking). `None` bei Fehltreffer.
pub trait PointPicker {
    /// Pickt den Weltpunkt unter `screen` (Pixel relativ zum Canvas).
    fn pick_point(&self, screen: DVec2) -> Option<DVec3>;
}

/// Picker ohne Szene: trifft nie.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPicker;

impl PointPicker for NoPicker {
    fn pick_point(&self, _screen: DVec2) -> Option<DVec3> {
        None
    }
}

impl<F> PointPicker for F
where
    F: Fn(DVec2) -> Option<DVec3>,
{
    fn pick_point(&self, screen: DVec2) -> Option<DVec3> {
        self(screen)
    }
}
