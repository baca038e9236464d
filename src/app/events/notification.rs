use crate::anim::{CameraPose, DepthVisualization, SplatId, SplatTransform};
use crate::app::tools::AreaMeasurementSnapshot;
use serde::Serialize;

/// Typisierte Ausgaben an den Host (Overlay, Panels, Renderer).
///
/// Werden im `AppState` gesammelt und vom Host per
/// `drain_notifications` abgeholt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppNotification {
    /// Neuer Messzustand nach jeder Änderung am Flächenmess-Tool
    AreaMeasurementUpdated { snapshot: Box<AreaMeasurementSnapshot> },
    /// Overlay des Messwerkzeugs entfernen
    AreaVisualsCleared,
    /// Interpolierte Splat-Größe
    SplatSizeChanged { size: f64 },
    /// Interpolierte Tiefen-Visualisierung
    DepthVisualizationChanged { settings: DepthVisualization },
    /// Interpolierte Kamera-Pose
    CameraPoseChanged { pose: CameraPose },
    /// Interpolierte Transformation eines Splats
    SplatTransformChanged {
        splat: SplatId,
        transform: SplatTransform,
    },
    /// Aktueller Frame bzw. Wiedergabezeit
    TimelineFrameChanged { frame: u32, time: f64 },
    /// Key-Frames der aktiven Spur haben sich geändert
    TimelineKeysChanged { keys: Vec<u32> },
}
