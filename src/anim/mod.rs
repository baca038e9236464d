//! Keyframe-Animation: Timeline, Spuren und Dokument-Serialisierung.

pub mod document;
pub mod timeline;
pub mod track;
pub mod tracks;

pub use document::{track_params, AnimationDocument, SplatTransformEntry};
pub use timeline::{KeyDirection, Timeline};
pub use track::{Key, KeyframeTrack, TrackParams, TrackValue};
pub use tracks::{
    interpolate_rotation, AnimationFrame, AnimationTracks, CameraPose, DepthVisualization,
    KeyframeValue, SplatId, SplatTransform, SplatTransformTracks, TrackKind,
};
