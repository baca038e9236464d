//! JSON-Dokument für Timeline und alle Animationsspuren.

use super::timeline::Timeline;
use super::track::{Key, TrackParams};
use super::tracks::{AnimationTracks, CameraPose, DepthVisualization, SplatId, SplatTransform};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Transform-Keys eines einzelnen Splats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplatTransformEntry {
    pub splat: SplatId,
    #[serde(default)]
    pub name: String,
    pub transforms: Vec<Key<SplatTransform>>,
}

/// Serialisierbarer Animationszustand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDocument {
    pub timeline: Timeline,
    pub splat_size: Vec<Key<f64>>,
    pub depth_visualization: Vec<Key<DepthVisualization>>,
    pub camera_poses: Vec<Key<CameraPose>>,
    pub splat_transforms: Vec<SplatTransformEntry>,
}

/// Timeline-Parameter für den Aufbau der Evaluatoren.
pub fn track_params(timeline: &Timeline) -> TrackParams {
    TrackParams {
        frames: timeline.frames(),
        smoothness: timeline.smoothness(),
    }
}

impl AnimationDocument {
    /// Erfasst Timeline und Spuren.
    pub fn capture(timeline: &Timeline, tracks: &AnimationTracks) -> Self {
        Self {
            timeline: timeline.clone(),
            splat_size: tracks.splat_size.keys().to_vec(),
            depth_visualization: tracks.depth_visualization.keys().to_vec(),
            camera_poses: tracks.camera_poses.keys().to_vec(),
            splat_transforms: tracks
                .splat_transforms
                .iter()
                .map(|(splat, track)| SplatTransformEntry {
                    splat,
                    name: format!("splat_{}", splat.0),
                    transforms: track.keys().to_vec(),
                })
                .collect(),
        }
    }

    /// Ersetzt Timeline und Spuren durch den Dokumentinhalt.
    pub fn apply(self, timeline: &mut Timeline, tracks: &mut AnimationTracks) {
        *timeline = self.timeline;
        let params = track_params(timeline);

        tracks.clear();
        tracks.splat_size.set_keys(self.splat_size, params);
        tracks
            .depth_visualization
            .set_keys(self.depth_visualization, params);
        tracks.camera_poses.set_keys(self.camera_poses, params);
        for entry in self.splat_transforms {
            tracks
                .splat_transforms
                .set_keys(entry.splat, entry.transforms, params);
        }
    }

    /// Parst ein Dokument aus JSON; fehlende Felder erhalten Standardwerte.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Animations-Dokument konnte nicht gelesen werden")
    }

    pub fn to_json_string(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Animations-Dokument konnte nicht serialisiert werden")
    }

    /// Lädt ein Dokument aus einer Datei.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Speichert das Dokument als JSON.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json_string()?)
            .with_context(|| format!("Datei nicht schreibbar: {}", path.display()))?;
        log::info!("Animation gespeichert: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::KeyDirection;
    use glam::{DQuat, DVec3};

    #[test]
    fn test_missing_timeline_fields_use_defaults() {
        let doc = AnimationDocument::from_json_str(r#"{ "timeline": { "frames": 90 } }"#)
            .expect("gültiges Dokument");
        assert_eq!(doc.timeline.frames(), 90);
        assert_eq!(doc.timeline.frame_rate(), 30.0);
        assert_eq!(doc.timeline.smoothness(), 1.0);
        assert_eq!(doc.timeline.frame(), 0);
        assert!(doc.splat_size.is_empty());
    }

    #[test]
    fn test_out_of_range_timeline_is_sanitized_on_apply() {
        let doc = AnimationDocument::from_json_str(
            r#"{ "timeline": { "frames": 0, "smoothness": 7.0, "frame_rate": -5.0 } }"#,
        )
        .expect("gültiges Dokument");

        let mut timeline = Timeline::new();
        let mut tracks = AnimationTracks::new();
        doc.apply(&mut timeline, &mut tracks);

        assert_eq!(timeline.frames(), 1);
        assert_eq!(timeline.smoothness(), 1.0);
        assert_eq!(timeline.frame_rate(), 30.0);

        assert!(!timeline.next_frame());
        assert!(!timeline.prev_frame());
        assert!(!timeline.skip_to_key(&[], KeyDirection::Forward));
        timeline.set_playing(true);
        let time = timeline.tick(0.5).expect("Timeline läuft");
        assert!(time.is_finite());
        assert_eq!(timeline.frame(), 0);
    }

    #[test]
    fn test_empty_document_is_default() {
        let doc = AnimationDocument::from_json_str("{}").expect("gültiges Dokument");
        assert_eq!(doc, AnimationDocument::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(AnimationDocument::from_json_str("{ timeline: ").is_err());
    }

    #[test]
    fn test_capture_and_apply_restore_tracks() {
        let mut timeline = Timeline::new();
        timeline.set_frames(120);
        timeline.set_frame(12);
        let params = track_params(&timeline);

        let mut tracks = AnimationTracks::new();
        tracks.splat_size.add(0, 1.0, params);
        tracks.splat_size.add(60, 2.0, params);
        tracks.camera_poses.add(
            30,
            CameraPose {
                position: DVec3::new(1.0, 2.0, 3.0),
                target: DVec3::ZERO,
            },
            params,
        );
        tracks.splat_transforms.add(
            SplatId(2),
            10,
            SplatTransform {
                rotation: DQuat::from_rotation_x(0.3),
                ..SplatTransform::default()
            },
            params,
        );

        let json = AnimationDocument::capture(&timeline, &tracks)
            .to_json_string()
            .expect("serialisierbar");
        let doc = AnimationDocument::from_json_str(&json).expect("lesbar");

        let mut restored_timeline = Timeline::new();
        let mut restored = AnimationTracks::new();
        doc.apply(&mut restored_timeline, &mut restored);

        assert_eq!(restored_timeline.frames(), 120);
        assert_eq!(restored_timeline.frame(), 12);
        assert_eq!(restored.splat_size.keys(), tracks.splat_size.keys());
        assert_eq!(restored.camera_poses.keys(), tracks.camera_poses.keys());
        assert_eq!(restored.splat_transforms.key_frames(), vec![10]);
        assert!(restored.splat_size.has_spline());
    }
}
