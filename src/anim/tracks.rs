//! Konkrete Animationsspuren: Splat-Größe, Tiefen-Visualisierung,
//! Kamera-Posen und Splat-Transformationen.

use super::track::{Key, KeyframeTrack, TrackParams, TrackValue};
use glam::{DQuat, DVec3};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Einstellungen der Tiefen-Visualisierung zu einem Keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthVisualization {
    pub enabled: bool,
    pub min: f64,
    pub max: f64,
    pub reverse: bool,
    pub y_mode: bool,
    pub blend: f64,
}

impl Default for DepthVisualization {
    fn default() -> Self {
        Self {
            enabled: false,
            min: 0.0,
            max: 1.0,
            reverse: false,
            y_mode: false,
            blend: 1.0,
        }
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl TrackValue for DepthVisualization {
    const CHANNELS: usize = 6;

    fn write_channels(&self, out: &mut Vec<f64>) {
        out.extend_from_slice(&[
            flag(self.enabled),
            self.min,
            self.max,
            flag(self.reverse),
            flag(self.y_mode),
            self.blend,
        ]);
    }

    /// Boolesche Kanäle gelten ab `> 0.5` als gesetzt.
    fn from_channels(channels: &[f64]) -> Self {
        Self {
            enabled: channels[0] > 0.5,
            min: channels[1],
            max: channels[2],
            reverse: channels[3] > 0.5,
            y_mode: channels[4] > 0.5,
            blend: channels[5],
        }
    }
}

/// Kamera-Pose: Position und Blickziel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    pub target: DVec3,
}

impl TrackValue for CameraPose {
    const CHANNELS: usize = 6;

    fn write_channels(&self, out: &mut Vec<f64>) {
        out.extend_from_slice(&self.position.to_array());
        out.extend_from_slice(&self.target.to_array());
    }

    fn from_channels(channels: &[f64]) -> Self {
        Self {
            position: DVec3::from_slice(&channels[0..3]),
            target: DVec3::from_slice(&channels[3..6]),
        }
    }
}

/// Lokale Transformation eines Splats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplatTransform {
    pub position: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Default for SplatTransform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

impl TrackValue for SplatTransform {
    const CHANNELS: usize = 6;

    /// Nur Position und Skalierung laufen über den Spline.
    fn write_channels(&self, out: &mut Vec<f64>) {
        out.extend_from_slice(&self.position.to_array());
        out.extend_from_slice(&self.scale.to_array());
    }

    /// Die Rotation wird separat per Slerp bestimmt.
    fn from_channels(channels: &[f64]) -> Self {
        Self {
            position: DVec3::from_slice(&channels[0..3]),
            rotation: DQuat::IDENTITY,
            scale: DVec3::from_slice(&channels[3..6]),
        }
    }
}

/// Kennung eines Splats in der Szene (Index in der Splat-Liste).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplatId(pub u32);

/// Interpoliert die Rotation zwischen sortierten Keys.
///
/// Zwischen letztem und erstem Key wird über das Timeline-Ende hinweg
/// interpoliert: die Lücke `duration - last + first` läuft von `q_last`
/// nach `q_first`.
pub fn interpolate_rotation(keys: &[Key<SplatTransform>], time: f64, duration: f64) -> DQuat {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return DQuat::IDENTITY;
    };
    if keys.len() == 1 {
        return first.value.rotation;
    }

    let first_t = f64::from(first.frame);
    let last_t = f64::from(last.frame);
    let q_first = first.value.rotation;
    let q_last = last.value.rotation;

    if time >= last_t || time <= first_t {
        let gap = duration - last_t + first_t;
        if gap <= 0.0 {
            return if time >= last_t { q_last } else { q_first };
        }
        let u = if time >= last_t {
            (time - last_t) / gap
        } else {
            (time + duration - last_t) / gap
        };
        return q_last.slerp(q_first, u.clamp(0.0, 1.0));
    }

    let seg = keys
        .windows(2)
        .position(|w| time < f64::from(w[1].frame))
        .unwrap_or(keys.len() - 2);
    let a = &keys[seg];
    let b = &keys[seg + 1];
    let t = (time - f64::from(a.frame)) / f64::from(b.frame - a.frame);
    a.value.rotation.slerp(b.value.rotation, t)
}

/// Splat-Transformationen, je Splat eine loopende Spur.
#[derive(Debug, Clone, Default)]
pub struct SplatTransformTracks {
    tracks: IndexMap<SplatId, KeyframeTrack<SplatTransform>>,
}

impl SplatTransformTracks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Spur eines Splats.
    pub fn track(&self, splat: SplatId) -> Option<&KeyframeTrack<SplatTransform>> {
        self.tracks.get(&splat)
    }

    /// Spuren in Einfügereihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (SplatId, &KeyframeTrack<SplatTransform>)> + '_ {
        self.tracks.iter().map(|(id, track)| (*id, track))
    }

    /// Setzt den Transform-Key eines Splats.
    pub fn add(
        &mut self,
        splat: SplatId,
        frame: u32,
        transform: SplatTransform,
        params: TrackParams,
    ) -> bool {
        self.tracks
            .entry(splat)
            .or_insert_with(|| KeyframeTrack::new(true))
            .add(frame, transform, params)
    }

    /// Ersetzt alle Keys eines Splats.
    pub fn set_keys(&mut self, splat: SplatId, keys: Vec<Key<SplatTransform>>, params: TrackParams) {
        self.tracks
            .entry(splat)
            .or_insert_with(|| KeyframeTrack::new(true))
            .set_keys(keys, params);
    }

    /// Entfernt die komplette Spur eines Splats.
    pub fn remove_splat(&mut self, splat: SplatId) -> bool {
        self.tracks.shift_remove(&splat).is_some()
    }

    /// Entfernt den Key am Frame `frame` aus allen Spuren.
    pub fn remove(&mut self, frame: u32, params: TrackParams) -> bool {
        let mut removed = false;
        for track in self.tracks.values_mut() {
            removed |= track.remove(frame, params).is_some();
        }
        removed
    }

    /// Verschiebt Keys in allen Spuren.
    pub fn move_key(&mut self, from: u32, to: u32, params: TrackParams) -> bool {
        let mut moved = false;
        for track in self.tracks.values_mut() {
            moved |= track.move_key(from, to, params);
        }
        moved
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn rebuild(&mut self, params: TrackParams) {
        for track in self.tracks.values_mut() {
            track.rebuild(params);
        }
    }

    /// Sortierte, eindeutige Frames aller Spuren.
    pub fn key_frames(&self) -> Vec<u32> {
        let mut frames: Vec<u32> = self
            .tracks
            .values()
            .flat_map(|track| track.keys().iter().map(|k| k.frame))
            .collect();
        frames.sort_unstable();
        frames.dedup();
        frames
    }

    /// Wertet alle Spuren mit mindestens zwei aktiven Keys aus.
    pub fn evaluate(&self, time: f64, duration: u32) -> Vec<(SplatId, SplatTransform)> {
        self.tracks
            .iter()
            .filter(|(_, track)| track.has_spline())
            .filter_map(|(id, track)| {
                let mut transform = track.evaluate(time)?;
                transform.rotation =
                    interpolate_rotation(track.active_keys(), time, f64::from(duration));
                Some((*id, transform))
            })
            .collect()
    }
}

/// Auswahl einer Animationsspur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    #[default]
    SplatSize,
    DepthVisualization,
    CameraPoses,
    SplatTransforms,
}

/// Keyframe-Wert für eine der Spuren.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "track", rename_all = "snake_case")]
pub enum KeyframeValue {
    SplatSize { size: f64 },
    DepthVisualization(DepthVisualization),
    CameraPose(CameraPose),
    SplatTransform {
        splat: SplatId,
        transform: SplatTransform,
    },
}

impl KeyframeValue {
    /// Spur, in die der Wert gehört.
    pub fn kind(&self) -> TrackKind {
        match self {
            Self::SplatSize { .. } => TrackKind::SplatSize,
            Self::DepthVisualization(_) => TrackKind::DepthVisualization,
            Self::CameraPose(_) => TrackKind::CameraPoses,
            Self::SplatTransform { .. } => TrackKind::SplatTransforms,
        }
    }
}

/// Ausgewertete Werte aller Spuren zu einem Zeitpunkt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub time: f64,
    pub splat_size: Option<f64>,
    pub depth_visualization: Option<DepthVisualization>,
    pub camera_pose: Option<CameraPose>,
    pub splat_transforms: Vec<(SplatId, SplatTransform)>,
}

/// Alle Animationsspuren eines Dokuments.
#[derive(Debug, Clone)]
pub struct AnimationTracks {
    pub splat_size: KeyframeTrack<f64>,
    pub depth_visualization: KeyframeTrack<DepthVisualization>,
    pub camera_poses: KeyframeTrack<CameraPose>,
    pub splat_transforms: SplatTransformTracks,
}

impl Default for AnimationTracks {
    fn default() -> Self {
        Self {
            splat_size: KeyframeTrack::new(true),
            depth_visualization: KeyframeTrack::new(true),
            camera_poses: KeyframeTrack::new(false),
            splat_transforms: SplatTransformTracks::new(),
        }
    }
}

impl AnimationTracks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut alle Evaluatoren neu auf (nach Timeline-Änderungen).
    pub fn rebuild(&mut self, params: TrackParams) {
        self.splat_size.rebuild(params);
        self.depth_visualization.rebuild(params);
        self.camera_poses.rebuild(params);
        self.splat_transforms.rebuild(params);
    }

    /// Entfernt alle Keys aller Spuren.
    pub fn clear(&mut self) {
        self.splat_size.clear();
        self.depth_visualization.clear();
        self.camera_poses.clear();
        self.splat_transforms.clear();
    }

    /// Setzt einen Keyframe in der passenden Spur.
    pub fn add_key(&mut self, frame: u32, value: KeyframeValue, params: TrackParams) -> bool {
        match value {
            KeyframeValue::SplatSize { size } => self.splat_size.add(frame, size, params),
            KeyframeValue::DepthVisualization(depth) => {
                self.depth_visualization.add(frame, depth, params)
            }
            KeyframeValue::CameraPose(pose) => self.camera_poses.add(frame, pose, params),
            KeyframeValue::SplatTransform { splat, transform } => {
                self.splat_transforms.add(splat, frame, transform, params)
            }
        }
    }

    /// Entfernt den Keyframe am Frame `frame` aus der Spur `kind`.
    pub fn remove_key(&mut self, kind: TrackKind, frame: u32, params: TrackParams) -> bool {
        match kind {
            TrackKind::SplatSize => self.splat_size.remove(frame, params).is_some(),
            TrackKind::DepthVisualization => {
                self.depth_visualization.remove(frame, params).is_some()
            }
            TrackKind::CameraPoses => self.camera_poses.remove(frame, params).is_some(),
            TrackKind::SplatTransforms => self.splat_transforms.remove(frame, params),
        }
    }

    /// Verschiebt einen Keyframe innerhalb der Spur `kind`.
    pub fn move_key(&mut self, kind: TrackKind, from: u32, to: u32, params: TrackParams) -> bool {
        match kind {
            TrackKind::SplatSize => self.splat_size.move_key(from, to, params),
            TrackKind::DepthVisualization => self.depth_visualization.move_key(from, to, params),
            TrackKind::CameraPoses => self.camera_poses.move_key(from, to, params),
            TrackKind::SplatTransforms => self.splat_transforms.move_key(from, to, params),
        }
    }

    /// Key-Frames der Spur `kind`.
    pub fn key_frames(&self, kind: TrackKind) -> Vec<u32> {
        match kind {
            TrackKind::SplatSize => self.splat_size.key_frames(),
            TrackKind::DepthVisualization => self.depth_visualization.key_frames(),
            TrackKind::CameraPoses => self.camera_poses.key_frames(),
            TrackKind::SplatTransforms => self.splat_transforms.key_frames(),
        }
    }

    /// Wertet alle Spuren zur Zeit `time` aus.
    ///
    /// Kamera-Posen brauchen mindestens zwei Keys; eine einzelne Pose
    /// verändert die Kamera nicht.
    pub fn evaluate(&self, time: f64, frames: u32) -> AnimationFrame {
        AnimationFrame {
            time,
            splat_size: self.splat_size.evaluate(time),
            depth_visualization: self.depth_visualization.evaluate(time),
            camera_pose: self
                .camera_poses
                .has_spline()
                .then(|| self.camera_poses.evaluate(time))
                .flatten(),
            splat_transforms: self.splat_transforms.evaluate(time, frames),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.splat_size.is_empty()
            && self.depth_visualization.is_empty()
            && self.camera_poses.is_empty()
            && self.splat_transforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const PARAMS: TrackParams = TrackParams {
        frames: 100,
        smoothness: 1.0,
    };

    fn assert_same_rotation(a: DQuat, b: DQuat) {
        assert!((a.dot(b).abs() - 1.0).abs() < 1e-9, "{a:?} != {b:?}");
    }

    fn transform_with_yaw(angle: f64) -> SplatTransform {
        SplatTransform {
            rotation: DQuat::from_rotation_y(angle),
            ..SplatTransform::default()
        }
    }

    #[test]
    fn test_depth_flags_round_through_channels() {
        let depth = DepthVisualization {
            enabled: true,
            min: 0.2,
            max: 4.0,
            reverse: false,
            y_mode: true,
            blend: 0.5,
        };
        let mut channels = Vec::new();
        depth.write_channels(&mut channels);
        assert_eq!(channels, vec![1.0, 0.2, 4.0, 0.0, 1.0, 0.5]);

        let halfway = DepthVisualization::from_channels(&[0.5, 0.0, 1.0, 0.51, 0.49, 1.0]);
        assert!(!halfway.enabled);
        assert!(halfway.reverse);
        assert!(!halfway.y_mode);
    }

    #[test]
    fn test_depth_track_switches_flag_between_keys() {
        let mut track = KeyframeTrack::new(true);
        let off = DepthVisualization::default();
        let on = DepthVisualization {
            enabled: true,
            ..off
        };
        track.add(0, off, PARAMS);
        track.add(50, on, PARAMS);

        assert!(!track.evaluate(0.0).expect("Wert erwartet").enabled);
        assert!(track.evaluate(50.0).expect("Wert erwartet").enabled);
    }

    #[test]
    fn test_camera_track_does_not_loop() {
        let mut track = KeyframeTrack::new(false);
        let a = CameraPose {
            position: DVec3::ZERO,
            target: DVec3::Z,
        };
        let b = CameraPose {
            position: DVec3::new(10.0, 0.0, 0.0),
            target: DVec3::Z,
        };
        track.add(0, a, PARAMS);
        track.add(60, b, PARAMS);

        // Nach dem letzten Key bleibt die Kamera stehen
        let pose = track.evaluate(90.0).expect("Pose erwartet");
        assert!((pose.position.x - 10.0).abs() < 1e-12);
        let mid = track.evaluate(30.0).expect("Pose erwartet");
        assert!(mid.position.x > 0.0 && mid.position.x < 10.0);
    }

    #[test]
    fn test_rotation_inside_segment() {
        let keys = vec![
            Key {
                frame: 0,
                value: transform_with_yaw(0.0),
            },
            Key {
                frame: 50,
                value: transform_with_yaw(FRAC_PI_2),
            },
        ];
        let q = interpolate_rotation(&keys, 25.0, 100.0);
        let expected = DQuat::from_rotation_y(FRAC_PI_2 / 2.0);
        assert_same_rotation(q, expected);
    }

    #[test]
    fn test_rotation_wraps_from_last_to_first() {
        let keys = vec![
            Key {
                frame: 10,
                value: transform_with_yaw(0.0),
            },
            Key {
                frame: 70,
                value: transform_with_yaw(FRAC_PI_2),
            },
        ];
        // Lücke = 100 - 70 + 10 = 40 Frames
        let at_last = interpolate_rotation(&keys, 70.0, 100.0);
        assert_same_rotation(at_last, DQuat::from_rotation_y(FRAC_PI_2));

        let after_end = interpolate_rotation(&keys, 90.0, 100.0);
        let expected = DQuat::from_rotation_y(FRAC_PI_2 / 2.0);
        assert_same_rotation(after_end, expected);

        let before_first = interpolate_rotation(&keys, 0.0, 100.0);
        let expected = DQuat::from_rotation_y(FRAC_PI_2 * 0.25);
        assert_same_rotation(before_first, expected);

        let at_first = interpolate_rotation(&keys, 10.0, 100.0);
        assert_same_rotation(at_first, DQuat::IDENTITY);
    }

    #[test]
    fn test_animation_frame_skips_single_camera_pose() {
        let mut tracks = AnimationTracks::new();
        tracks.splat_size.add(5, 0.7, PARAMS);
        tracks.camera_poses.add(
            0,
            CameraPose {
                position: DVec3::ONE,
                target: DVec3::ZERO,
            },
            PARAMS,
        );

        let frame = tracks.evaluate(42.0, PARAMS.frames);
        assert_eq!(frame.splat_size, Some(0.7));
        assert_eq!(frame.camera_pose, None);
        assert_eq!(frame.depth_visualization, None);
        assert!(frame.splat_transforms.is_empty());
    }

    #[test]
    fn test_splat_transforms_move_and_remove_across_splats() {
        let mut tracks = SplatTransformTracks::new();
        tracks.add(SplatId(0), 0, SplatTransform::default(), PARAMS);
        tracks.add(SplatId(0), 20, SplatTransform::default(), PARAMS);
        tracks.add(SplatId(1), 20, SplatTransform::default(), PARAMS);

        assert_eq!(tracks.key_frames(), vec![0, 20]);
        assert!(tracks.move_key(20, 30, PARAMS));
        assert_eq!(tracks.key_frames(), vec![0, 30]);
        assert!(tracks.remove(30, PARAMS));
        assert_eq!(tracks.key_frames(), vec![0]);
        assert!(tracks.remove_splat(SplatId(1)));
        assert_eq!(tracks.len(), 1);
    }

    #[test]
    fn test_splat_transform_evaluation_needs_two_keys() {
        let mut tracks = SplatTransformTracks::new();
        tracks.add(SplatId(3), 0, SplatTransform::default(), PARAMS);
        assert!(tracks.evaluate(0.0, 100).is_empty());

        let moved = SplatTransform {
            position: DVec3::new(0.0, 2.0, 0.0),
            ..transform_with_yaw(FRAC_PI_2)
        };
        tracks.add(SplatId(3), 50, moved, PARAMS);
        let result = tracks.evaluate(50.0, 100);
        assert_eq!(result.len(), 1);
        let (id, transform) = result[0];
        assert_eq!(id, SplatId(3));
        assert!((transform.position.y - 2.0).abs() < 1e-12);
        assert_same_rotation(transform.rotation, moved.rotation);
    }
}
