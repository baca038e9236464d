//! Handler für Keyframe-Bearbeitung und Animations-Dokumente.

use super::timeline::publish_animation;
use crate::anim::{AnimationDocument, KeyframeValue, SplatId, TrackKind};
use crate::app::events::AppNotification;
use crate::app::AppState;

/// Meldet die Keys der aktiven Spur, falls die Spur `kind` betroffen ist.
fn publish_keys(state: &mut AppState, kind: TrackKind) {
    if kind == state.active_track {
        let keys = state.active_track_keys();
        state.notify(AppNotification::TimelineKeysChanged { keys });
    }
    publish_animation(state);
}

pub fn select_track(state: &mut AppState, track: TrackKind) {
    if state.active_track != track {
        state.active_track = track;
        publish_keys(state, track);
    }
}

pub fn add(state: &mut AppState, frame: u32, value: KeyframeValue) {
    let kind = value.kind();
    let params = state.track_params();
    if state.tracks.add_key(frame, value, params) {
        log::debug!("Keyframe {:?} bei Frame {} hinzugefügt", kind, frame);
    } else {
        log::debug!("Keyframe {:?} bei Frame {} aktualisiert", kind, frame);
    }
    publish_keys(state, kind);
}

pub fn remove(state: &mut AppState, track: TrackKind, frame: u32) {
    let params = state.track_params();
    if state.tracks.remove_key(track, frame, params) {
        publish_keys(state, track);
    }
}

pub fn move_key(state: &mut AppState, track: TrackKind, from: u32, to: u32) {
    let params = state.track_params();
    if state.tracks.move_key(track, from, to, params) {
        publish_keys(state, track);
    }
}

pub fn remove_splat(state: &mut AppState, splat: SplatId) {
    if state.tracks.splat_transforms.remove_splat(splat) {
        publish_keys(state, TrackKind::SplatTransforms);
    }
}

pub fn clear(state: &mut AppState) {
    state.tracks.clear();
    let keys = state.active_track_keys();
    state.notify(AppNotification::TimelineKeysChanged { keys });
}

/// Übernimmt Timeline und Spuren aus einem Dokument.
pub fn load_document(state: &mut AppState, document: AnimationDocument) {
    document.apply(&mut state.timeline, &mut state.tracks);
    log::info!(
        "Animation geladen: {} Frames, {} fps",
        state.timeline.frames(),
        state.timeline.frame_rate()
    );
    let keys = state.active_track_keys();
    state.notify(AppNotification::TimelineKeysChanged { keys });
    state.notify(AppNotification::TimelineFrameChanged {
        frame: state.timeline.frame(),
        time: state.timeline.time(),
    });
    publish_animation(state);
}
