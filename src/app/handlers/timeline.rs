//! Handler für Timeline-Steuerung und die Auswertung der Spuren.

use crate::anim::KeyDirection;
use crate::app::events::AppNotification;
use crate::app::AppState;

/// Wertet alle Spuren zur aktuellen Zeit aus und meldet die Werte.
pub fn publish_animation(state: &mut AppState) {
    let time = state.timeline.time();
    let frame = state
        .tracks
        .evaluate(time, state.timeline.frames());

    if let Some(size) = frame.splat_size {
        state.notify(AppNotification::SplatSizeChanged { size });
    }
    if let Some(settings) = frame.depth_visualization {
        state.notify(AppNotification::DepthVisualizationChanged { settings });
    }
    if let Some(pose) = frame.camera_pose {
        state.notify(AppNotification::CameraPoseChanged { pose });
    }
    for (splat, transform) in frame.splat_transforms {
        state.notify(AppNotification::SplatTransformChanged { splat, transform });
    }
}

/// Meldet Frame/Zeit und die daraus folgenden Animationswerte.
fn publish_frame(state: &mut AppState) {
    state.notify(AppNotification::TimelineFrameChanged {
        frame: state.timeline.frame(),
        time: state.timeline.time(),
    });
    publish_animation(state);
}

/// Baut alle Evaluatoren neu und wertet sofort am aktuellen Frame aus.
fn rebuild_and_publish(state: &mut AppState) {
    let params = state.track_params();
    state.tracks.rebuild(params);
    publish_animation(state);
}

pub fn set_frames(state: &mut AppState, frames: u32) {
    if state.timeline.set_frames(frames) {
        log::debug!("Timeline-Länge: {} Frames", state.timeline.frames());
        rebuild_and_publish(state);
    }
}

pub fn set_frame_rate(state: &mut AppState, frame_rate: f64) {
    if !state.timeline.set_frame_rate(frame_rate) {
        log::debug!("Framerate {} ignoriert", frame_rate);
    }
}

pub fn set_smoothness(state: &mut AppState, smoothness: f64) {
    if state.timeline.set_smoothness(smoothness) {
        rebuild_and_publish(state);
    }
}

pub fn set_frame(state: &mut AppState, frame: u32) {
    if state.timeline.set_frame(frame) {
        publish_frame(state);
    }
}

pub fn set_playing(state: &mut AppState, playing: bool) {
    if state.timeline.set_playing(playing) {
        log::debug!("Wiedergabe {}", if playing { "gestartet" } else { "gestoppt" });
    }
}

/// Schreitet die Wiedergabe fort; jede Zeitänderung wird gemeldet.
pub fn advance(state: &mut AppState, dt: f64) {
    if state.timeline.tick(dt).is_some() {
        publish_frame(state);
    }
}

pub fn step(state: &mut AppState, forward: bool) {
    let changed = if forward {
        state.timeline.next_frame()
    } else {
        state.timeline.prev_frame()
    };
    if changed {
        publish_frame(state);
    }
}

/// Springt zum benachbarten Key der aktiven Spur.
pub fn skip_to_key(state: &mut AppState, direction: KeyDirection) {
    let keys = state.active_track_keys();
    if state.timeline.skip_to_key(&keys, direction) {
        publish_frame(state);
    }
}
