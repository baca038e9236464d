//! Handler für das Flächenmess-Tool und die Klick-Erkennung der Zeichenfläche.

use crate::app::events::AppNotification;
use crate::app::pointer::PointerButton;
use crate::app::tools::PointPicker;
use crate::app::AppState;
use glam::{DVec2, DVec3};

/// Meldet den aktuellen Messzustand an den Host.
fn publish(state: &mut AppState) {
    let snapshot = state.area_tool.snapshot();
    state.notify(AppNotification::AreaMeasurementUpdated {
        snapshot: Box::new(snapshot),
    });
}

/// Führt eine Tool-Operation aus und meldet den Zustand bei Änderung.
fn apply(state: &mut AppState, op: impl FnOnce(&mut AppState) -> bool) {
    if op(state) {
        publish(state);
    }
}

pub fn activate(state: &mut AppState) {
    apply(state, |s| s.area_tool.activate());
}

/// Deaktiviert das Tool und entfernt das Overlay.
pub fn deactivate(state: &mut AppState) {
    if state.area_tool.deactivate() {
        state.click_detector.pointer_cancel();
        state.notify(AppNotification::AreaVisualsCleared);
        publish(state);
    }
}

pub fn begin_click(
    state: &mut AppState,
    pointer_id: u64,
    screen_pos: DVec2,
    button: PointerButton,
    time_ms: u64,
) {
    if !state.area_tool.is_active() {
        return;
    }
    state
        .click_detector
        .pointer_down(pointer_id, screen_pos, button, time_ms);
}

pub fn track_pointer(state: &mut AppState, pointer_id: u64, screen_pos: DVec2) {
    state.click_detector.pointer_move(pointer_id, screen_pos);
}

/// Schließt einen Klick ab und pickt bei gültigem Klick einen Weltpunkt.
pub fn end_click(
    state: &mut AppState,
    picker: &dyn PointPicker,
    pointer_id: u64,
    screen_pos: DVec2,
    button: PointerButton,
    time_ms: u64,
) {
    let Some(click_pos) = state
        .click_detector
        .pointer_up(pointer_id, screen_pos, button, time_ms)
    else {
        return;
    };
    if !state.area_tool.is_active() {
        return;
    }

    match picker.pick_point(click_pos) {
        Some(world_pos) => commit_point(state, world_pos),
        None => log::debug!(
            "Kein Weltpunkt unter ({:.1}, {:.1})",
            click_pos.x,
            click_pos.y
        ),
    }
}

pub fn cancel_click(state: &mut AppState) {
    state.click_detector.pointer_cancel();
}

pub fn suppress_clicks(state: &mut AppState, time_ms: u64) {
    state.click_detector.suppress_after_button(time_ms);
}

pub fn commit_point(state: &mut AppState, world_pos: DVec3) {
    apply(state, |s| s.area_tool.commit_point(world_pos));
}

/// Verwirft alle Punkte. Meldet immer, damit das Overlay leer wird.
pub fn clear(state: &mut AppState) {
    state.area_tool.clear();
    publish(state);
}

pub fn close_polygon(state: &mut AppState) {
    apply(state, |s| s.area_tool.close_polygon());
}

pub fn prepare_redo(state: &mut AppState, index: usize) {
    apply(state, |s| s.area_tool.prepare_redo(index));
}

pub fn start_split(state: &mut AppState) {
    apply(state, |s| s.area_tool.start_split());
}

pub fn cancel_split(state: &mut AppState) {
    state.area_tool.cancel_split();
    publish(state);
}

pub fn pick_split_index(state: &mut AppState, index: usize) {
    apply(state, |s| s.area_tool.pick_split_index(index));
}

pub fn add_breakline_from_selection(state: &mut AppState) {
    apply(state, |s| s.area_tool.add_breakline_from_selection());
}

pub fn add_breakline(state: &mut AppState, a: usize, b: usize) {
    apply(state, |s| s.area_tool.add_breakline(a, b));
}

pub fn stop_breakline_mode(state: &mut AppState) {
    state.area_tool.stop_breakline_mode();
    publish(state);
}

pub fn undo_breakline(state: &mut AppState) {
    apply(state, |s| s.area_tool.undo_last_breakline().is_some());
}

pub fn clear_breaklines(state: &mut AppState) {
    apply(state, |s| s.area_tool.clear_all_breaklines());
}
