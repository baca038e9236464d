use glam::{DVec2, DVec3};
use splat_editor_tools::anim::{CameraPose, KeyDirection, SplatId, SplatTransform};
use splat_editor_tools::app::PointerButton;
use splat_editor_tools::{
    AppCommand, AppController, AppIntent, AppNotification, AppState, AreaState, EditorOptions,
    KeyframeValue, TrackKind,
};

/// Picker, der Screen-Pixel 1:1 auf die XY-Ebene abbildet.
fn plane_picker(screen: DVec2) -> Option<DVec3> {
    Some(DVec3::new(screen.x, screen.y, 0.0))
}

fn click(controller: &mut AppController, state: &mut AppState, pos: DVec2, time_ms: u64) {
    controller
        .handle_intent(
            state,
            AppIntent::CanvasPointerDown {
                pointer_id: 1,
                screen_pos: pos,
                button: PointerButton::Primary,
                time_ms,
            },
        )
        .expect("PointerDown sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(
            state,
            AppIntent::CanvasPointerUp {
                pointer_id: 1,
                screen_pos: pos,
                button: PointerButton::Primary,
                time_ms: time_ms + 50,
            },
        )
        .expect("PointerUp sollte ohne Fehler durchlaufen");
}

fn last_area(state: &AppState) -> Option<f64> {
    state
        .pending_notifications()
        .iter()
        .rev()
        .find_map(|n| match n {
            AppNotification::AreaMeasurementUpdated { snapshot } => Some(snapshot.area),
            _ => None,
        })
        .flatten()
}

#[test]
fn test_toggle_logs_activate_command() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, AppIntent::AreaToolToggled)
        .expect("AreaToolToggled sollte ohne Fehler durchlaufen");

    let last = state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    assert_eq!(last, &AppCommand::ActivateAreaTool);
    assert_eq!(state.area_tool.state(), AreaState::Active);
}

#[test]
fn test_canvas_clicks_measure_unit_square() {
    let mut controller = AppController::with_picker(plane_picker);
    let mut state = AppState::new();
    controller
        .handle_intent(&mut state, AppIntent::AreaToolActivated)
        .expect("Aktivieren sollte ohne Fehler durchlaufen");

    let corners = [
        DVec2::new(0.0, 0.0),
        DVec2::new(10.0, 0.0),
        DVec2::new(10.0, 10.0),
        DVec2::new(0.0, 10.0),
    ];
    for (i, corner) in corners.iter().enumerate() {
        click(&mut controller, &mut state, *corner, 1000 * i as u64);
    }
    assert_eq!(state.area_tool.points().len(), 4);

    controller
        .handle_intent(&mut state, AppIntent::AreaCloseRequested)
        .expect("Schließen sollte ohne Fehler durchlaufen");

    let area = last_area(&state).expect("Fläche erwartet");
    assert!((area - 100.0).abs() < 1e-9);
}

#[test]
fn test_drag_does_not_add_point() {
    let mut controller = AppController::with_picker(plane_picker);
    let mut state = AppState::new();
    controller
        .handle_intent(&mut state, AppIntent::AreaToolActivated)
        .expect("Aktivieren sollte ohne Fehler durchlaufen");

    let intents = [
        AppIntent::CanvasPointerDown {
            pointer_id: 7,
            screen_pos: DVec2::ZERO,
            button: PointerButton::Primary,
            time_ms: 0,
        },
        AppIntent::CanvasPointerMoved {
            pointer_id: 7,
            screen_pos: DVec2::new(40.0, 0.0),
        },
        AppIntent::CanvasPointerUp {
            pointer_id: 7,
            screen_pos: DVec2::new(40.0, 0.0),
            button: PointerButton::Primary,
            time_ms: 100,
        },
    ];
    for intent in intents {
        controller
            .handle_intent(&mut state, intent)
            .expect("Pointer-Intent sollte ohne Fehler durchlaufen");
    }

    assert!(state.area_tool.points().is_empty());
}

#[test]
fn test_button_press_suppresses_following_canvas_click() {
    let mut controller = AppController::with_picker(plane_picker);
    let mut state = AppState::new();
    controller
        .handle_intent(&mut state, AppIntent::AreaToolActivated)
        .expect("Aktivieren sollte ohne Fehler durchlaufen");

    controller
        .handle_intent(&mut state, AppIntent::UiButtonPressed { time_ms: 5000 })
        .expect("Button-Intent sollte ohne Fehler durchlaufen");
    click(&mut controller, &mut state, DVec2::ONE, 5100);
    assert!(state.area_tool.points().is_empty());

    click(&mut controller, &mut state, DVec2::ONE, 5400);
    assert_eq!(state.area_tool.points().len(), 1);
}

#[test]
fn test_deactivate_clears_visuals() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    controller
        .handle_intent(&mut state, AppIntent::AreaToolActivated)
        .expect("Aktivieren sollte ohne Fehler durchlaufen");
    state.drain_notifications();

    controller
        .handle_intent(&mut state, AppIntent::AreaToolToggled)
        .expect("Deaktivieren sollte ohne Fehler durchlaufen");

    let notifications = state.drain_notifications();
    assert!(notifications.contains(&AppNotification::AreaVisualsCleared));
    assert!(!state.area_tool.is_active());
}

#[test]
fn test_breakline_flow_reports_surfaces() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let mut intents = vec![AppIntent::AreaToolActivated];
    for p in [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(2.0, 2.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
    ] {
        intents.push(AppIntent::AreaPointPicked { world_pos: p });
    }
    intents.extend([
        AppIntent::AreaCloseRequested,
        AppIntent::AreaSplitStartRequested,
        AppIntent::AreaSplitPointSelected { index: 0 },
        AppIntent::AreaSplitPointSelected { index: 2 },
        AppIntent::AreaBreaklineAddRequested,
    ]);
    for intent in intents {
        controller
            .handle_intent(&mut state, intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }

    let snapshot = state.area_tool.snapshot();
    assert_eq!(snapshot.breaklines.len(), 1);
    let surfaces = snapshot.surfaces.expect("Teilflächen erwartet");
    assert_eq!(surfaces.len(), 2);
    assert!((snapshot.area.expect("Fläche erwartet") - 4.0).abs() < 1e-9);
}

#[test]
fn test_keyframes_drive_splat_size_on_frame_change() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    for (frame, size) in [(0, 1.0), (90, 3.0)] {
        controller
            .handle_intent(
                &mut state,
                AppIntent::KeyframeAddRequested {
                    frame: Some(frame),
                    value: KeyframeValue::SplatSize { size },
                },
            )
            .expect("Keyframe sollte ohne Fehler gesetzt werden");
    }
    state.drain_notifications();

    controller
        .handle_intent(&mut state, AppIntent::TimelineFrameRequested { frame: 90 })
        .expect("Frame-Wechsel sollte ohne Fehler durchlaufen");

    let notifications = state.drain_notifications();
    assert!(notifications.contains(&AppNotification::TimelineFrameChanged {
        frame: 90,
        time: 90.0
    }));
    let size = notifications
        .iter()
        .find_map(|n| match n {
            AppNotification::SplatSizeChanged { size } => Some(*size),
            _ => None,
        })
        .expect("Splat-Größe erwartet");
    assert!((size - 3.0).abs() < 1e-9);
}

#[test]
fn test_playback_ticks_wrap_and_emit_frames() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, AppIntent::TimelineFrameRequested { frame: 175 })
        .expect("Frame-Wechsel sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::TimelinePlayToggled)
        .expect("Play sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::TimelineTick { dt: 0.5 })
        .expect("Tick sollte ohne Fehler durchlaufen");

    assert_eq!(state.timeline.frame(), 10);
    assert!(state.timeline.is_playing());
}

#[test]
fn test_key_skip_uses_active_track() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let pose = CameraPose {
        position: DVec3::ZERO,
        target: DVec3::Z,
    };

    let intents = [
        AppIntent::KeyframeAddRequested {
            frame: Some(20),
            value: KeyframeValue::SplatSize { size: 1.0 },
        },
        AppIntent::KeyframeAddRequested {
            frame: Some(50),
            value: KeyframeValue::CameraPose(pose),
        },
        AppIntent::TrackSelected {
            track: TrackKind::CameraPoses,
        },
        AppIntent::TimelineKeySkipRequested {
            direction: KeyDirection::Forward,
        },
    ];
    for intent in intents {
        controller
            .handle_intent(&mut state, intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }

    assert_eq!(state.timeline.frame(), 50);
}

#[test]
fn test_splat_transform_keys_emit_transforms() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let splat = SplatId(4);

    for (frame, x) in [(0, 0.0), (60, 6.0)] {
        controller
            .handle_intent(
                &mut state,
                AppIntent::KeyframeAddRequested {
                    frame: Some(frame),
                    value: KeyframeValue::SplatTransform {
                        splat,
                        transform: SplatTransform {
                            position: DVec3::new(x, 0.0, 0.0),
                            ..SplatTransform::default()
                        },
                    },
                },
            )
            .expect("Keyframe sollte ohne Fehler gesetzt werden");
    }
    state.drain_notifications();

    controller
        .handle_intent(&mut state, AppIntent::TimelineFrameRequested { frame: 60 })
        .expect("Frame-Wechsel sollte ohne Fehler durchlaufen");

    let transform = state
        .drain_notifications()
        .into_iter()
        .find_map(|n| match n {
            AppNotification::SplatTransformChanged { splat: id, transform } if id == splat => {
                Some(transform)
            }
            _ => None,
        })
        .expect("Transform erwartet");
    assert!((transform.position.x - 6.0).abs() < 1e-9);
}

#[test]
fn test_invalid_options_are_rejected() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let options = EditorOptions {
        timeline_frame_rate: 0.0,
        ..EditorOptions::default()
    };

    let result = controller.handle_intent(&mut state, AppIntent::OptionsChanged { options });

    assert!(result.is_err());
    assert_eq!(state.options, EditorOptions::default());
}

#[test]
fn test_options_update_click_thresholds() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let options = EditorOptions {
        drag_threshold_px: 20.0,
        ..EditorOptions::default()
    };

    controller
        .handle_intent(&mut state, AppIntent::OptionsChanged { options })
        .expect("Optionen sollten übernommen werden");

    assert_eq!(state.click_detector.thresholds().drag_threshold_px, 20.0);
}
