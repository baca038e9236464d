//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        // ── Flächenmessung ──
        AppIntent::AreaToolToggled => {
            if state.area_tool.is_active() {
                vec![AppCommand::DeactivateAreaTool]
            } else {
                vec![AppCommand::ActivateAreaTool]
            }
        }
        AppIntent::AreaToolActivated => vec![AppCommand::ActivateAreaTool],
        AppIntent::AreaToolDeactivated => vec![AppCommand::DeactivateAreaTool],
        AppIntent::CanvasPointerDown {
            pointer_id,
            screen_pos,
            button,
            time_ms,
        } => {
            // Ohne aktives Werkzeug gehören Klicks der Kamera
            if !state.area_tool.is_active() {
                return vec![];
            }
            vec![AppCommand::BeginCanvasClick {
                pointer_id,
                screen_pos,
                button,
                time_ms,
            }]
        }
        AppIntent::CanvasPointerMoved {
            pointer_id,
            screen_pos,
        } => {
            if !state.click_detector.has_pending() {
                return vec![];
            }
            vec![AppCommand::TrackCanvasPointer {
                pointer_id,
                screen_pos,
            }]
        }
        AppIntent::CanvasPointerUp {
            pointer_id,
            screen_pos,
            button,
            time_ms,
        } => {
            if !state.click_detector.has_pending() {
                return vec![];
            }
            vec![AppCommand::EndCanvasClick {
                pointer_id,
                screen_pos,
                button,
                time_ms,
            }]
        }
        AppIntent::CanvasPointerCancelled => vec![AppCommand::CancelCanvasClick],
        AppIntent::UiButtonPressed { time_ms } => {
            vec![AppCommand::SuppressCanvasClicks { time_ms }]
        }
        AppIntent::AreaPointPicked { world_pos } => vec![AppCommand::CommitAreaPoint { world_pos }],
        AppIntent::AreaClearRequested => vec![AppCommand::ClearAreaPoints],
        AppIntent::AreaCloseRequested => vec![AppCommand::CloseAreaPolygon],
        AppIntent::AreaRedoPointRequested { index } => vec![AppCommand::PrepareAreaRedo { index }],
        AppIntent::AreaSplitStartRequested => vec![AppCommand::StartAreaSplit],
        AppIntent::AreaSplitCancelled => vec![AppCommand::CancelAreaSplit],
        AppIntent::AreaSplitPointSelected { index } => {
            vec![AppCommand::PickAreaSplitIndex { index }]
        }
        AppIntent::AreaBreaklineAddRequested => vec![AppCommand::AddBreaklineFromSelection],
        AppIntent::AreaBreaklineBetweenRequested { a, b } => {
            vec![AppCommand::AddBreakline { a, b }]
        }
        AppIntent::AreaBreaklineModeStopped => vec![AppCommand::StopBreaklineMode],
        AppIntent::AreaBreaklineUndoRequested => vec![AppCommand::UndoBreakline],
        AppIntent::AreaBreaklinesCleared => vec![AppCommand::ClearBreaklines],

        // ── Timeline ──
        AppIntent::TimelineFramesChanged { frames } => {
            vec![AppCommand::SetTimelineFrames { frames }]
        }
        AppIntent::TimelineFrameRateChanged { frame_rate } => {
            vec![AppCommand::SetTimelineFrameRate { frame_rate }]
        }
        AppIntent::TimelineSmoothnessChanged { smoothness } => {
            vec![AppCommand::SetTimelineSmoothness { smoothness }]
        }
        AppIntent::TimelineFrameRequested { frame } => vec![AppCommand::SetTimelineFrame { frame }],
        AppIntent::TimelinePlayToggled => vec![AppCommand::SetTimelinePlaying {
            playing: !state.timeline.is_playing(),
        }],
        AppIntent::TimelinePlayingSet { playing } => {
            vec![AppCommand::SetTimelinePlaying { playing }]
        }
        AppIntent::TimelineTick { dt } => {
            if !state.timeline.is_playing() {
                return vec![];
            }
            vec![AppCommand::AdvanceTimeline { dt }]
        }
        AppIntent::TimelinePrevFrameRequested => {
            vec![AppCommand::StepTimelineFrame { forward: false }]
        }
        AppIntent::TimelineNextFrameRequested => {
            vec![AppCommand::StepTimelineFrame { forward: true }]
        }
        AppIntent::TimelineKeySkipRequested { direction } => {
            vec![AppCommand::SkipToKey { direction }]
        }

        // ── Keyframes ──
        AppIntent::TrackSelected { track } => vec![AppCommand::SelectTrack { track }],
        AppIntent::KeyframeAddRequested { frame, value } => vec![AppCommand::AddKeyframe {
            frame: frame.unwrap_or_else(|| state.timeline.frame()),
            value,
        }],
        AppIntent::KeyframeRemoveRequested { track, frame } => {
            vec![AppCommand::RemoveKeyframe { track, frame }]
        }
        AppIntent::KeyframeMoveRequested { track, from, to } => {
            if from == to {
                return vec![];
            }
            vec![AppCommand::MoveKeyframe { track, from, to }]
        }
        AppIntent::SplatTransformsRemoved { splat } => {
            vec![AppCommand::RemoveSplatTransforms { splat }]
        }
        AppIntent::AnimationCleared => vec![AppCommand::ClearAnimation],
        AppIntent::AnimationDocumentLoaded { document } => {
            vec![AppCommand::LoadAnimationDocument { document }]
        }

        // ── Optionen ──
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
    }
}
