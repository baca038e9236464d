//! Application Controller für zentrale Event-Verarbeitung.

use super::tools::{NoPicker, PointPicker};
use super::{AppCommand, AppIntent, AppState};

/// Orchestriert UI-Events und Handler auf den AppState.
///
/// Der `PointPicker` wird vom Host injiziert und bildet Screen-Klicks auf
/// Weltpunkte der Szene ab.
pub struct AppController {
    picker: Box<dyn PointPicker>,
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

impl AppController {
    /// Erstellt einen Controller ohne Szene (Klicks treffen nichts).
    pub fn new() -> Self {
        Self {
            picker: Box::new(NoPicker),
        }
    }

    /// Erstellt einen Controller mit Host-Picker.
    pub fn with_picker(picker: impl PointPicker + 'static) -> Self {
        Self {
            picker: Box::new(picker),
        }
    }

    /// Ersetzt den Picker (z.B. nach Szenenwechsel).
    pub fn set_picker(&mut self, picker: impl PointPicker + 'static) {
        self.picker = Box::new(picker);
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Flächenmessung ===
            AppCommand::ActivateAreaTool => handlers::area_measure::activate(state),
            AppCommand::DeactivateAreaTool => handlers::area_measure::deactivate(state),
            AppCommand::BeginCanvasClick {
                pointer_id,
                screen_pos,
                button,
                time_ms,
            } => handlers::area_measure::begin_click(state, pointer_id, screen_pos, button, time_ms),
            AppCommand::TrackCanvasPointer {
                pointer_id,
                screen_pos,
            } => handlers::area_measure::track_pointer(state, pointer_id, screen_pos),
            AppCommand::EndCanvasClick {
                pointer_id,
                screen_pos,
                button,
                time_ms,
            } => handlers::area_measure::end_click(
                state,
                self.picker.as_ref(),
                pointer_id,
                screen_pos,
                button,
                time_ms,
            ),
            AppCommand::CancelCanvasClick => handlers::area_measure::cancel_click(state),
            AppCommand::SuppressCanvasClicks { time_ms } => {
                handlers::area_measure::suppress_clicks(state, time_ms)
            }
            AppCommand::CommitAreaPoint { world_pos } => {
                handlers::area_measure::commit_point(state, world_pos)
            }
            AppCommand::ClearAreaPoints => handlers::area_measure::clear(state),
            AppCommand::CloseAreaPolygon => handlers::area_measure::close_polygon(state),
            AppCommand::PrepareAreaRedo { index } => {
                handlers::area_measure::prepare_redo(state, index)
            }
            AppCommand::StartAreaSplit => handlers::area_measure::start_split(state),
            AppCommand::CancelAreaSplit => handlers::area_measure::cancel_split(state),
            AppCommand::PickAreaSplitIndex { index } => {
                handlers::area_measure::pick_split_index(state, index)
            }
            AppCommand::AddBreaklineFromSelection => {
                handlers::area_measure::add_breakline_from_selection(state)
            }
            AppCommand::AddBreakline { a, b } => handlers::area_measure::add_breakline(state, a, b),
            AppCommand::StopBreaklineMode => handlers::area_measure::stop_breakline_mode(state),
            AppCommand::UndoBreakline => handlers::area_measure::undo_breakline(state),
            AppCommand::ClearBreaklines => handlers::area_measure::clear_breaklines(state),

            // === Timeline ===
            AppCommand::SetTimelineFrames { frames } => {
                handlers::timeline::set_frames(state, frames)
            }
            AppCommand::SetTimelineFrameRate { frame_rate } => {
                handlers::timeline::set_frame_rate(state, frame_rate)
            }
            AppCommand::SetTimelineSmoothness { smoothness } => {
                handlers::timeline::set_smoothness(state, smoothness)
            }
            AppCommand::SetTimelineFrame { frame } => handlers::timeline::set_frame(state, frame),
            AppCommand::SetTimelinePlaying { playing } => {
                handlers::timeline::set_playing(state, playing)
            }
            AppCommand::AdvanceTimeline { dt } => handlers::timeline::advance(state, dt),
            AppCommand::StepTimelineFrame { forward } => handlers::timeline::step(state, forward),
            AppCommand::SkipToKey { direction } => {
                handlers::timeline::skip_to_key(state, direction)
            }

            // === Keyframes ===
            AppCommand::SelectTrack { track } => handlers::keyframes::select_track(state, track),
            AppCommand::AddKeyframe { frame, value } => {
                handlers::keyframes::add(state, frame, value)
            }
            AppCommand::RemoveKeyframe { track, frame } => {
                handlers::keyframes::remove(state, track, frame)
            }
            AppCommand::MoveKeyframe { track, from, to } => {
                handlers::keyframes::move_key(state, track, from, to)
            }
            AppCommand::RemoveSplatTransforms { splat } => {
                handlers::keyframes::remove_splat(state, splat)
            }
            AppCommand::ClearAnimation => handlers::keyframes::clear(state),
            AppCommand::LoadAnimationDocument { document } => {
                handlers::keyframes::load_document(state, document)
            }

            // === Optionen ===
            AppCommand::ApplyOptions { options } => handlers::options::apply(state, options)?,
        }

        Ok(())
    }
}
