//! Handler für Laufzeit-Optionen.

use crate::app::pointer::ClickThresholds;
use crate::app::AppState;
use crate::shared::EditorOptions;
use anyhow::ensure;

/// Übernimmt neue Optionen; Klick-Schwellen gelten sofort.
///
/// Timeline-Defaults betreffen nur neue Sessions.
pub fn apply(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    ensure!(
        options.drag_threshold_px >= 0.0,
        "Drag-Schwelle darf nicht negativ sein: {}",
        options.drag_threshold_px
    );
    ensure!(
        options.timeline_frames > 0,
        "Timeline braucht mindestens einen Frame"
    );
    ensure!(
        options.timeline_frame_rate > 0.0,
        "Framerate muss positiv sein: {}",
        options.timeline_frame_rate
    );

    state
        .click_detector
        .set_thresholds(ClickThresholds::from(&options));
    state.options = options;
    log::info!("Optionen übernommen");
    Ok(())
}
