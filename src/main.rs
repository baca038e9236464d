//! Splat-Editor-Tools (headless).
//!
//! Spielt eine aufgezeichnete Session (Flächenmessung, Keyframes, Timeline)
//! über den Controller ab und gibt den Report als JSON aus.
//!
//! Aufruf: `Splat-Editor-Tools <session.json> [options.toml]`

use anyhow::Context;
use splat_editor_tools::{run_session, AppController, AppState, EditorOptions, Session};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "Splat-Editor-Tools v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let mut args = std::env::args_os().skip(1);
        let session_path = args
            .next()
            .map(PathBuf::from)
            .context("Aufruf: Splat-Editor-Tools <session.json> [options.toml]")?;
        // Optionen aus TOML laden (oder Standardwerte)
        let options_path = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(EditorOptions::config_path);
        let options = EditorOptions::load_from_file(&options_path);

        let session = Session::load_from_file(&session_path)?;
        let mut state = AppState::with_options(options);
        let mut controller = AppController::new();

        let report = run_session(&mut controller, &mut state, session)
            .with_context(|| format!("Session {} fehlgeschlagen", session_path.display()))?;
        println!("{}", report.to_json_string()?);
        Ok(())
    }
}
