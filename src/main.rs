// Simple Calendar Application
// Main entry point

use std::io;

use anyhow::{Context, Result};

use simple_calendar::services::calendar::Calendar;
use simple_calendar::services::event::persistence::load_events;
use simple_calendar::services::settings::{load_settings_or_default, SettingsService};
use simple_calendar::ui::ConsoleApp;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Simple Calendar");

    let settings_service = SettingsService::from_default_location();
    let settings = load_settings_or_default(&settings_service);
    if !settings_service.config_path().exists() {
        if let Err(e) = settings_service.update(&settings) {
            log::warn!("Could not write default settings: {:#}", e);
        }
    }

    let events_path = SettingsService::resolve_events_file(&settings);
    let store = load_events(&events_path, settings.missing_file)
        .with_context(|| format!("Failed to load events from {}", events_path.display()))?;

    let calendar = Calendar::new(store);
    let mut app = ConsoleApp::new(calendar, events_path, settings.backup);

    let stdin = io::stdin();
    app.run(stdin.lock(), io::stdout())?;

    log::info!("Simple Calendar closed");
    Ok(())
}
