//! Handler fuer Freitext-Suche und den Standortwechsel.

use crate::app::state::FetchState;
use crate::app::{AppState, JobRunner};
use crate::core::GeoPosition;
use crate::map::MarkerStyle;
use crate::providers::ProviderError;
use crate::shared::DEFAULT_ZOOM;

/// Startet den Geocode fuer eine Freitext-Suche.
pub fn resolve_search(state: &mut AppState, jobs: &JobRunner, query: String) {
    log::info!("Suche: {query}");
    state.ui.status_message = None;
    jobs.resolve_search(query);
}

/// Uebernimmt das Geocode-Ergebnis der Freitext-Suche.
pub fn apply_search_geocode(
    state: &mut AppState,
    jobs: &JobRunner,
    query: &str,
    result: Result<GeoPosition, ProviderError>,
) {
    match result {
        Ok(position) => set_location(state, jobs, position),
        Err(ProviderError::NoResult) => {
            log::info!("Suche ohne Treffer: {query}");
            state.ui.status_message = Some("No results found.".to_string());
        }
        Err(e) => {
            log::warn!("Suche fehlgeschlagen: {e}");
            state.ui.status_message = Some("Failed to search location.".to_string());
        }
    }
}

/// Wechselt die aktuelle Position: Karte zentrieren, Platz-Marker
/// verschieben, Wetter und POIs nachladen.
pub fn set_location(state: &mut AppState, jobs: &JobRunner, position: GeoPosition) {
    state.view.current_position = position;
    state.view.viewport.center = position;
    state.view.viewport.set_zoom(DEFAULT_ZOOM);

    // Alter Platz-Marker raus, bevor der neue gesetzt wird.
    if let Some(handle) = state.view.place_marker.take() {
        state.view.scene.remove_marker(handle);
    }
    state.view.place_marker =
        Some(state.view.scene.show_marker(position, "You are here", MarkerStyle::Place));

    refresh_weather(state, jobs);
    super::panels::refresh_pois(state, jobs);
    if state.view.weather_overlay_enabled {
        jobs.fetch_radar_frame();
    }
    if state.view.traffic_enabled {
        super::panels::refresh_incidents(state, jobs);
    }
}

/// Laedt das Wetter fuer die aktuelle Position nach.
pub fn refresh_weather(state: &mut AppState, jobs: &JobRunner) {
    if state.options.weatherbit_api_key.is_empty() {
        return;
    }
    state.panels.weather = FetchState::Loading;
    jobs.fetch_weather(state.view.current_position);
}

/// Uebernimmt eine Wetter-Antwort; verspaetete Antworten fuer eine
/// andere Position werden verworfen.
pub fn apply_weather(
    state: &mut AppState,
    position: GeoPosition,
    result: Result<crate::providers::CurrentWeather, ProviderError>,
) {
    if position != state.view.current_position {
        log::debug!("Wetter-Antwort fuer veraltete Position verworfen");
        return;
    }
    state.panels.weather = match result {
        Ok(weather) => FetchState::Ready(weather),
        Err(e) => {
            log::warn!("Wetterabruf fehlgeschlagen: {e}");
            FetchState::Failed("Failed to load weather.".to_string())
        }
    };
}
