//! Handler fuer die Info-Panels: POIs, Verkehr, Wetter-Overlay, OePNV.

use crate::app::state::FetchState;
use crate::app::{AppState, JobRunner};
use crate::core::GeoPosition;
use crate::map::MarkerStyle;
use crate::providers::{
    Poi, ProviderError, RainViewerRadar, TrafficIncident, TransitAgency, TransitArrival,
};
use crate::shared::AppOptions;

/// Obergrenze der Incident-Marker auf der Karte.
const MAX_INCIDENT_MARKERS: usize = 50;

/// Setzt die POI-Kategorie und persistiert die Auswahl.
pub fn set_poi_category(state: &mut AppState, category: String) {
    state.options.poi_category = category;
    if let Err(e) = state.options.save_to_file(&AppOptions::config_path()) {
        log::warn!("Optionen konnten nicht gespeichert werden: {e:#}");
    }
}

/// Laedt die POI-Liste fuer die aktuelle Position nach.
pub fn refresh_pois(state: &mut AppState, jobs: &JobRunner) {
    if state.options.tomtom_api_key.is_empty() {
        return;
    }
    state.panels.pois = FetchState::Loading;
    jobs.fetch_pois(
        state.view.current_position,
        state.options.poi_category.clone(),
    );
}

/// Uebernimmt eine POI-Antwort und synchronisiert die Marker.
/// Antworten fuer eine andere Position oder Kategorie sind veraltet.
pub fn apply_pois(
    state: &mut AppState,
    around: GeoPosition,
    category: &str,
    result: Result<Vec<Poi>, ProviderError>,
) {
    if around != state.view.current_position || category != state.options.poi_category {
        log::debug!("POI-Antwort fuer veraltete Anfrage verworfen");
        return;
    }
    // Alte Marker immer zuerst entfernen.
    for handle in state.panels.poi_markers.drain(..) {
        state.view.scene.remove_marker(handle);
    }
    match result {
        Ok(pois) => {
            for poi in &pois {
                let handle =
                    state
                        .view
                        .scene
                        .show_marker(poi.position, poi.name.clone(), MarkerStyle::Poi);
                state.panels.poi_markers.push(handle);
            }
            state.panels.pois = FetchState::Ready(pois);
        }
        Err(e) => {
            log::warn!("POI-Suche fehlgeschlagen: {e}");
            state.panels.pois = FetchState::Failed("Failed to load POIs.".to_string());
        }
    }
}

/// Schaltet Traffic-Overlay und Incident-Liste um.
pub fn toggle_traffic(state: &mut AppState, jobs: &JobRunner) {
    state.view.traffic_enabled = !state.view.traffic_enabled;
    if state.view.traffic_enabled {
        log::info!("Traffic-Overlay aktiviert");
        refresh_incidents(state, jobs);
    } else {
        log::info!("Traffic-Overlay deaktiviert");
        clear_incident_markers(state);
        state.panels.incidents = FetchState::Idle;
    }
}

/// Laedt Verkehrsstoerungen fuer den sichtbaren Kartenausschnitt.
pub fn refresh_incidents(state: &mut AppState, jobs: &JobRunner) {
    if state.options.tomtom_api_key.is_empty() {
        return;
    }
    state.panels.incidents = FetchState::Loading;
    jobs.fetch_incidents(state.view.viewport.visible_bounds());
}

/// Uebernimmt eine Incident-Antwort und setzt die Marker neu.
pub fn apply_incidents(state: &mut AppState, result: Result<Vec<TrafficIncident>, ProviderError>) {
    if !state.view.traffic_enabled {
        log::debug!("Incident-Antwort nach Deaktivierung verworfen");
        return;
    }
    clear_incident_markers(state);
    match result {
        Ok(incidents) => {
            for incident in incidents.iter().take(MAX_INCIDENT_MARKERS) {
                let Some(position) = incident.position else {
                    continue;
                };
                let handle = state.view.scene.show_marker(
                    position,
                    incident.description.clone(),
                    MarkerStyle::Incident {
                        severity: incident.delay_magnitude,
                    },
                );
                state.panels.incident_markers.push(handle);
            }
            state.panels.incidents = FetchState::Ready(incidents);
        }
        Err(e) => {
            log::warn!("Incident-Abruf fehlgeschlagen: {e}");
            state.panels.incidents = FetchState::Failed("Failed to load incidents.".to_string());
        }
    }
}

fn clear_incident_markers(state: &mut AppState) {
    for handle in state.panels.incident_markers.drain(..) {
        state.view.scene.remove_marker(handle);
    }
}

/// Schaltet das Wetter-Overlay (Label + Radar-Kacheln) um.
pub fn toggle_weather_overlay(state: &mut AppState, jobs: &JobRunner) {
    state.view.weather_overlay_enabled = !state.view.weather_overlay_enabled;
    if state.view.weather_overlay_enabled {
        log::info!("Wetter-Overlay aktiviert");
        if !matches!(state.panels.weather, FetchState::Ready(_)) {
            super::search::refresh_weather(state, jobs);
        }
        jobs.fetch_radar_frame();
    } else {
        log::info!("Wetter-Overlay deaktiviert");
        state.view.radar_tile_template = None;
    }
}

/// Uebernimmt den juengsten Radar-Frame; Fehler lassen den bisherigen
/// Frame stehen.
pub fn apply_radar_frame(state: &mut AppState, result: Result<String, ProviderError>) {
    if !state.view.weather_overlay_enabled {
        log::debug!("Radar-Frame nach Deaktivierung verworfen");
        return;
    }
    match result {
        Ok(path) => {
            state.view.radar_tile_template = Some(RainViewerRadar::tile_url_template(&path));
        }
        Err(e) => {
            log::warn!("Radar-Metadaten fehlgeschlagen: {e}");
        }
    }
}

/// Setzt den Verkehrsbetrieb fuer Abfahrts-Abfragen.
pub fn set_transit_agency(state: &mut AppState, agency: TransitAgency) {
    state.panels.transit_agency = agency;
}

/// Ruft Abfahrten fuer eine Haltestellen-ID ab.
pub fn fetch_transit(state: &mut AppState, jobs: &JobRunner, stop_id: &str) {
    let stop_id = stop_id.trim().to_string();
    if stop_id.is_empty() {
        state.panels.transit = FetchState::Failed("Enter a stop ID first.".to_string());
        return;
    }
    let agency = state.panels.transit_agency;
    state.panels.transit = FetchState::Loading;
    state.panels.transit_last_query = Some((agency, stop_id.clone()));
    jobs.fetch_transit(agency, stop_id);
}

/// Uebernimmt eine Abfahrts-Antwort; nur die zuletzt gestellte Abfrage
/// darf das Panel fuellen.
pub fn apply_transit(
    state: &mut AppState,
    agency: TransitAgency,
    stop_id: &str,
    result: Result<Vec<TransitArrival>, ProviderError>,
) {
    let matches_last = state
        .panels
        .transit_last_query
        .as_ref()
        .is_some_and(|(a, s)| *a == agency && s.as_str() == stop_id);
    if !matches_last {
        log::debug!("Abfahrts-Antwort fuer veraltete Abfrage verworfen");
        return;
    }
    state.panels.transit = match result {
        Ok(arrivals) => FetchState::Ready(arrivals),
        Err(e) => {
            log::warn!("Abfahrts-Abruf fehlgeschlagen: {e}");
            FetchState::Failed("Failed to load arrivals. Check stop ID or API key.".to_string())
        }
    };
}
