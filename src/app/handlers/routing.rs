//! Handler fuer den Routing-Modus.
//!
//! Die Transitionen selbst liegen im `core::route::RouteEditor`; dieser
//! Handler uebersetzt dessen Ereignisse in Praesentation (Marker, Linie,
//! Statuszeile) und stoesst Hintergrund-Jobs an. Die Marker/Linien-Handles
//! der Route gehoeren exklusiv dem `RoutePanelState`; vor jedem Ersetzen
//! wird das alte Handle entfernt.

use crate::app::state::{StatusTone, ROUTE_PROMPT_INITIAL};
use crate::app::{AppState, JobRunner};
use crate::core::{
    ComputedRoute, GeoPosition, RouteEvent, RouteFailure, RouteRequest, RouteSlot,
};
use crate::map::MarkerStyle;
use crate::providers::ProviderError;
use crate::shared::DEFAULT_ZOOM;

/// Rand in Pixeln beim Einpassen der Routen-Bounds.
const FIT_PADDING_PX: f32 = 50.0;

/// Eingabekanal eines Punkts; bestimmt nur den Prompt-Text.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PointChannel {
    MapClick,
    Address,
}

/// Aktiviert den Routing-Modus.
pub fn enable(state: &mut AppState) {
    state.route.enable();
    state.route_panel.status = ROUTE_PROMPT_INITIAL.to_string();
    state.route_panel.status_tone = StatusTone::Neutral;
    log::info!("Routing-Modus aktiviert");
}

/// Deaktiviert den Routing-Modus; der Editor setzt sich vollstaendig
/// zurueck.
pub fn disable(state: &mut AppState, jobs: &JobRunner) {
    let events = state.route.disable();
    apply_route_events(state, jobs, events, PointChannel::MapClick);
    log::info!("Routing-Modus deaktiviert");
}

/// Karten-Klick im Routing-Modus.
pub fn submit_point(state: &mut AppState, jobs: &JobRunner, position: GeoPosition) {
    let events = state.route.submit_point(position);
    apply_route_events(state, jobs, events, PointChannel::MapClick);
}

/// Armiert den One-Shot-Replace-Modus bzw. hebt ihn auf.
pub fn arm_replace_target(state: &mut AppState, slot: Option<RouteSlot>) {
    let events = state.route.set_replace_target(slot);
    for event in events {
        if let RouteEvent::ReplaceTargetChanged { target } = event {
            set_replace_prompt(state, target);
        }
    }
}

/// Startet den Geocode fuer eine Slot-Adresse.
pub fn submit_address(state: &mut AppState, jobs: &JobRunner, slot: RouteSlot, query: String) {
    if !state.route.is_enabled() {
        return;
    }
    log::info!("Routen-Geocode ({slot:?}): {query}");
    state.route_panel.status = "Looking up address...".to_string();
    state.route_panel.status_tone = StatusTone::Neutral;
    jobs.resolve_route_address(slot, query);
}

/// Uebernimmt ein Geocode-Ergebnis fuer einen Slot.
///
/// Fehlschlaege werden lokal gemeldet und lassen den Editor-Zustand
/// unveraendert (GeocodeFailed-Taxonomie).
pub fn apply_geocode(
    state: &mut AppState,
    jobs: &JobRunner,
    slot: RouteSlot,
    query: &str,
    result: Result<GeoPosition, ProviderError>,
) {
    match result {
        Ok(position) => {
            let events = state.route.submit_address_resolved(slot, position);
            if !events.is_empty() {
                state.view.viewport.center = position;
                state.view.viewport.set_zoom(DEFAULT_ZOOM);
            }
            apply_route_events(state, jobs, events, PointChannel::Address);
        }
        Err(ProviderError::NoResult) => {
            log::info!("Routen-Geocode ohne Treffer: {query}");
            state.route_panel.status = "Location not found. Try a different address.".to_string();
            state.route_panel.status_tone = StatusTone::Error;
        }
        Err(e) => {
            log::warn!("Routen-Geocode fehlgeschlagen: {e}");
            state.route_panel.status =
                "Failed to find location. Check your internet connection.".to_string();
            state.route_panel.status_tone = StatusTone::Error;
        }
    }
}

/// Wechselt die Fortbewegungsart; in `HasBoth` wird neu berechnet.
pub fn set_travel_mode(state: &mut AppState, jobs: &JobRunner, mode: crate::core::TravelMode) {
    let events = state.route.set_travel_mode(mode);
    apply_route_events(state, jobs, events, PointChannel::MapClick);
}

/// Verwirft Route und Wegpunkte.
pub fn clear(state: &mut AppState, jobs: &JobRunner) {
    let events = state.route.clear();
    apply_route_events(state, jobs, events, PointChannel::MapClick);
}

/// Uebernimmt eine Routing-Antwort; der Editor verwirft verspaetete
/// Antworten anhand des Anfrage-Snapshots.
pub fn apply_route_response(
    state: &mut AppState,
    jobs: &JobRunner,
    request: &RouteRequest,
    result: Result<ComputedRoute, ProviderError>,
) {
    let outcome = result.map_err(|e| match e {
        ProviderError::NoResult => RouteFailure::NoRouteFound,
        other => {
            log::warn!("Routing-Provider fehlgeschlagen: {other}");
            RouteFailure::ProviderUnreachable
        }
    });
    let events = state.route.apply_route_response(request, outcome);
    if events.is_empty() {
        log::debug!("Routing-Antwort {} verworfen (veraltet)", request.id);
        return;
    }
    apply_route_events(state, jobs, events, PointChannel::MapClick);
}

/// Uebersetzt Editor-Ereignisse in Marker, Linie, Statuszeile und Jobs.
fn apply_route_events(
    state: &mut AppState,
    jobs: &JobRunner,
    events: Vec<RouteEvent>,
    channel: PointChannel,
) {
    for event in events {
        match event {
            RouteEvent::WaypointsChanged { start, end } => {
                sync_slot_marker(state, RouteSlot::Start, start);
                sync_slot_marker(state, RouteSlot::End, end);
                set_phase_prompt(state, channel);
            }
            RouteEvent::ReplaceTargetChanged { target } => {
                set_replace_prompt(state, target);
            }
            RouteEvent::RouteRequested(request) => {
                state.route_panel.status = "Calculating route...".to_string();
                state.route_panel.status_tone = StatusTone::Neutral;
                log::info!(
                    "Routenanfrage {}: ({:.5}, {:.5}) -> ({:.5}, {:.5}), {:?}",
                    request.id,
                    request.start.lat,
                    request.start.lng,
                    request.end.lat,
                    request.end.lng,
                    request.mode
                );
                jobs.compute_route(request);
            }
            RouteEvent::RouteComputed(route) => {
                if let Some(old) = state.route_panel.line.take() {
                    state.view.scene.remove_line(old);
                }
                let handle = state.view.scene.draw_polyline(route.geometry.clone());
                state.route_panel.line = Some(handle);
                if let Some(bounds) = state.view.scene.line_bounds(handle) {
                    state.view.viewport.fit_bounds(bounds, FIT_PADDING_PX);
                }
                state.route_panel.status = "Route calculated!".to_string();
                state.route_panel.status_tone = StatusTone::Success;
                log::info!(
                    "Route berechnet: {:.0} m, {:.0} s",
                    route.distance_meters,
                    route.duration_seconds
                );
            }
            RouteEvent::RouteFailed(failure) => {
                state.route_panel.status =
                    "Failed to calculate route. Try different points.".to_string();
                state.route_panel.status_tone = StatusTone::Error;
                log::warn!("Routenberechnung fehlgeschlagen: {failure:?}");
            }
            RouteEvent::Cleared => {
                state.route_panel.start_input.clear();
                state.route_panel.end_input.clear();
                if let Some(line) = state.route_panel.line.take() {
                    state.view.scene.remove_line(line);
                }
                state.route_panel.status = ROUTE_PROMPT_INITIAL.to_string();
                state.route_panel.status_tone = StatusTone::Neutral;
            }
        }
    }
}

/// Synchronisiert den Marker eines Slots mit dessen Belegung.
fn sync_slot_marker(state: &mut AppState, slot: RouteSlot, position: Option<GeoPosition>) {
    let (handle_slot, label, style) = match slot {
        RouteSlot::Start => (
            &mut state.route_panel.start_marker,
            "Start",
            MarkerStyle::RouteStart,
        ),
        RouteSlot::End => (&mut state.route_panel.end_marker, "End", MarkerStyle::RouteEnd),
    };
    if let Some(old) = handle_slot.take() {
        state.view.scene.remove_marker(old);
    }
    if let Some(position) = position {
        *handle_slot = Some(state.view.scene.show_marker(position, label, style));
    }
}

/// Prompt nach einer Slot-Aenderung, abhaengig vom Belegungszustand.
fn set_phase_prompt(state: &mut AppState, channel: PointChannel) {
    use crate::core::RoutePhase;
    match state.route.phase() {
        RoutePhase::Empty => {
            state.route_panel.status = ROUTE_PROMPT_INITIAL.to_string();
            state.route_panel.status_tone = StatusTone::Neutral;
        }
        RoutePhase::HasStart => {
            state.route_panel.status = match channel {
                PointChannel::MapClick => "Click destination point or enter address".to_string(),
                PointChannel::Address => "Now set destination".to_string(),
            };
            state.route_panel.status_tone = StatusTone::Neutral;
        }
        // HasBoth: das folgende RouteRequested-Ereignis setzt den Status.
        RoutePhase::HasBoth => {}
    }
}

/// Prompt fuer den Replace-Modus.
fn set_replace_prompt(state: &mut AppState, target: Option<RouteSlot>) {
    state.route_panel.status_tone = StatusTone::Neutral;
    state.route_panel.status = match target {
        Some(RouteSlot::Start) => "Next map click replaces the start pin".to_string(),
        Some(RouteSlot::End) => "Next map click replaces the end pin".to_string(),
        None => ROUTE_PROMPT_INITIAL.to_string(),
    };
}
