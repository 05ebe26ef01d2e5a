//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};
use crate::core::MapViewport;

/// Uebersetzt einen `AppIntent` in eine Sequenz ausfuehrbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],

        // ── Kartenansicht ───────────────────────────────────────
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::MapClicked { position } => {
            // Klicks in die Karte sind nur im Routing-Modus belegt.
            if state.route.is_enabled() {
                vec![AppCommand::SubmitRoutePoint { position }]
            } else {
                Vec::new()
            }
        }
        AppIntent::CameraPan { delta_px } => vec![AppCommand::PanCamera { delta_px }],
        AppIntent::CameraZoom {
            delta_levels,
            focus_px,
        } => vec![AppCommand::ZoomCamera {
            delta_levels,
            focus_px,
        }],
        AppIntent::ZoomInRequested => vec![AppCommand::ZoomCamera {
            delta_levels: MapViewport::ZOOM_STEP,
            focus_px: None,
        }],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomCamera {
            delta_levels: -MapViewport::ZOOM_STEP,
            focus_px: None,
        }],
        AppIntent::MapViewSettled => {
            // Nur bei aktivem Traffic-Overlay folgt der Incident-Refresh
            // dem Kartenausschnitt.
            if state.view.traffic_enabled {
                vec![AppCommand::SyncViewCenter, AppCommand::RefreshIncidents]
            } else {
                Vec::new()
            }
        }
        AppIntent::CenterOnRequested { position, zoom } => {
            vec![AppCommand::CenterOn { position, zoom }]
        }

        // ── Suche ───────────────────────────────────────────────
        AppIntent::SearchSubmitted { query } => {
            let query = query.trim().to_string();
            if query.is_empty() {
                Vec::new()
            } else {
                vec![AppCommand::ResolveSearch { query }]
            }
        }

        // ── Wetter ──────────────────────────────────────────────
        AppIntent::WeatherOverlayToggled => vec![AppCommand::ToggleWeatherOverlay],
        AppIntent::RefreshWeatherRequested => vec![AppCommand::RefreshWeather],

        // ── POIs ────────────────────────────────────────────────
        AppIntent::PoiCategoryChanged { category } => vec![
            AppCommand::SetPoiCategory { category },
            AppCommand::RefreshPois,
        ],
        AppIntent::RefreshPoisRequested => vec![AppCommand::RefreshPois],

        // ── Verkehr ─────────────────────────────────────────────
        AppIntent::TrafficToggled => {
            if state.options.tomtom_api_key.is_empty() {
                vec![AppCommand::SetStatusMessage {
                    message: "Traffic layer requires a TomTom API key".to_string(),
                }]
            } else {
                vec![AppCommand::ToggleTraffic]
            }
        }

        // ── OePNV ───────────────────────────────────────────────
        AppIntent::TransitAgencyChanged { agency } => {
            vec![AppCommand::SetTransitAgency { agency }]
        }
        AppIntent::TransitFetchRequested { stop_id } => {
            vec![AppCommand::FetchTransit { stop_id }]
        }

        // ── Routing ─────────────────────────────────────────────
        AppIntent::RoutingToggled => {
            if state.route.is_enabled() {
                vec![AppCommand::DisableRouting]
            } else {
                vec![AppCommand::EnableRouting]
            }
        }
        AppIntent::RouteAddressSubmitted { slot, query } => {
            let query = query.trim().to_string();
            if query.is_empty() {
                Vec::new()
            } else {
                vec![AppCommand::SubmitRouteAddress { slot, query }]
            }
        }
        AppIntent::ReplaceTargetArmed { slot } => vec![AppCommand::ArmReplaceTarget { slot }],
        AppIntent::TravelModeChanged { mode } => vec![AppCommand::SetTravelMode { mode }],
        AppIntent::ClearRouteRequested => vec![AppCommand::ClearRoute],

        // ── Job-Abschluesse ─────────────────────────────────────
        AppIntent::SearchGeocodeArrived { query, result } => {
            vec![AppCommand::ApplySearchGeocode { query, result }]
        }
        AppIntent::RouteGeocodeArrived {
            slot,
            query,
            result,
        } => vec![AppCommand::ApplyRouteGeocode {
            slot,
            query,
            result,
        }],
        AppIntent::RouteResponseArrived { request, result } => {
            vec![AppCommand::ApplyRouteResponse { request, result }]
        }
        AppIntent::WeatherArrived { position, result } => {
            vec![AppCommand::ApplyWeather { position, result }]
        }
        AppIntent::RadarFrameArrived { result } => vec![AppCommand::ApplyRadarFrame { result }],
        AppIntent::PoisArrived {
            around,
            category,
            result,
        } => vec![AppCommand::ApplyPois {
            around,
            category,
            result,
        }],
        AppIntent::IncidentsArrived { result } => vec![AppCommand::ApplyIncidents { result }],
        AppIntent::TransitArrived {
            agency,
            stop_id,
            result,
        } => vec![AppCommand::ApplyTransit {
            agency,
            stop_id,
            result,
        }],
    }
}
