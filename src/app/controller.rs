//! Application Controller fuer zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState, JobRunner};

/// Orchestriert UI-Events und Handler auf dem AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent ueber Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        jobs: &JobRunner,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = super::intent_mapping::map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, jobs, command)?;
        }

        Ok(())
    }

    /// Fuehrt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        jobs: &JobRunner,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            AppCommand::RequestExit => state.should_exit = true,
            AppCommand::SetStatusMessage { message } => {
                state.ui.status_message = Some(message);
            }

            // === Kartenansicht ===
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
            AppCommand::PanCamera { delta_px } => handlers::view::pan(state, delta_px),
            AppCommand::ZoomCamera {
                delta_levels,
                focus_px,
            } => handlers::view::zoom(state, delta_levels, focus_px),
            AppCommand::CenterOn { position, zoom } => {
                handlers::view::center_on(state, position, zoom)
            }
            AppCommand::SyncViewCenter => handlers::view::sync_view_center(state),

            // === Suche & Wetter ===
            AppCommand::ResolveSearch { query } => {
                handlers::search::resolve_search(state, jobs, query)
            }
            AppCommand::ApplySearchGeocode { query, result } => {
                handlers::search::apply_search_geocode(state, jobs, &query, result)
            }
            AppCommand::RefreshWeather => handlers::search::refresh_weather(state, jobs),
            AppCommand::ApplyWeather { position, result } => {
                handlers::search::apply_weather(state, position, result)
            }
            AppCommand::ToggleWeatherOverlay => {
                handlers::panels::toggle_weather_overlay(state, jobs)
            }
            AppCommand::ApplyRadarFrame { result } => {
                handlers::panels::apply_radar_frame(state, result)
            }

            // === POIs ===
            AppCommand::SetPoiCategory { category } => {
                handlers::panels::set_poi_category(state, category)
            }
            AppCommand::RefreshPois => handlers::panels::refresh_pois(state, jobs),
            AppCommand::ApplyPois {
                around,
                category,
                result,
            } => handlers::panels::apply_pois(state, around, &category, result),

            // === Verkehr ===
            AppCommand::ToggleTraffic => handlers::panels::toggle_traffic(state, jobs),
            AppCommand::RefreshIncidents => handlers::panels::refresh_incidents(state, jobs),
            AppCommand::ApplyIncidents { result } => {
                handlers::panels::apply_incidents(state, result)
            }

            // === OePNV ===
            AppCommand::SetTransitAgency { agency } => {
                handlers::panels::set_transit_agency(state, agency)
            }
            AppCommand::FetchTransit { stop_id } => {
                handlers::panels::fetch_transit(state, jobs, &stop_id)
            }
            AppCommand::ApplyTransit {
                agency,
                stop_id,
                result,
            } => handlers::panels::apply_transit(state, agency, &stop_id, result),

            // === Routing ===
            AppCommand::EnableRouting => handlers::routing::enable(state),
            AppCommand::DisableRouting => handlers::routing::disable(state, jobs),
            AppCommand::SubmitRoutePoint { position } => {
                handlers::routing::submit_point(state, jobs, position)
            }
            AppCommand::ArmReplaceTarget { slot } => {
                handlers::routing::arm_replace_target(state, slot)
            }
            AppCommand::SubmitRouteAddress { slot, query } => {
                handlers::routing::submit_address(state, jobs, slot, query)
            }
            AppCommand::ApplyRouteGeocode {
                slot,
                query,
                result,
            } => handlers::routing::apply_geocode(state, jobs, slot, &query, result),
            AppCommand::SetTravelMode { mode } => {
                handlers::routing::set_travel_mode(state, jobs, mode)
            }
            AppCommand::ClearRoute => handlers::routing::clear(state, jobs),
            AppCommand::ApplyRouteResponse { request, result } => {
                handlers::routing::apply_route_response(state, jobs, &request, result)
            }
        }

        Ok(())
    }
}
