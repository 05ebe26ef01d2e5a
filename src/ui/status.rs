//! Status-Bar am unteren Bildschirmrand.

use crate::app::state::FetchState;
use crate::app::AppState;
use crate::core::RoutePhase;

/// Rendert die Status-Bar.
pub fn render_status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let center = state.view.viewport.center;
            ui.label(format!(
                "Center: ({:.4}, {:.4}) | Zoom: {:.1}",
                center.lat, center.lng, state.view.viewport.zoom
            ));

            ui.separator();

            let poi_count = state.panels.pois.data().map_or(0, Vec::len);
            ui.label(format!("POIs: {poi_count}"));

            ui.separator();

            ui.label(format!(
                "Traffic: {}",
                if state.view.traffic_enabled { "On" } else { "Off" }
            ));

            if state.route.is_enabled() {
                ui.separator();
                let phase = match state.route.phase() {
                    RoutePhase::Empty => "no points",
                    RoutePhase::HasStart => "start set",
                    RoutePhase::HasBoth => "start and end set",
                };
                ui.label(format!("Routing: {phase}"));
            }

            if matches!(state.panels.weather, FetchState::Loading)
                || state.panels.pois.is_loading()
                || state.panels.incidents.is_loading()
            {
                ui.separator();
                ui.spinner();
            }

            // Statusnachricht (z.B. fehlender API-Key)
            if let Some(ref msg) = state.ui.status_message {
                ui.separator();
                ui.label(egui::RichText::new(format!("\u{26a0} {msg}")).color(egui::Color32::YELLOW));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if state.options.missing_required_keys() {
                    ui.label(
                        egui::RichText::new("\u{26a0} API keys missing \u{2014} see config.example.toml")
                            .color(egui::Color32::YELLOW),
                    );
                }
            });
        });
    });
}
