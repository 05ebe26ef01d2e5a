//! Toolbar mit Overlay- und Modus-Schaltern.

use crate::app::{AppIntent, AppState};

/// Rendert die Toolbar und gibt erzeugte Events zurueck.
pub fn render_toolbar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("StadtKompass").strong());
            ui.separator();

            let routing_btn = egui::Button::new("Routing");
            if ui
                .add(routing_btn.selected(state.route.is_enabled()))
                .on_hover_text("Click two points on the map to build a route")
                .clicked()
            {
                events.push(AppIntent::RoutingToggled);
            }

            let traffic_btn = egui::Button::new("Traffic");
            if ui
                .add(traffic_btn.selected(state.view.traffic_enabled))
                .on_hover_text("Traffic flow overlay and incidents")
                .clicked()
            {
                events.push(AppIntent::TrafficToggled);
            }

            let weather_btn = egui::Button::new("Weather overlay");
            if ui
                .add(weather_btn.selected(state.view.weather_overlay_enabled))
                .on_hover_text("Precipitation radar and conditions label")
                .clicked()
            {
                events.push(AppIntent::WeatherOverlayToggled);
            }

            ui.separator();

            if ui.button("\u{2212}").on_hover_text("Zoom out").clicked() {
                events.push(AppIntent::ZoomOutRequested);
            }
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                events.push(AppIntent::ZoomInRequested);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Quit").clicked() {
                    events.push(AppIntent::ExitRequested);
                }
            });
        });
    });

    events
}
