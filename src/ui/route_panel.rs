//! Rechtes Routen-Panel: Eingaben, Replace-Buttons, Zusammenfassung,
//! Navigationsschritte.

use crate::app::{AppIntent, AppState, StatusTone};
use crate::core::units::{format_duration, format_route_distance, format_step_distance};
use crate::core::{RouteSlot, TravelMode};

/// Rendert das Routen-Panel (nur im Routing-Modus sichtbar).
pub fn render_route_panel(ctx: &egui::Context, state: &mut AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();
    if !state.route.is_enabled() {
        return events;
    }

    egui::SidePanel::right("route_panel")
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Route");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("\u{2715}").on_hover_text("Close routing").clicked() {
                        events.push(AppIntent::RoutingToggled);
                    }
                });
            });

            let status_color = match state.route_panel.status_tone {
                StatusTone::Neutral => ui.visuals().text_color(),
                StatusTone::Success => egui::Color32::from_rgb(0x22, 0xc5, 0x5e),
                StatusTone::Error => egui::Color32::from_rgb(0xef, 0x44, 0x44),
            };
            ui.colored_label(status_color, &state.route_panel.status);
            ui.separator();

            address_row(ui, state, RouteSlot::Start, &mut events);
            address_row(ui, state, RouteSlot::End, &mut events);

            ui.horizontal(|ui| {
                ui.label("Mode:");
                let current = state.route.mode();
                egui::ComboBox::from_id_salt("travel_mode")
                    .selected_text(current.label())
                    .show_ui(ui, |ui| {
                        let mut selected = current;
                        for mode in TravelMode::ALL {
                            if ui
                                .selectable_value(&mut selected, mode, mode.label())
                                .clicked()
                                && mode != current
                            {
                                events.push(AppIntent::TravelModeChanged { mode });
                            }
                        }
                    });

                if ui.button("Clear route").clicked() {
                    events.push(AppIntent::ClearRouteRequested);
                }
            });

            if let Some(route) = state.route.last_route() {
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format_route_distance(route.distance_meters))
                            .strong(),
                    );
                    ui.label("\u{2022}");
                    ui.label(
                        egui::RichText::new(format_duration(route.duration_seconds)).strong(),
                    );
                });

                ui.separator();
                ui.label(egui::RichText::new("Directions").strong());
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if route.steps.is_empty() {
                        ui.weak("No turn-by-turn steps for this route.");
                    }
                    for (index, step) in route.steps.iter().enumerate() {
                        ui.label(
                            egui::RichText::new(format!("Step {}", index + 1)).strong(),
                        );
                        let message = if step.message.is_empty() {
                            "Continue"
                        } else {
                            step.message.as_str()
                        };
                        ui.label(message);
                        ui.weak(format_step_distance(step.route_offset_meters));
                        ui.add_space(4.0);
                    }
                });
            } else {
                ui.weak("No route calculated yet");
            }
        });

    events
}

/// Eingabezeile eines Slots: Adresse setzen + Replace-Pin armieren.
fn address_row(
    ui: &mut egui::Ui,
    state: &mut AppState,
    slot: RouteSlot,
    events: &mut Vec<AppIntent>,
) {
    let label = match slot {
        RouteSlot::Start => "From:",
        RouteSlot::End => "To:",
    };
    ui.label(label);
    ui.horizontal(|ui| {
        let response = {
            let input = match slot {
                RouteSlot::Start => &mut state.route_panel.start_input,
                RouteSlot::End => &mut state.route_panel.end_input,
            };
            ui.add(egui::TextEdit::singleline(input).hint_text("Address").desired_width(160.0))
        };
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if submitted || ui.button("Set").clicked() {
            let query = match slot {
                RouteSlot::Start => state.route_panel.start_input.clone(),
                RouteSlot::End => state.route_panel.end_input.clone(),
            };
            events.push(AppIntent::RouteAddressSubmitted { slot, query });
        }

        let armed = state.route.replace_target() == Some(slot);
        let replace_btn = egui::Button::new("Replace pin");
        if ui
            .add(replace_btn.selected(armed))
            .on_hover_text("Next map click replaces this pin")
            .clicked()
        {
            // Erneuter Klick auf den armierten Button hebt den Modus auf.
            events.push(AppIntent::ReplaceTargetArmed {
                slot: if armed { None } else { Some(slot) },
            });
        }
    });
}
