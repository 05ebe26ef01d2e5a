//! Linke Seitenleiste: Suche, Wetter, POIs, OePNV.

use crate::app::state::FetchState;
use crate::app::{AppIntent, AppState};
use crate::providers::TransitAgency;

/// Angebotene POI-Kategorien (TomTom-Suchbegriffe).
const POI_CATEGORIES: [&str; 8] = [
    "restaurant",
    "cafe",
    "bar",
    "hotel",
    "supermarket",
    "atm",
    "hospital",
    "parking",
];

/// Maximal angezeigte Abfahrten.
const MAX_TRANSIT_ROWS: usize = 12;

/// Rendert die Seitenleiste und gibt erzeugte Events zurueck.
pub fn render_sidebar(ctx: &egui::Context, state: &mut AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::SidePanel::left("sidebar")
        .default_width(280.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                search_section(ui, state, &mut events);
                ui.separator();
                weather_section(ui, state, &mut events);
                ui.separator();
                poi_section(ui, state, &mut events);
                ui.separator();
                transit_section(ui, state, &mut events);
            });
        });

    events
}

fn search_section(ui: &mut egui::Ui, state: &mut AppState, events: &mut Vec<AppIntent>) {
    ui.heading("Search");
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.ui.search_input)
                .hint_text("Address or place"),
        );
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if submitted || ui.button("Go").clicked() {
            events.push(AppIntent::SearchSubmitted {
                query: state.ui.search_input.clone(),
            });
        }
    });
}

fn weather_section(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppIntent>) {
    ui.horizontal(|ui| {
        ui.heading("Weather");
        if ui.small_button("\u{21bb}").on_hover_text("Refresh").clicked() {
            events.push(AppIntent::RefreshWeatherRequested);
        }
    });
    match &state.panels.weather {
        FetchState::Idle => {
            if state.options.weatherbit_api_key.is_empty() {
                ui.weak("Weatherbit API key missing.");
            } else {
                ui.weak("No weather loaded yet.");
            }
        }
        FetchState::Loading => {
            ui.weak("Loading weather\u{2026}");
        }
        FetchState::Ready(weather) => {
            ui.label(
                egui::RichText::new(format!("{:.0}\u{00b0}C", weather.temp_c.round()))
                    .size(28.0)
                    .strong(),
            );
            ui.label(format!(
                "Feels {:.0}\u{00b0}C \u{2022} {}",
                weather.feels_like_c.round(),
                weather.description
            ));
            ui.weak(format!(
                "Wind {:.0} m/s \u{2022} RH {:.0}%",
                weather.wind_mps.round(),
                weather.humidity
            ));
        }
        FetchState::Failed(message) => {
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        }
    }
}

fn poi_section(ui: &mut egui::Ui, state: &mut AppState, events: &mut Vec<AppIntent>) {
    ui.horizontal(|ui| {
        ui.heading("Nearby");
        if ui.small_button("\u{21bb}").on_hover_text("Refresh").clicked() {
            events.push(AppIntent::RefreshPoisRequested);
        }
    });

    let mut selected = state.options.poi_category.clone();
    egui::ComboBox::from_id_salt("poi_category")
        .selected_text(selected.clone())
        .show_ui(ui, |ui| {
            for category in POI_CATEGORIES {
                if ui
                    .selectable_value(&mut selected, category.to_string(), category)
                    .clicked()
                {
                    events.push(AppIntent::PoiCategoryChanged {
                        category: category.to_string(),
                    });
                }
            }
        });

    match &state.panels.pois {
        FetchState::Idle => {
            if state.options.tomtom_api_key.is_empty() {
                ui.weak("TomTom API key missing.");
            } else {
                ui.weak("No places loaded yet.");
            }
        }
        FetchState::Loading => {
            ui.weak("Searching\u{2026}");
        }
        FetchState::Ready(pois) => {
            if pois.is_empty() {
                ui.weak("No places found nearby.");
            }
            for poi in pois {
                let distance_km = state.view.current_position.distance_km(&poi.position);
                let row = ui
                    .vertical(|ui| {
                        ui.label(egui::RichText::new(&poi.name).strong());
                        ui.weak(format!("{distance_km:.2} km \u{2022} {}", poi.address));
                    })
                    .response;
                if row.interact(egui::Sense::click()).clicked() {
                    events.push(AppIntent::CenterOnRequested {
                        position: poi.position,
                        zoom: Some(15.0),
                    });
                }
            }
        }
        FetchState::Failed(message) => {
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        }
    }

    if state.view.traffic_enabled {
        ui.separator();
        incidents_section(ui, state, events);
    }
}

fn incidents_section(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppIntent>) {
    use crate::providers::traffic::{delay_label, incident_type_label};

    ui.heading("Incidents");
    match &state.panels.incidents {
        FetchState::Idle => {
            ui.weak("Move the map to load incidents.");
        }
        FetchState::Loading => {
            ui.weak("Loading incidents\u{2026}");
        }
        FetchState::Ready(incidents) => {
            if incidents.is_empty() {
                ui.weak("No incidents in current area.");
            }
            for incident in incidents.iter().take(10) {
                let row = ui
                    .vertical(|ui| {
                        ui.label(
                            egui::RichText::new(incident_type_label(incident.icon_category))
                                .strong(),
                        );
                        ui.label(&incident.description);
                        ui.weak(format!("Delay: {}", delay_label(incident.delay_magnitude)));
                    })
                    .response;
                if let Some(position) = incident.position {
                    if row.interact(egui::Sense::click()).clicked() {
                        events.push(AppIntent::CenterOnRequested {
                            position,
                            zoom: Some(15.0),
                        });
                    }
                }
            }
        }
        FetchState::Failed(message) => {
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        }
    }
}

fn transit_section(ui: &mut egui::Ui, state: &mut AppState, events: &mut Vec<AppIntent>) {
    ui.heading("Transit arrivals");

    let mut agency = state.panels.transit_agency;
    egui::ComboBox::from_id_salt("transit_agency")
        .selected_text(agency.label())
        .show_ui(ui, |ui| {
            for candidate in TransitAgency::ALL {
                if ui
                    .selectable_value(&mut agency, candidate, candidate.label())
                    .clicked()
                {
                    events.push(AppIntent::TransitAgencyChanged { agency: candidate });
                }
            }
        });

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.ui.transit_stop_input).hint_text("Stop ID"),
        );
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if submitted || ui.button("Fetch").clicked() {
            events.push(AppIntent::TransitFetchRequested {
                stop_id: state.ui.transit_stop_input.clone(),
            });
        }
    });

    match &state.panels.transit {
        FetchState::Idle => {
            ui.weak("Enter a stop ID to see live arrivals.");
        }
        FetchState::Loading => {
            ui.weak("Loading arrivals\u{2026}");
        }
        FetchState::Ready(arrivals) => {
            if arrivals.is_empty() {
                ui.weak("No upcoming vehicles for this stop.");
            }
            for arrival in arrivals.iter().take(MAX_TRANSIT_ROWS) {
                let headsign = if arrival.headsign.is_empty() {
                    "Inbound"
                } else {
                    arrival.headsign.as_str()
                };
                ui.label(
                    egui::RichText::new(format!("{} \u{2022} {}", arrival.route, headsign))
                        .strong(),
                );
                let mut meta = state.panels.transit_agency.short_label().to_string();
                if !arrival.stop_title.is_empty() {
                    meta.push_str(&format!(" \u{2022} {}", arrival.stop_title));
                }
                if !arrival.vehicle.is_empty() {
                    meta.push_str(&format!(" \u{2022} Vehicle {}", arrival.vehicle));
                }
                ui.weak(meta);
                let when = match arrival.minutes {
                    Some(minutes) => format!("{minutes} min"),
                    None => "Due".to_string(),
                };
                ui.label(when);
                ui.add_space(4.0);
            }
        }
        FetchState::Failed(message) => {
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        }
    }
}
