//! Zentrale Kartenansicht: Kachel-Layer, Szene, Eingabe-Intents.

use crate::app::state::FetchState;
use crate::app::{AppIntent, AppState};
use crate::core::viewport::TILE_SIZE;
use crate::core::MapViewport;
use crate::map::{MapLayers, MarkerStyle, TileCoord, TileLayer};
use crate::providers::weather::overlay_kind_for_code;

// ── Farben (an die Web-Vorlage angelehnt) ───────────────────────────

const ROUTE_LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x3b, 0x82, 0xf6);
const ROUTE_START_COLOR: egui::Color32 = egui::Color32::from_rgb(0x22, 0xc5, 0x5e);
const ROUTE_END_COLOR: egui::Color32 = egui::Color32::from_rgb(0xef, 0x44, 0x44);
const PLACE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x0e, 0xa5, 0xe9);
const POI_FILL_COLOR: egui::Color32 = egui::Color32::from_rgb(0x38, 0xbd, 0xf8);
const POI_STROKE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x0e, 0xa5, 0xe9);
const INCIDENT_MINOR_COLOR: egui::Color32 = egui::Color32::from_rgb(0xfa, 0xcc, 0x15);
const INCIDENT_MODERATE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xfb, 0x92, 0x3c);
const INCIDENT_MAJOR_COLOR: egui::Color32 = egui::Color32::from_rgb(0xef, 0x44, 0x44);

/// Scroll-Pixel pro Zoom-Schritt.
const SCROLL_PIXELS_PER_STEP: f32 = 40.0;

/// Rendert die Kartenansicht und gibt erzeugte Events zurueck.
pub fn render_map_view(
    ctx: &egui::Context,
    state: &AppState,
    layers: &mut MapLayers,
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

            let size = [rect.width(), rect.height()];
            if (state.view.viewport.size.x - size[0]).abs() > 0.5
                || (state.view.viewport.size.y - size[1]).abs() > 0.5
            {
                events.push(AppIntent::ViewportResized { size });
            }

            collect_input(ui, &rect, &response, state, &mut events);

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0x10, 0x18, 0x24));

            draw_tile_layer(&painter, rect, &state.view.viewport, &mut layers.base);
            if state.view.traffic_enabled {
                if let Some(traffic) = layers.traffic.as_mut() {
                    draw_tile_layer(&painter, rect, &state.view.viewport, traffic);
                }
            }
            if state.view.weather_overlay_enabled {
                if let Some(radar) = layers.radar.as_mut() {
                    draw_tile_layer(&painter, rect, &state.view.viewport, radar);
                }
            }

            draw_scene(&painter, rect, state);

            if state.view.weather_overlay_enabled {
                draw_weather_overlay_label(&painter, rect, state);
            }

            if state.route.is_enabled() && response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        });

    events
}

/// Sammelt Pan/Zoom/Klick-Intents aus der Viewport-Response.
fn collect_input(
    ui: &egui::Ui,
    rect: &egui::Rect,
    response: &egui::Response,
    state: &AppState,
    events: &mut Vec<AppIntent>,
) {
    if response.dragged() {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            // Karte folgt dem Cursor: Inhalt nach rechts heisst Zentrum
            // nach links.
            events.push(AppIntent::CameraPan {
                delta_px: glam::Vec2::new(-delta.x, -delta.y),
            });
        }
    }
    if response.drag_stopped() {
        events.push(AppIntent::MapViewSettled);
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll.abs() > 0.0 {
            let focus = response
                .hover_pos()
                .map(|pos| glam::Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y));
            events.push(AppIntent::CameraZoom {
                delta_levels: (scroll / SCROLL_PIXELS_PER_STEP) as f64
                    * MapViewport::SCROLL_ZOOM_STEP,
                focus_px: focus,
            });
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let screen = glam::Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);
            events.push(AppIntent::MapClicked {
                position: state.view.viewport.screen_to_geo(screen),
            });
        }
    }
}

/// Zeichnet einen Kachel-Layer in den Viewport.
///
/// Gerendert wird auf der gerundeten Zoomstufe; der Rest der
/// kontinuierlichen Stufe wird ueber die Kachelgroesse skaliert.
fn draw_tile_layer(
    painter: &egui::Painter,
    rect: egui::Rect,
    viewport: &MapViewport,
    layer: &mut TileLayer,
) {
    layer.poll();

    let tile_zoom = viewport.zoom.round().clamp(0.0, MapViewport::ZOOM_MAX) as u8;
    let scale = f64::powf(2.0, viewport.zoom - tile_zoom as f64);
    let screen_tile_size = (TILE_SIZE * scale) as f32;

    let tiles_per_axis = 1u32 << tile_zoom;
    let center_px = MapViewport::project(viewport.center, tile_zoom as f64);
    // Linke obere Ecke des Viewports in Kachel-Pixeln
    let top_left_x = center_px.x - (rect.width() / 2.0) as f64 / scale;
    let top_left_y = center_px.y - (rect.height() / 2.0) as f64 / scale;

    let first_x = (top_left_x / TILE_SIZE).floor() as i64;
    let first_y = (top_left_y / TILE_SIZE).floor() as i64;
    let count_x = (rect.width() / screen_tile_size).ceil() as i64 + 1;
    let count_y = (rect.height() / screen_tile_size).ceil() as i64 + 1;

    let tint = egui::Color32::WHITE.gamma_multiply(layer.opacity);
    for ty in first_y..first_y + count_y {
        if ty < 0 || ty >= tiles_per_axis as i64 {
            continue;
        }
        for tx in first_x..first_x + count_x {
            // Datumsgrenze: X-Index wickelt um
            let wrapped_x = tx.rem_euclid(tiles_per_axis as i64) as u32;
            let coord = TileCoord {
                z: tile_zoom,
                x: wrapped_x,
                y: ty as u32,
            };
            let Some(texture) = layer.texture_for(coord) else {
                continue;
            };
            let min_x = rect.min.x + ((tx as f64 * TILE_SIZE - top_left_x) * scale) as f32;
            let min_y = rect.min.y + ((ty as f64 * TILE_SIZE - top_left_y) * scale) as f32;
            let tile_rect = egui::Rect::from_min_size(
                egui::pos2(min_x, min_y),
                egui::vec2(screen_tile_size, screen_tile_size),
            );
            if !rect.intersects(tile_rect) {
                continue;
            }
            painter.image(
                texture,
                tile_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                tint,
            );
        }
    }
}

/// Zeichnet Linien und Marker der Szene.
fn draw_scene(painter: &egui::Painter, rect: egui::Rect, state: &AppState) {
    let viewport = &state.view.viewport;

    for line in state.view.scene.lines() {
        let points: Vec<egui::Pos2> = line
            .points
            .iter()
            .map(|p| {
                let s = viewport.geo_to_screen(*p);
                egui::pos2(rect.min.x + s.x, rect.min.y + s.y)
            })
            .collect();
        if points.len() >= 2 {
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(5.0, ROUTE_LINE_COLOR.gamma_multiply(0.8)),
            ));
        }
    }

    for marker in state.view.scene.markers() {
        let s = viewport.geo_to_screen(marker.position);
        let pos = egui::pos2(rect.min.x + s.x, rect.min.y + s.y);
        if !rect.expand(16.0).contains(pos) {
            continue;
        }
        match marker.style {
            MarkerStyle::Place => {
                painter.circle(pos, 7.0, PLACE_COLOR, egui::Stroke::new(2.0, egui::Color32::WHITE));
            }
            MarkerStyle::RouteStart => {
                draw_pin(painter, pos, ROUTE_START_COLOR, &marker.label);
            }
            MarkerStyle::RouteEnd => {
                draw_pin(painter, pos, ROUTE_END_COLOR, &marker.label);
            }
            MarkerStyle::Poi => {
                painter.circle(pos, 6.0, POI_FILL_COLOR, egui::Stroke::new(2.0, POI_STROKE_COLOR));
            }
            MarkerStyle::Incident { severity } => {
                let fill = match severity {
                    s if s >= 3 => INCIDENT_MAJOR_COLOR,
                    2 => INCIDENT_MODERATE_COLOR,
                    _ => INCIDENT_MINOR_COLOR,
                };
                painter.circle(pos, 8.0, fill, egui::Stroke::new(2.0, egui::Color32::WHITE));
            }
        }
    }
}

/// Routen-Pin: Kreis mit Label darunter.
fn draw_pin(painter: &egui::Painter, pos: egui::Pos2, color: egui::Color32, label: &str) {
    painter.circle(pos, 8.0, color, egui::Stroke::new(2.0, egui::Color32::WHITE));
    painter.text(
        pos + egui::vec2(0.0, 14.0),
        egui::Align2::CENTER_TOP,
        label,
        egui::FontId::proportional(12.0),
        egui::Color32::WHITE,
    );
}

/// Halbtransparentes Wetter-Label oben links (Beschreibung + Temperatur).
fn draw_weather_overlay_label(painter: &egui::Painter, rect: egui::Rect, state: &AppState) {
    let FetchState::Ready(weather) = &state.panels.weather else {
        return;
    };
    let kind = overlay_kind_for_code(weather.code);
    let text = format!(
        "{} \u{2022} {:.0}\u{00b0}C \u{2022} {}",
        weather.description,
        weather.temp_c.round(),
        kind.label()
    );
    let galley = painter.layout_no_wrap(
        text,
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
    );
    let margin = egui::vec2(8.0, 6.0);
    let label_rect = egui::Rect::from_min_size(
        rect.min + egui::vec2(12.0, 12.0),
        galley.size() + margin * 2.0,
    );
    painter.rect_filled(
        label_rect,
        6.0,
        egui::Color32::from_black_alpha(140),
    );
    painter.galley(label_rect.min + margin, galley, egui::Color32::WHITE);
}
