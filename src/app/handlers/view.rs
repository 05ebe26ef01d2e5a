//! Handler fuer Kamera- und Viewport-Operationen.

use crate::app::AppState;
use crate::core::GeoPosition;

/// Setzt die Viewport-Groesse in Pixeln.
pub fn set_viewport_size(state: &mut AppState, size: [f32; 2]) {
    state.view.viewport.size = glam::Vec2::new(size[0], size[1]);
}

/// Verschiebt die Karte um ein Pixel-Delta.
pub fn pan(state: &mut AppState, delta_px: glam::Vec2) {
    state.view.viewport.pan_by_pixels(delta_px);
}

/// Zoomt um Stufen, optional auf einen Fokuspunkt.
pub fn zoom(state: &mut AppState, delta_levels: f64, focus_px: Option<glam::Vec2>) {
    state.view.viewport.zoom_by(delta_levels, focus_px);
}

/// Zentriert die Ansicht auf eine Position.
pub fn center_on(state: &mut AppState, position: GeoPosition, zoom: Option<f64>) {
    state.view.viewport.center = position;
    if let Some(zoom) = zoom {
        state.view.viewport.set_zoom(zoom);
    }
}

/// Setzt die aktuelle Position auf das Kartenzentrum (nach Pan/Zoom bei
/// aktivem Traffic-Overlay).
pub fn sync_view_center(state: &mut AppState) {
    state.view.current_position = state.view.viewport.center;
}
