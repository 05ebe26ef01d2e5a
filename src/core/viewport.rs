//! Karten-Viewport: Web-Mercator-Projektion, Pan und Zoom.

use super::geo::{GeoBounds, GeoPosition};
use glam::DVec2;

/// Kantenlaenge einer Kachel in Pixeln.
pub const TILE_SIZE: f64 = 256.0;

/// Viewport ueber der Weltkarte: Zentrum, Zoomstufe, Pixelgroesse.
#[derive(Debug, Clone)]
pub struct MapViewport {
    /// Geographisches Zentrum der Ansicht
    pub center: GeoPosition,
    /// Kontinuierliche Slippy-Map-Zoomstufe
    pub zoom: f64,
    /// Viewport-Groesse in Pixeln
    pub size: glam::Vec2,
}

impl MapViewport {
    /// Minimale Zoomstufe.
    pub const ZOOM_MIN: f64 = 2.0;
    /// Maximale Zoomstufe (OSM-Raster endet bei 19).
    pub const ZOOM_MAX: f64 = 19.0;
    /// Zoom-Schritt fuer Buttons/Shortcuts.
    pub const ZOOM_STEP: f64 = 1.0;
    /// Zoom-Schritt pro Mausrad-Einheit.
    pub const SCROLL_ZOOM_STEP: f64 = 0.25;

    /// Erstellt einen Viewport mit Standard-Zoom 13 (Stadtmassstab).
    pub fn new(center: GeoPosition) -> Self {
        Self {
            center,
            zoom: 13.0,
            size: glam::Vec2::ZERO,
        }
    }

    /// Projiziert eine Geo-Position auf globale Pixelkoordinaten.
    pub fn project(pos: GeoPosition, zoom: f64) -> DVec2 {
        let world = TILE_SIZE * f64::powf(2.0, zoom);
        let x = (pos.lng + 180.0) / 360.0 * world;
        let lat_rad = pos.lat.to_radians();
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
            * world;
        DVec2::new(x, y)
    }

    /// Rechnet globale Pixelkoordinaten zurueck in eine Geo-Position.
    pub fn unproject(pixel: DVec2, zoom: f64) -> GeoPosition {
        let world = TILE_SIZE * f64::powf(2.0, zoom);
        let lng = pixel.x / world * 360.0 - 180.0;
        let n = std::f64::consts::PI * (1.0 - 2.0 * pixel.y / world);
        let lat = n.sinh().atan().to_degrees();
        GeoPosition::new(lat, lng)
    }

    /// Rechnet eine Screen-Position (relativ zum Viewport-Ursprung) in eine
    /// Geo-Position um.
    pub fn screen_to_geo(&self, screen: glam::Vec2) -> GeoPosition {
        let center_px = Self::project(self.center, self.zoom);
        let offset = DVec2::new(
            (screen.x - self.size.x / 2.0) as f64,
            (screen.y - self.size.y / 2.0) as f64,
        );
        Self::unproject(center_px + offset, self.zoom)
    }

    /// Rechnet eine Geo-Position in Screen-Koordinaten um.
    pub fn geo_to_screen(&self, pos: GeoPosition) -> glam::Vec2 {
        let center_px = Self::project(self.center, self.zoom);
        let pos_px = Self::project(pos, self.zoom);
        let offset = pos_px - center_px;
        glam::Vec2::new(
            offset.x as f32 + self.size.x / 2.0,
            offset.y as f32 + self.size.y / 2.0,
        )
    }

    /// Verschiebt das Zentrum um ein Pixel-Delta.
    pub fn pan_by_pixels(&mut self, delta: glam::Vec2) {
        let center_px = Self::project(self.center, self.zoom);
        let moved = center_px + DVec2::new(delta.x as f64, delta.y as f64);
        self.center = Self::unproject(moved, self.zoom);
    }

    /// Aendert den Zoom um `delta_levels`. Mit `focus` bleibt die
    /// Geo-Position unter dem Cursor stehen.
    pub fn zoom_by(&mut self, delta_levels: f64, focus: Option<glam::Vec2>) {
        let anchor = focus.map(|screen| (screen, self.screen_to_geo(screen)));
        self.zoom = (self.zoom + delta_levels).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
        if let Some((screen, geo)) = anchor {
            // Zentrum so verschieben, dass der Ankerpunkt wieder unter dem
            // Cursor liegt.
            let anchor_px = Self::project(geo, self.zoom);
            let center_px = anchor_px
                - DVec2::new(
                    (screen.x - self.size.x / 2.0) as f64,
                    (screen.y - self.size.y / 2.0) as f64,
                );
            self.center = Self::unproject(center_px, self.zoom);
        }
    }

    /// Setzt eine absolute Zoomstufe (geclamped).
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Zentriert die Ansicht so, dass die Bounds mit Rand sichtbar sind.
    pub fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: f32) {
        self.center = bounds.center();
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return;
        }
        let usable = glam::Vec2::new(
            (self.size.x - 2.0 * padding_px).max(64.0),
            (self.size.y - 2.0 * padding_px).max(64.0),
        );
        // Ausdehnung bei Zoom 0 bestimmen, dann die groesste Stufe waehlen,
        // bei der beide Achsen hineinpassen.
        let sw = Self::project(bounds.south_west, 0.0);
        let ne = Self::project(bounds.north_east, 0.0);
        let extent = DVec2::new((ne.x - sw.x).abs().max(1e-9), (ne.y - sw.y).abs().max(1e-9));
        let zoom_x = (usable.x as f64 / extent.x).log2();
        let zoom_y = (usable.y as f64 / extent.y).log2();
        self.set_zoom(zoom_x.min(zoom_y));
    }

    /// Sichtbare Bounds der aktuellen Ansicht.
    pub fn visible_bounds(&self) -> GeoBounds {
        let top_left = self.screen_to_geo(glam::Vec2::ZERO);
        let bottom_right = self.screen_to_geo(self.size);
        GeoBounds::new(top_left, bottom_right)
    }
}
