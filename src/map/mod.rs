//! Kartenebene: Marker/Linien-Szene und Kachel-Layer.

pub mod scene;
pub mod tiles;

pub use scene::{LineHandle, MapScene, Marker, MarkerHandle, MarkerStyle, Polyline};
pub use tiles::{TileCoord, TileLayer};

use crate::providers::TomTomTrafficProvider;
use crate::shared::{AppOptions, OSM_TILE_TEMPLATE};

/// Die drei Kachel-Layer der Kartenansicht.
///
/// Basiskarte und Traffic-Flow stehen fest; der Radar-Layer wird beim
/// Frame-Wechsel neu aufgebaut (`sync_radar`).
pub struct MapLayers {
    pub base: TileLayer,
    /// Traffic-Flow-Overlay; nur mit konfiguriertem TomTom-Key vorhanden
    pub traffic: Option<TileLayer>,
    /// Radar-Overlay des aktuellen RainViewer-Frames
    pub radar: Option<TileLayer>,
    client: reqwest::blocking::Client,
    ctx: egui::Context,
}

impl MapLayers {
    pub fn new(
        options: &AppOptions,
        client: reqwest::blocking::Client,
        ctx: egui::Context,
    ) -> Self {
        let base = TileLayer::new(
            OSM_TILE_TEMPLATE.to_string(),
            1.0,
            client.clone(),
            ctx.clone(),
        );
        let traffic = (!options.tomtom_api_key.is_empty()).then(|| {
            TileLayer::new(
                TomTomTrafficProvider::flow_tile_url_template(&options.tomtom_api_key),
                options.traffic_overlay_opacity,
                client.clone(),
                ctx.clone(),
            )
        });
        Self {
            base,
            traffic,
            radar: None,
            client,
            ctx,
        }
    }

    /// Baut den Radar-Layer neu auf, wenn sich das Frame-Template
    /// geaendert hat (oder entfernt ihn).
    pub fn sync_radar(&mut self, template: Option<&str>, opacity: f32) {
        match template {
            Some(template) => {
                let unchanged = self
                    .radar
                    .as_ref()
                    .is_some_and(|layer| layer.url_template() == template);
                if !unchanged {
                    self.radar = Some(TileLayer::new(
                        template.to_string(),
                        opacity,
                        self.client.clone(),
                        self.ctx.clone(),
                    ));
                }
            }
            None => self.radar = None,
        }
    }

    /// Gibt `true` zurueck, solange irgendein Layer Kacheln laedt.
    pub fn has_pending(&self) -> bool {
        self.base.has_pending()
            || self.traffic.as_ref().is_some_and(TileLayer::has_pending)
            || self.radar.as_ref().is_some_and(TileLayer::has_pending)
    }
}
