//! Zentrale Konfiguration fuer StadtKompass.
//!
//! `AppOptions` enthaelt API-Keys, Startposition und UI-Voreinstellungen.
//! Wird als `stadt_kompass.toml` neben der Binary gespeichert; eine
//! fehlende oder fehlerhafte Datei faellt auf Standardwerte zurueck.

use crate::core::GeoPosition;
use serde::{Deserialize, Serialize};

/// Fallback-Startposition: San Francisco.
pub const DEFAULT_START_LAT: f64 = 37.7749;
pub const DEFAULT_START_LNG: f64 = -122.4194;
/// Standard-Zoomstufe beim Start und nach einer Suche.
pub const DEFAULT_ZOOM: f64 = 13.0;
/// Standard-POI-Kategorie.
pub const DEFAULT_POI_CATEGORY: &str = "restaurant";
/// URL-Template der Basiskarte (OSM-Raster).
pub const OSM_TILE_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Alle zur Laufzeit aenderbaren Optionen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppOptions {
    // ── API-Keys ────────────────────────────────────────────────
    /// Weatherbit — Wetter-Panel und Overlay-Label
    #[serde(default)]
    pub weatherbit_api_key: String,
    /// TomTom — POI-Suche, Routing, Traffic-Flow und Incidents
    #[serde(default)]
    pub tomtom_api_key: String,
    /// TransLink RTTI — Abfahrten fuer Vancouver (optional)
    #[serde(default)]
    pub translink_api_key: String,

    // ── Start ───────────────────────────────────────────────────
    /// Breitengrad der Startansicht
    pub start_lat: f64,
    /// Laengengrad der Startansicht
    pub start_lng: f64,
    /// Zoomstufe der Startansicht
    pub start_zoom: f64,

    // ── UI-Voreinstellungen ─────────────────────────────────────
    /// Vorausgewaehlte POI-Kategorie
    #[serde(default = "default_poi_category")]
    pub poi_category: String,
    /// Deckkraft des Traffic-Flow-Overlays
    #[serde(default = "default_traffic_opacity")]
    pub traffic_overlay_opacity: f32,
    /// Deckkraft des Radar-Overlays
    #[serde(default = "default_radar_opacity")]
    pub radar_overlay_opacity: f32,
}

fn default_poi_category() -> String {
    DEFAULT_POI_CATEGORY.to_string()
}

fn default_traffic_opacity() -> f32 {
    0.7
}

fn default_radar_opacity() -> f32 {
    0.55
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            weatherbit_api_key: String::new(),
            tomtom_api_key: String::new(),
            translink_api_key: String::new(),
            start_lat: DEFAULT_START_LAT,
            start_lng: DEFAULT_START_LNG,
            start_zoom: DEFAULT_ZOOM,
            poi_category: default_poi_category(),
            traffic_overlay_opacity: default_traffic_opacity(),
            radar_overlay_opacity: default_radar_opacity(),
        }
    }
}

impl AppOptions {
    /// Startposition als Geo-Position.
    pub fn start_position(&self) -> GeoPosition {
        GeoPosition::new(self.start_lat, self.start_lng)
    }

    /// Gibt `true` zurueck, wenn mindestens ein Pflicht-Key fehlt.
    pub fn missing_required_keys(&self) -> bool {
        self.weatherbit_api_key.is_empty() || self.tomtom_api_key.is_empty()
    }

    /// Laedt Optionen aus einer TOML-Datei; faellt bei Fehlern auf
    /// Standardwerte zurueck.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("stadt_kompass"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("stadt_kompass.toml")
    }
}
