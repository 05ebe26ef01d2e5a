//! Aktuelles Wetter (Weatherbit) und Niederschlagsradar (RainViewer).

use super::{read_text, ProviderError};
use crate::core::GeoPosition;
use serde::Deserialize;

const CURRENT_URL: &str = "https://api.weatherbit.io/v2.0/current";
const RADAR_META_URL: &str = "https://api.rainviewer.com/public/weather-maps.json";

/// Aktuelle Wetterlage, auf die Anzeige-Felder reduziert.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    /// Weatherbit-Wettercode (fuer die Overlay-Klassifikation)
    pub code: u16,
    pub wind_mps: f64,
    pub humidity: f64,
}

/// Grobklasse fuer das Wetter-Overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherOverlayKind {
    Clear,
    Clouds,
    Rain,
    Snow,
    Storm,
    Fog,
}

impl WeatherOverlayKind {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherOverlayKind::Clear => "Clear",
            WeatherOverlayKind::Clouds => "Clouds",
            WeatherOverlayKind::Rain => "Rain",
            WeatherOverlayKind::Snow => "Snow",
            WeatherOverlayKind::Storm => "Storm",
            WeatherOverlayKind::Fog => "Fog",
        }
    }
}

/// Ordnet einen Weatherbit-Code der Overlay-Klasse zu.
pub fn overlay_kind_for_code(code: u16) -> WeatherOverlayKind {
    match code {
        200..=299 => WeatherOverlayKind::Storm,
        300..=599 => WeatherOverlayKind::Rain,
        600..=699 => WeatherOverlayKind::Snow,
        700..=799 => WeatherOverlayKind::Fog,
        800 => WeatherOverlayKind::Clear,
        801.. => WeatherOverlayKind::Clouds,
        _ => WeatherOverlayKind::Clear,
    }
}

/// Liefert die aktuelle Wetterlage fuer eine Position.
pub trait WeatherProvider {
    fn current(&self, position: GeoPosition) -> Result<CurrentWeather, ProviderError>;
}

/// Weatherbit-Implementierung (`/v2.0/current`).
pub struct WeatherbitProvider {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl WeatherbitProvider {
    pub fn new(client: reqwest::blocking::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

impl WeatherProvider for WeatherbitProvider {
    fn current(&self, position: GeoPosition) -> Result<CurrentWeather, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingKey);
        }
        let response = self
            .client
            .get(CURRENT_URL)
            .query(&[
                ("lat", position.lat.to_string()),
                ("lon", position.lng.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()?;
        parse_current_response(&read_text(response)?)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    data: Vec<ObservationDto>,
}

#[derive(Debug, Deserialize)]
struct ObservationDto {
    temp: f64,
    app_temp: f64,
    wind_spd: f64,
    rh: f64,
    weather: Option<ConditionDto>,
}

#[derive(Debug, Deserialize)]
struct ConditionDto {
    #[serde(default)]
    description: String,
    #[serde(default)]
    code: u16,
}

fn parse_current_response(body: &str) -> Result<CurrentWeather, ProviderError> {
    let parsed: CurrentResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let obs = parsed.data.into_iter().next().ok_or(ProviderError::NoResult)?;
    let (description, code) = match obs.weather {
        Some(cond) if !cond.description.is_empty() => (cond.description, cond.code),
        Some(cond) => ("Unknown".to_string(), cond.code),
        None => ("Unknown".to_string(), 800),
    };
    Ok(CurrentWeather {
        temp_c: obs.temp,
        feels_like_c: obs.app_temp,
        description,
        code,
        wind_mps: obs.wind_spd,
        humidity: obs.rh,
    })
}

/// Liefert den Kachel-Pfad des aktuellsten Radar-Frames.
pub trait RadarProvider {
    fn latest_frame_path(&self) -> Result<String, ProviderError>;
}

/// RainViewer-Implementierung (keyfrei); bevorzugt den Nowcast-Frame,
/// sonst den juengsten Vergangenheits-Frame.
pub struct RainViewerRadar {
    client: reqwest::blocking::Client,
}

impl RainViewerRadar {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    /// URL-Template fuer die Radar-Kacheln eines Frames.
    pub fn tile_url_template(frame_path: &str) -> String {
        format!("https://tilecache.rainviewer.com{frame_path}/256/{{z}}/{{x}}/{{y}}/2/1_1.png")
    }
}

impl RadarProvider for RainViewerRadar {
    fn latest_frame_path(&self) -> Result<String, ProviderError> {
        let response = self.client.get(RADAR_META_URL).send()?;
        parse_radar_meta(&read_text(response)?)
    }
}

#[derive(Debug, Deserialize)]
struct RadarMeta {
    radar: Option<RadarFrames>,
}

#[derive(Debug, Deserialize)]
struct RadarFrames {
    #[serde(default)]
    past: Vec<RadarFrame>,
    #[serde(default)]
    nowcast: Vec<RadarFrame>,
}

#[derive(Debug, Deserialize)]
struct RadarFrame {
    path: String,
}

fn parse_radar_meta(body: &str) -> Result<String, ProviderError> {
    let parsed: RadarMeta =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let frames = parsed.radar.ok_or(ProviderError::NoResult)?;
    let chosen = frames
        .nowcast
        .into_iter()
        .next()
        .or_else(|| frames.past.into_iter().last())
        .ok_or(ProviderError::NoResult)?;
    Ok(chosen.path)
}
