//! Geocoding ueber Nominatim (OpenStreetMap).

use super::{read_text, ProviderError};
use crate::core::GeoPosition;
use serde::Deserialize;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Loest Freitext-Anfragen in eine Geo-Position auf.
pub trait Geocoder {
    fn resolve(&self, query: &str) -> Result<GeoPosition, ProviderError>;
}

/// Nominatim-Implementierung (keyfrei, Usage-Policy beachten).
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Geocoder for NominatimGeocoder {
    fn resolve(&self, query: &str) -> Result<GeoPosition, ProviderError> {
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .header(reqwest::header::ACCEPT_LANGUAGE, "en")
            .send()?;
        parse_search_response(&read_text(response)?)
    }
}

/// Nominatim liefert lat/lon als Strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

fn parse_search_response(body: &str) -> Result<GeoPosition, ProviderError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let first = hits.into_iter().next().ok_or(ProviderError::NoResult)?;
    let lat = first
        .lat
        .parse::<f64>()
        .map_err(|e| ProviderError::Decode(format!("lat: {e}")))?;
    let lng = first
        .lon
        .parse::<f64>()
        .map_err(|e| ProviderError::Decode(format!("lon: {e}")))?;
    Ok(GeoPosition::new(lat, lng))
}
