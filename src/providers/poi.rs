//! POI-Suche ueber die TomTom Search API.

use super::{read_text, ProviderError};
use crate::core::GeoPosition;
use serde::Deserialize;

/// Suchradius um die aktuelle Position in Metern.
const SEARCH_RADIUS_M: u32 = 5000;
/// Maximale Trefferanzahl pro Suche.
const SEARCH_LIMIT: u32 = 20;

/// Ein Treffer der Kategoriesuche, auf die Anzeige-Felder reduziert.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub name: String,
    pub address: String,
    pub position: GeoPosition,
}

/// Kategoriesuche rund um eine Position.
pub trait PoiProvider {
    fn search(&self, category: &str, around: GeoPosition) -> Result<Vec<Poi>, ProviderError>;
}

/// TomTom-Implementierung (`/search/2/search/<kategorie>.json`).
pub struct TomTomPoiProvider {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl TomTomPoiProvider {
    pub fn new(client: reqwest::blocking::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

impl PoiProvider for TomTomPoiProvider {
    fn search(&self, category: &str, around: GeoPosition) -> Result<Vec<Poi>, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingKey);
        }
        let url = format!(
            "https://api.tomtom.com/search/2/search/{}.json",
            urlencode(category)
        );
        let response = self
            .client
            .get(url)
            .query(&[
                ("key", self.api_key.clone()),
                ("limit", SEARCH_LIMIT.to_string()),
                ("lat", around.lat.to_string()),
                ("lon", around.lng.to_string()),
                ("radius", SEARCH_RADIUS_M.to_string()),
            ])
            .send()?;
        parse_search_response(&read_text(response)?, category)
    }
}

/// Minimales Percent-Encoding fuer das Kategorie-Pfadsegment.
fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ResultDto>,
}

#[derive(Debug, Deserialize)]
struct ResultDto {
    position: PositionDto,
    poi: Option<PoiDto>,
    address: Option<AddressDto>,
}

#[derive(Debug, Deserialize)]
struct PositionDto {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct PoiDto {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressDto {
    #[serde(default)]
    freeform_address: String,
}

fn parse_search_response(body: &str, category: &str) -> Result<Vec<Poi>, ProviderError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let pois = parsed
        .results
        .into_iter()
        .map(|r| {
            let address = r
                .address
                .map(|a| a.freeform_address)
                .unwrap_or_default();
            let name = match r.poi {
                Some(p) if !p.name.is_empty() => p.name,
                _ if !address.is_empty() => address.clone(),
                _ => category.to_string(),
            };
            Poi {
                name,
                address,
                position: GeoPosition::new(r.position.lat, r.position.lon),
            }
        })
        .collect();
    Ok(pois)
}
