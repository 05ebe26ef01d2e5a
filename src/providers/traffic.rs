//! Verkehrsdaten ueber die TomTom Traffic API: Flow-Kacheln und Incidents.

use super::{read_text, ProviderError};
use crate::core::{GeoBounds, GeoPosition};
use serde::Deserialize;

const INCIDENTS_URL: &str = "https://api.tomtom.com/traffic/services/5/incidentDetails";
/// Feld-Selektion der Incident-Abfrage (v5-Syntax).
const INCIDENT_FIELDS: &str = "{incidents{type,geometry{type,coordinates},properties{iconCategory,magnitudeOfDelay,events{description,code},startTime,endTime}}}";

/// Verkehrsstoerung, auf die Anzeige-Felder reduziert.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficIncident {
    /// Punkt-Geometrie, falls vorhanden (Linien-Geometrien bleiben ohne Marker)
    pub position: Option<GeoPosition>,
    pub icon_category: u8,
    /// Verzoegerungs-Magnitude 0..=4
    pub delay_magnitude: u8,
    pub description: String,
}

/// Typ-Label zur Icon-Kategorie der Incident-API.
pub fn incident_type_label(category: u8) -> &'static str {
    match category {
        0 => "Unknown",
        1 => "Accident",
        2 => "Fog",
        3 => "Dangerous Conditions",
        4 => "Rain",
        5 => "Ice",
        6 => "Jam",
        7 => "Lane Closed",
        8 => "Road Closed",
        9 => "Road Works",
        10 => "Wind",
        11 => "Flooding",
        14 => "Broken Down Vehicle",
        _ => "Incident",
    }
}

/// Text zur Verzoegerungs-Magnitude.
pub fn delay_label(magnitude: u8) -> &'static str {
    match magnitude {
        0 => "None",
        1 => "Minor",
        2 => "Moderate",
        3 => "Major",
        4 => "Severe",
        _ => "Unknown",
    }
}

/// Laedt Verkehrsstoerungen fuer einen Kartenausschnitt.
pub trait TrafficProvider {
    fn incidents(&self, bbox: GeoBounds) -> Result<Vec<TrafficIncident>, ProviderError>;
}

/// TomTom-Implementierung: Incident-Details plus Flow-Kachel-Template.
pub struct TomTomTrafficProvider {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl TomTomTrafficProvider {
    pub fn new(client: reqwest::blocking::Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// URL-Template der Traffic-Flow-Rasterkacheln.
    pub fn flow_tile_url_template(api_key: &str) -> String {
        format!(
            "https://api.tomtom.com/traffic/map/4/tile/flow/relative0/{{z}}/{{x}}/{{y}}.png?key={api_key}"
        )
    }
}

impl TrafficProvider for TomTomTrafficProvider {
    fn incidents(&self, bbox: GeoBounds) -> Result<Vec<TrafficIncident>, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingKey);
        }
        let response = self
            .client
            .get(INCIDENTS_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("bbox", &bbox.as_bbox_query()),
                ("fields", INCIDENT_FIELDS),
                ("language", "en-US"),
            ])
            .send()?;
        parse_incidents_response(&read_text(response)?)
    }
}

#[derive(Debug, Deserialize)]
struct IncidentsResponse {
    #[serde(default)]
    incidents: Vec<IncidentDto>,
}

#[derive(Debug, Deserialize)]
struct IncidentDto {
    geometry: Option<GeometryDto>,
    properties: Option<PropertiesDto>,
}

#[derive(Debug, Deserialize)]
struct GeometryDto {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertiesDto {
    #[serde(default)]
    icon_category: u8,
    #[serde(default)]
    magnitude_of_delay: u8,
    #[serde(default)]
    events: Vec<EventDto>,
}

#[derive(Debug, Deserialize)]
struct EventDto {
    #[serde(default)]
    description: String,
}

fn parse_incidents_response(body: &str) -> Result<Vec<TrafficIncident>, ProviderError> {
    let parsed: IncidentsResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let incidents = parsed
        .incidents
        .into_iter()
        .map(|inc| {
            let position = inc.geometry.as_ref().and_then(point_position);
            let props = inc.properties.unwrap_or(PropertiesDto {
                icon_category: 0,
                magnitude_of_delay: 0,
                events: Vec::new(),
            });
            let description = props
                .events
                .into_iter()
                .next()
                .map(|e| e.description)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "Traffic incident".to_string());
            TrafficIncident {
                position,
                icon_category: props.icon_category,
                delay_magnitude: props.magnitude_of_delay,
                description,
            }
        })
        .collect();
    Ok(incidents)
}

/// Koordinaten einer Punkt-Geometrie; die API liefert `[lng, lat]`.
fn point_position(geometry: &GeometryDto) -> Option<GeoPosition> {
    if geometry.kind != "Point" {
        return None;
    }
    let coords = geometry.coordinates.as_array()?;
    let lng = coords.first()?.as_f64()?;
    let lat = coords.get(1)?.as_f64()?;
    Some(GeoPosition::new(lat, lng))
}
