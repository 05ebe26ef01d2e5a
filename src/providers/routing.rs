//! Routenberechnung ueber die TomTom Routing API.

use super::{read_text, ProviderError};
use crate::core::{ComputedRoute, GeoPosition, RouteRequest, TurnInstruction};
use serde::Deserialize;

/// Berechnet eine Route fuer einen Anfrage-Snapshot.
pub trait RoutingProvider {
    fn route(&self, request: &RouteRequest) -> Result<ComputedRoute, ProviderError>;
}

/// TomTom `calculateRoute` mit Verkehrslage und Text-Anweisungen.
pub struct TomTomRoutingProvider {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl TomTomRoutingProvider {
    pub fn new(client: reqwest::blocking::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

impl RoutingProvider for TomTomRoutingProvider {
    fn route(&self, request: &RouteRequest) -> Result<ComputedRoute, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingKey);
        }
        let url = format!(
            "https://api.tomtom.com/routing/1/calculateRoute/{},{}:{},{}/json",
            request.start.lat, request.start.lng, request.end.lat, request.end.lng
        );
        let response = self
            .client
            .get(url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("travelMode", request.mode.as_query_value()),
                ("traffic", "true"),
                ("instructionsType", "text"),
                ("language", "en-US"),
            ])
            .send()?;
        parse_route_response(&read_text(response)?)
    }
}

#[derive(Debug, Deserialize)]
struct RoutingResponse {
    #[serde(default)]
    routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    summary: SummaryDto,
    #[serde(default)]
    legs: Vec<LegDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDto {
    length_in_meters: f64,
    travel_time_in_seconds: f64,
}

#[derive(Debug, Deserialize)]
struct LegDto {
    #[serde(default)]
    points: Vec<PointDto>,
    #[serde(default)]
    instructions: Vec<InstructionDto>,
}

#[derive(Debug, Deserialize)]
struct PointDto {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstructionDto {
    #[serde(default)]
    message: String,
    #[serde(default)]
    maneuver: String,
    #[serde(default)]
    route_offset_in_meters: f64,
}

/// Formt `routes[0]` in eine `ComputedRoute` um; Leg-Punkte werden in
/// Fahrreihenfolge konkateniert.
fn parse_route_response(body: &str) -> Result<ComputedRoute, ProviderError> {
    let parsed: RoutingResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    let route = parsed.routes.into_iter().next().ok_or(ProviderError::NoResult)?;

    let mut geometry = Vec::new();
    let mut steps = Vec::new();
    for leg in route.legs {
        geometry.extend(
            leg.points
                .iter()
                .map(|pt| GeoPosition::new(pt.latitude, pt.longitude)),
        );
        steps.extend(leg.instructions.into_iter().map(|inst| TurnInstruction {
            message: inst.message,
            maneuver: inst.maneuver,
            route_offset_meters: inst.route_offset_in_meters,
        }));
    }

    Ok(ComputedRoute {
        distance_meters: route.summary.length_in_meters,
        duration_seconds: route.summary.travel_time_in_seconds,
        geometry,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "routes": [{
            "summary": {"lengthInMeters": 5000.0, "travelTimeInSeconds": 600.0},
            "legs": [{
                "points": [
                    {"latitude": 49.28, "longitude": -123.12},
                    {"latitude": 49.29, "longitude": -123.08},
                    {"latitude": 49.30, "longitude": -123.05}
                ],
                "instructions": [
                    {"routeOffsetInMeters": 0.0, "message": "Head east", "maneuver": "DEPART"},
                    {"routeOffsetInMeters": 4900.0, "message": "You have arrived", "maneuver": "ARRIVE"}
                ]
            }]
        }]
    }"#;

    #[test]
    fn reshapes_first_route() {
        let route = parse_route_response(SAMPLE).expect("Route erwartet");
        assert_eq!(route.distance_meters, 5000.0);
        assert_eq!(route.duration_seconds, 600.0);
        assert_eq!(route.geometry.len(), 3);
        assert_eq!(route.geometry[0], GeoPosition::new(49.28, -123.12));
        assert_eq!(route.steps.len(), 2);
        assert_eq!(route.steps[1].maneuver, "ARRIVE");
        assert_eq!(route.steps[1].route_offset_meters, 4900.0);
    }

    #[test]
    fn concatenates_points_across_legs() {
        let body = r#"{
            "routes": [{
                "summary": {"lengthInMeters": 100.0, "travelTimeInSeconds": 60.0},
                "legs": [
                    {"points": [{"latitude": 1.0, "longitude": 2.0}], "instructions": []},
                    {"points": [{"latitude": 3.0, "longitude": 4.0}], "instructions": []}
                ]
            }]
        }"#;
        let route = parse_route_response(body).expect("Route erwartet");
        assert_eq!(route.geometry.len(), 2);
        assert_eq!(route.geometry[1], GeoPosition::new(3.0, 4.0));
    }

    #[test]
    fn empty_routes_is_no_result() {
        assert_eq!(
            parse_route_response(r#"{"routes": []}"#),
            Err(ProviderError::NoResult)
        );
    }

    #[test]
    fn missing_instructions_default_to_empty() {
        let body = r#"{
            "routes": [{
                "summary": {"lengthInMeters": 1.0, "travelTimeInSeconds": 1.0},
                "legs": [{"points": []}]
            }]
        }"#;
        let route = parse_route_response(body).expect("Route erwartet");
        assert!(route.steps.is_empty());
    }
}
