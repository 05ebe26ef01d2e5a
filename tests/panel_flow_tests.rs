//! Fluesse der Info-Panels ueber Controller und State: Suche, Wetter,
//! POIs, Verkehr, OePNV.

mod common;

use common::{stub_providers, Harness, StubGeocoder, StubTransit};
use stadt_kompass::app::{AppCommand, FetchState};
use stadt_kompass::core::GeoPosition;
use stadt_kompass::providers::{CurrentWeather, Poi, ProviderError, TransitArrival};
use stadt_kompass::AppIntent;

fn sample_weather() -> CurrentWeather {
    CurrentWeather {
        temp_c: 11.6,
        feels_like_c: 9.4,
        description: "Few clouds".to_string(),
        code: 801,
        wind_mps: 4.6,
        humidity: 82.0,
    }
}

#[test]
fn test_search_recenters_and_moves_place_marker() {
    let mut providers = stub_providers();
    providers.geocoder = Box::new(StubGeocoder(Ok(GeoPosition::new(49.2827, -123.1207))));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::SearchSubmitted {
        query: "Vancouver".to_string(),
    });
    harness.pump();

    let expected = GeoPosition::new(49.2827, -123.1207);
    assert_eq!(harness.state.view.current_position, expected);
    assert_eq!(harness.state.view.viewport.center, expected);
    assert_eq!(harness.state.view.scene.marker_count(), 1, "ein Platz-Marker");
    let marker = harness
        .state
        .view
        .scene
        .markers()
        .next()
        .expect("Platz-Marker erwartet");
    assert_eq!(marker.position, expected);
}

#[test]
fn test_failed_search_sets_status_message() {
    let mut providers = stub_providers();
    providers.geocoder = Box::new(StubGeocoder(Err(ProviderError::Transport(
        "dns".to_string(),
    ))));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::SearchSubmitted {
        query: "Vancouver".to_string(),
    });
    harness.pump();

    assert_eq!(
        harness.state.ui.status_message.as_deref(),
        Some("Failed to search location.")
    );
}

#[test]
fn test_weather_response_for_current_position_is_applied() {
    let mut harness = Harness::new(stub_providers());
    let position = harness.state.view.current_position;

    harness.handle(AppIntent::WeatherArrived {
        position,
        result: Ok(sample_weather()),
    });

    match &harness.state.panels.weather {
        FetchState::Ready(weather) => assert_eq!(weather.description, "Few clouds"),
        other => panic!("Ready erwartet, war: {other:?}"),
    }
}

#[test]
fn test_stale_weather_response_is_discarded() {
    let mut harness = Harness::new(stub_providers());

    harness.handle(AppIntent::WeatherArrived {
        position: GeoPosition::new(1.0, 2.0),
        result: Ok(sample_weather()),
    });

    assert_eq!(harness.state.panels.weather, FetchState::Idle);
}

#[test]
fn test_stale_poi_response_is_discarded() {
    let mut harness = Harness::new(stub_providers());

    harness.handle(AppIntent::PoisArrived {
        around: GeoPosition::new(1.0, 2.0),
        category: harness.state.options.poi_category.clone(),
        result: Ok(vec![Poi {
            name: "irgendwo".to_string(),
            address: String::new(),
            position: GeoPosition::new(1.0, 2.0),
        }]),
    });

    assert_eq!(harness.state.panels.pois, FetchState::Idle);
    assert!(harness.state.panels.poi_markers.is_empty());
}

#[test]
fn test_poi_response_replaces_markers() {
    let mut harness = Harness::new(stub_providers());
    let around = harness.state.view.current_position;
    let category = harness.state.options.poi_category.clone();

    let poi = |lat: f64, lng: f64| Poi {
        name: "Cafe".to_string(),
        address: "Main St".to_string(),
        position: GeoPosition::new(lat, lng),
    };

    harness.handle(AppIntent::PoisArrived {
        around,
        category: category.clone(),
        result: Ok(vec![poi(49.28, -123.12), poi(49.29, -123.10)]),
    });
    assert_eq!(harness.state.panels.poi_markers.len(), 2);
    assert_eq!(harness.state.view.scene.marker_count(), 3, "Platz + 2 POIs");

    // Zweite Antwort ersetzt die Marker, statt sie zu stapeln.
    harness.handle(AppIntent::PoisArrived {
        around,
        category,
        result: Ok(vec![poi(49.30, -123.08)]),
    });
    assert_eq!(harness.state.panels.poi_markers.len(), 1);
    assert_eq!(harness.state.view.scene.marker_count(), 2, "Platz + 1 POI");
}

#[test]
fn test_traffic_toggle_without_key_only_sets_status() {
    let mut harness = Harness::new(stub_providers());

    harness.handle(AppIntent::TrafficToggled);

    assert!(!harness.state.view.traffic_enabled);
    assert!(harness.state.ui.status_message.is_some());
    let last = harness
        .state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    assert!(matches!(last, AppCommand::SetStatusMessage { .. }));
}

#[test]
fn test_traffic_toggle_with_key_enables_and_disables() {
    let mut harness = Harness::new(stub_providers());
    harness.state.options.tomtom_api_key = "tt-key".to_string();

    harness.handle(AppIntent::TrafficToggled);
    harness.pump();
    assert!(harness.state.view.traffic_enabled);
    assert!(matches!(
        harness.state.panels.incidents,
        FetchState::Ready(_)
    ));

    harness.handle(AppIntent::TrafficToggled);
    assert!(!harness.state.view.traffic_enabled);
    assert_eq!(harness.state.panels.incidents, FetchState::Idle);
    assert!(harness.state.panels.incident_markers.is_empty());
}

#[test]
fn test_transit_fetch_with_blank_stop_fails_locally() {
    let mut harness = Harness::new(stub_providers());

    harness.handle(AppIntent::TransitFetchRequested {
        stop_id: "   ".to_string(),
    });

    assert_eq!(
        harness.state.panels.transit,
        FetchState::Failed("Enter a stop ID first.".to_string())
    );
}

#[test]
fn test_transit_fetch_fills_panel() {
    let mut providers = stub_providers();
    providers.transit = Box::new(StubTransit(Ok(vec![TransitArrival {
        route: "099".to_string(),
        headsign: "UBC".to_string(),
        minutes: Some(4),
        vehicle: "18112".to_string(),
        stop_title: "UBC EXCHANGE".to_string(),
    }])));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::TransitFetchRequested {
        stop_id: "51479".to_string(),
    });
    harness.pump();

    match &harness.state.panels.transit {
        FetchState::Ready(arrivals) => {
            assert_eq!(arrivals.len(), 1);
            assert_eq!(arrivals[0].route, "099");
        }
        other => panic!("Ready erwartet, war: {other:?}"),
    }
}

#[test]
fn test_stale_transit_response_is_discarded() {
    let mut harness = Harness::new(stub_providers());

    // Antwort ohne vorherige Abfrage: kein last_query-Treffer.
    harness.handle(AppIntent::TransitArrived {
        agency: harness.state.panels.transit_agency,
        stop_id: "99999".to_string(),
        result: Ok(Vec::new()),
    });

    assert_eq!(harness.state.panels.transit, FetchState::Idle);
}

#[test]
fn test_radar_frame_applies_only_while_overlay_enabled() {
    let mut harness = Harness::new(stub_providers());

    harness.handle(AppIntent::RadarFrameArrived {
        result: Ok("/v2/radar/333".to_string()),
    });
    assert!(harness.state.view.radar_tile_template.is_none());

    harness.handle(AppIntent::WeatherOverlayToggled);
    harness.handle(AppIntent::RadarFrameArrived {
        result: Ok("/v2/radar/333".to_string()),
    });
    let template = harness
        .state
        .view
        .radar_tile_template
        .as_deref()
        .expect("Template erwartet");
    assert!(template.contains("/v2/radar/333/"));

    harness.handle(AppIntent::WeatherOverlayToggled);
    assert!(harness.state.view.radar_tile_template.is_none());
}
