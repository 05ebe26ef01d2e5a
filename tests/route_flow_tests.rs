//! End-to-End-Fluss des Routing-Modus ueber Controller, State und
//! Hintergrund-Jobs (mit Stub-Providern).

mod common;

use common::{sample_route, stub_providers, Harness, StubGeocoder, StubRouting};
use stadt_kompass::app::{AppCommand, StatusTone, ROUTE_PROMPT_INITIAL};
use stadt_kompass::core::{GeoPosition, RoutePhase, RouteSlot, TravelMode};
use stadt_kompass::providers::ProviderError;
use stadt_kompass::AppIntent;
use std::sync::atomic::Ordering;

fn click(harness: &mut Harness, lat: f64, lng: f64) {
    harness.handle(AppIntent::MapClicked {
        position: GeoPosition::new(lat, lng),
    });
}

#[test]
fn test_two_clicks_compute_and_draw_route() {
    let mut providers = stub_providers();
    let routing = StubRouting::new(vec![Ok(sample_route())]);
    let calls = routing.calls.clone();
    let last_request = routing.last_request.clone();
    providers.routing = Box::new(routing);
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    assert!(harness.state.route.is_enabled());
    assert_eq!(harness.state.route_panel.status, ROUTE_PROMPT_INITIAL);

    click(&mut harness, 49.28, -123.12);
    assert_eq!(harness.state.route.phase(), RoutePhase::HasStart);
    assert_eq!(
        harness.state.route_panel.status,
        "Click destination point or enter address"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0, "noch keine Anfrage");

    click(&mut harness, 49.30, -123.05);
    assert_eq!(harness.state.route.phase(), RoutePhase::HasBoth);
    harness.pump();

    assert_eq!(calls.load(Ordering::SeqCst), 1, "genau eine Anfrage");
    let request = last_request
        .lock()
        .expect("Lock")
        .clone()
        .expect("Anfrage erwartet");
    assert_eq!(request.start, GeoPosition::new(49.28, -123.12));
    assert_eq!(request.end, GeoPosition::new(49.30, -123.05));
    assert_eq!(request.mode, TravelMode::Car);

    let route = harness.state.route.last_route().expect("Route erwartet");
    assert_eq!(route.distance_meters, 5000.0);
    assert_eq!(route.duration_seconds, 600.0);
    assert_eq!(harness.state.route_panel.status, "Route calculated!");
    assert_eq!(harness.state.route_panel.status_tone, StatusTone::Success);

    // Platz-Marker + Start + Ziel, eine Routen-Linie
    assert_eq!(harness.state.view.scene.marker_count(), 3);
    assert_eq!(harness.state.view.scene.line_count(), 1);
}

#[test]
fn test_third_click_overwrites_end_and_recomputes() {
    let mut providers = stub_providers();
    let routing = StubRouting::new(vec![Ok(sample_route())]);
    let calls = routing.calls.clone();
    let last_request = routing.last_request.clone();
    providers.routing = Box::new(routing);
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    click(&mut harness, 49.28, -123.12);
    click(&mut harness, 49.30, -123.05);
    harness.pump();

    click(&mut harness, 49.31, -123.01);
    harness.pump();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let request = last_request
        .lock()
        .expect("Lock")
        .clone()
        .expect("Anfrage erwartet");
    assert_eq!(request.start, GeoPosition::new(49.28, -123.12), "Start bleibt");
    assert_eq!(request.end, GeoPosition::new(49.31, -123.01), "Ziel ueberschrieben");
    assert_eq!(harness.state.view.scene.marker_count(), 3);
}

#[test]
fn test_replace_start_via_button_is_one_shot() {
    let mut providers = stub_providers();
    providers.routing = Box::new(StubRouting::new(vec![Ok(sample_route())]));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    click(&mut harness, 49.28, -123.12);
    click(&mut harness, 49.30, -123.05);
    harness.pump();

    harness.handle(AppIntent::ReplaceTargetArmed {
        slot: Some(RouteSlot::Start),
    });
    assert_eq!(
        harness.state.route_panel.status,
        "Next map click replaces the start pin"
    );

    click(&mut harness, 49.20, -123.30);
    harness.pump();

    assert_eq!(
        harness.state.route.start(),
        Some(GeoPosition::new(49.20, -123.30))
    );
    assert_eq!(
        harness.state.route.end(),
        Some(GeoPosition::new(49.30, -123.05))
    );
    assert_eq!(harness.state.route.replace_target(), None);
    assert_eq!(harness.state.view.scene.marker_count(), 3, "keine Marker-Leichen");
}

#[test]
fn test_clear_route_resets_presentation() {
    let mut providers = stub_providers();
    providers.routing = Box::new(StubRouting::new(vec![Ok(sample_route())]));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    click(&mut harness, 49.28, -123.12);
    click(&mut harness, 49.30, -123.05);
    harness.pump();
    harness.state.route_panel.start_input = "alte Eingabe".to_string();

    harness.handle(AppIntent::ClearRouteRequested);

    assert_eq!(harness.state.route.phase(), RoutePhase::Empty);
    assert!(harness.state.route.last_route().is_none());
    assert_eq!(harness.state.view.scene.marker_count(), 1, "nur Platz-Marker");
    assert_eq!(harness.state.view.scene.line_count(), 0);
    assert!(harness.state.route_panel.start_input.is_empty());
    assert_eq!(harness.state.route_panel.status, ROUTE_PROMPT_INITIAL);
}

#[test]
fn test_no_route_found_keeps_previous_route_and_line() {
    let mut providers = stub_providers();
    providers.routing = Box::new(StubRouting::new(vec![
        Ok(sample_route()),
        Err(ProviderError::NoResult),
    ]));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    click(&mut harness, 49.28, -123.12);
    click(&mut harness, 49.30, -123.05);
    harness.pump();
    assert!(harness.state.route.last_route().is_some());

    click(&mut harness, 49.40, -123.00);
    harness.pump();

    let route = harness.state.route.last_route().expect("alte Route bleibt");
    assert_eq!(route.distance_meters, 5000.0);
    assert_eq!(harness.state.view.scene.line_count(), 1, "alte Linie bleibt");
    assert_eq!(
        harness.state.route_panel.status,
        "Failed to calculate route. Try different points."
    );
    assert_eq!(harness.state.route_panel.status_tone, StatusTone::Error);
}

#[test]
fn test_disable_routing_discards_inflight_response() {
    let mut providers = stub_providers();
    providers.routing = Box::new(StubRouting::new(vec![Ok(sample_route())]));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    click(&mut harness, 49.28, -123.12);
    click(&mut harness, 49.30, -123.05);

    // Deaktivieren, bevor die Antwort eingespielt wird.
    harness.handle(AppIntent::RoutingToggled);
    harness.pump();

    assert!(!harness.state.route.is_enabled());
    assert!(harness.state.route.last_route().is_none());
    assert_eq!(harness.state.view.scene.marker_count(), 1, "nur Platz-Marker");
    assert_eq!(harness.state.view.scene.line_count(), 0);
}

#[test]
fn test_travel_mode_change_recomputes_with_new_mode() {
    let mut providers = stub_providers();
    let routing = StubRouting::new(vec![Ok(sample_route())]);
    let calls = routing.calls.clone();
    let last_request = routing.last_request.clone();
    providers.routing = Box::new(routing);
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    click(&mut harness, 49.28, -123.12);
    click(&mut harness, 49.30, -123.05);
    harness.pump();

    harness.handle(AppIntent::TravelModeChanged {
        mode: TravelMode::Bicycle,
    });
    harness.pump();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let request = last_request
        .lock()
        .expect("Lock")
        .clone()
        .expect("Anfrage erwartet");
    assert_eq!(request.mode, TravelMode::Bicycle);
    assert_eq!(request.start, GeoPosition::new(49.28, -123.12));
    assert_eq!(request.end, GeoPosition::new(49.30, -123.05));
}

#[test]
fn test_geocode_failure_leaves_route_state_unchanged() {
    let mut providers = stub_providers();
    providers.geocoder = Box::new(StubGeocoder(Err(ProviderError::NoResult)));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    harness.handle(AppIntent::RouteAddressSubmitted {
        slot: RouteSlot::Start,
        query: "nirgendwo".to_string(),
    });
    harness.pump();

    assert_eq!(harness.state.route.phase(), RoutePhase::Empty);
    assert_eq!(
        harness.state.route_panel.status,
        "Location not found. Try a different address."
    );
    assert_eq!(harness.state.route_panel.status_tone, StatusTone::Error);
}

#[test]
fn test_address_flow_fills_start_and_centers_view() {
    let mut providers = stub_providers();
    providers.geocoder = Box::new(StubGeocoder(Ok(GeoPosition::new(49.2827, -123.1207))));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    harness.handle(AppIntent::RouteAddressSubmitted {
        slot: RouteSlot::Start,
        query: "Vancouver".to_string(),
    });
    harness.pump();

    assert_eq!(harness.state.route.phase(), RoutePhase::HasStart);
    assert_eq!(harness.state.route_panel.status, "Now set destination");
    assert_eq!(
        harness.state.view.viewport.center,
        GeoPosition::new(49.2827, -123.1207)
    );
    assert_eq!(harness.state.view.scene.marker_count(), 2, "Platz + Start");
}

#[test]
fn test_end_address_without_start_is_noop() {
    let mut providers = stub_providers();
    providers.geocoder = Box::new(StubGeocoder(Ok(GeoPosition::new(49.30, -123.05))));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    harness.handle(AppIntent::RouteAddressSubmitted {
        slot: RouteSlot::End,
        query: "Ziel ohne Start".to_string(),
    });
    harness.pump();

    assert_eq!(harness.state.route.phase(), RoutePhase::Empty);
    assert_eq!(harness.state.view.scene.marker_count(), 1, "nur Platz-Marker");
}

#[test]
fn test_map_click_outside_routing_mode_is_ignored() {
    let mut harness = Harness::new(stub_providers());

    click(&mut harness, 49.28, -123.12);

    assert_eq!(harness.state.route.phase(), RoutePhase::Empty);
    assert!(harness.state.command_log.is_empty(), "kein Command erzeugt");
}

#[test]
fn test_command_log_records_route_flow() {
    let mut providers = stub_providers();
    providers.routing = Box::new(StubRouting::new(vec![Ok(sample_route())]));
    let mut harness = Harness::new(providers);

    harness.handle(AppIntent::RoutingToggled);
    click(&mut harness, 49.28, -123.12);
    click(&mut harness, 49.30, -123.05);
    harness.pump();

    let last = harness
        .state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    match last {
        AppCommand::ApplyRouteResponse { request, .. } => {
            assert_eq!(request.mode, TravelMode::Car);
        }
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}
