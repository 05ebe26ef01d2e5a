use super::*;

fn enabled_editor() -> RouteEditor {
    let mut editor = RouteEditor::new();
    editor.enable();
    editor
}

fn p(lat: f64, lng: f64) -> GeoPosition {
    GeoPosition::new(lat, lng)
}

fn sample_route() -> ComputedRoute {
    ComputedRoute {
        distance_meters: 5000.0,
        duration_seconds: 600.0,
        geometry: vec![p(49.28, -123.12), p(49.30, -123.05)],
        steps: Vec::new(),
    }
}

fn requests(events: &[RouteEvent]) -> Vec<&RouteRequest> {
    events
        .iter()
        .filter_map(|e| match e {
            RouteEvent::RouteRequested(req) => Some(req),
            _ => None,
        })
        .collect()
}

#[test]
fn submit_sequences_never_exceed_two_slots() {
    let mut editor = enabled_editor();
    for i in 0..7 {
        editor.submit_point(p(49.0 + i as f64 * 0.01, -123.0));
        let occupied =
            editor.start().is_some() as usize + editor.end().is_some() as usize;
        assert!(occupied <= 2, "mehr als zwei belegte Slots nach Klick {i}");
    }
}

#[test]
fn first_submit_fills_start_without_request() {
    let mut editor = enabled_editor();
    let events = editor.submit_point(p(49.28, -123.12));

    assert_eq!(editor.phase(), RoutePhase::HasStart);
    assert!(requests(&events).is_empty(), "keine Anfrage in HasStart");
    assert!(matches!(
        events[0],
        RouteEvent::WaypointsChanged { start: Some(_), end: None }
    ));
}

#[test]
fn second_submit_fills_end_and_requests_once() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    let events = editor.submit_point(p(49.30, -123.05));

    assert_eq!(editor.phase(), RoutePhase::HasBoth);
    let reqs = requests(&events);
    assert_eq!(reqs.len(), 1, "genau eine Anfrage beim Eintritt in HasBoth");
    assert_eq!(reqs[0].start, p(49.28, -123.12));
    assert_eq!(reqs[0].end, p(49.30, -123.05));
    assert_eq!(reqs[0].mode, TravelMode::Car);
}

#[test]
fn third_submit_overwrites_end_and_keeps_start() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));
    let events = editor.submit_point(p(49.31, -123.01));

    assert_eq!(editor.start(), Some(p(49.28, -123.12)));
    assert_eq!(editor.end(), Some(p(49.31, -123.01)));
    assert_eq!(requests(&events).len(), 1, "Ueberschreiben loest genau eine Anfrage aus");
}

#[test]
fn replace_start_is_one_shot() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));

    editor.set_replace_target(Some(RouteSlot::Start));
    let events = editor.submit_point(p(49.20, -123.30));

    assert_eq!(editor.start(), Some(p(49.20, -123.30)));
    assert_eq!(editor.end(), Some(p(49.30, -123.05)), "Ziel bleibt unveraendert");
    assert_eq!(editor.replace_target(), None, "Replace-Ziel nach einem Punkt verbraucht");
    assert_eq!(requests(&events).len(), 1);
    assert!(events.contains(&RouteEvent::ReplaceTargetChanged { target: None }));

    // Der naechste Punkt folgt wieder der Standard-Tabelle (Ziel).
    editor.submit_point(p(49.10, -123.40));
    assert_eq!(editor.start(), Some(p(49.20, -123.30)));
    assert_eq!(editor.end(), Some(p(49.10, -123.40)));
}

#[test]
fn replace_into_empty_slot_fills_it() {
    let mut editor = enabled_editor();
    editor.set_replace_target(Some(RouteSlot::End));
    let events = editor.submit_point(p(49.30, -123.05));

    assert_eq!(editor.start(), None);
    assert_eq!(editor.end(), Some(p(49.30, -123.05)));
    assert_eq!(editor.replace_target(), None);
    assert!(requests(&events).is_empty(), "nur ein Slot belegt, keine Anfrage");
}

#[test]
fn clear_returns_to_empty_from_any_state() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));
    editor.set_replace_target(Some(RouteSlot::Start));
    let req = editor.pending_request().cloned().expect("Anfrage erwartet");
    editor.apply_route_response(&req, Ok(sample_route()));

    let events = editor.clear();
    assert_eq!(editor.phase(), RoutePhase::Empty);
    assert_eq!(editor.replace_target(), None);
    assert!(editor.last_route().is_none());
    assert!(editor.pending_request().is_none());
    assert!(events.contains(&RouteEvent::Cleared));

    // Idempotent: erneutes Clear bleibt im leeren Zustand.
    editor.clear();
    assert_eq!(editor.phase(), RoutePhase::Empty);
}

#[test]
fn no_route_found_keeps_previous_route() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));
    let first = editor.pending_request().cloned().expect("Anfrage erwartet");
    editor.apply_route_response(&first, Ok(sample_route()));

    let events = editor.submit_point(p(49.40, -123.00));
    let second = requests(&events)[0].clone();
    let failed = editor.apply_route_response(&second, Err(RouteFailure::NoRouteFound));

    assert_eq!(
        editor.last_route().map(|r| r.distance_meters),
        Some(5000.0),
        "vorherige Route bleibt bei Fehlschlag erhalten"
    );
    assert!(matches!(
        failed[..],
        [RouteEvent::RouteFailed(RouteFailure::NoRouteFound)]
    ));
}

#[test]
fn stale_response_after_clear_is_discarded() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));
    let req = editor.pending_request().cloned().expect("Anfrage erwartet");

    editor.clear();
    let events = editor.apply_route_response(&req, Ok(sample_route()));

    assert!(events.is_empty(), "verspaetete Antwort darf nichts einspielen");
    assert!(editor.last_route().is_none());
}

#[test]
fn stale_response_after_waypoint_change_is_discarded() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));
    let old = editor.pending_request().cloned().expect("Anfrage erwartet");

    // Drittes Submit ersetzt das Ziel und stellt eine neue Anfrage.
    editor.submit_point(p(49.40, -123.00));
    let events = editor.apply_route_response(&old, Ok(sample_route()));
    assert!(events.is_empty(), "ueberholte Anfrage darf nichts einspielen");

    let current = editor.pending_request().cloned().expect("neue Anfrage erwartet");
    let applied = editor.apply_route_response(&current, Ok(sample_route()));
    assert!(matches!(applied[..], [RouteEvent::RouteComputed(_)]));
}

#[test]
fn stale_response_after_disable_is_discarded() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));
    let req = editor.pending_request().cloned().expect("Anfrage erwartet");

    editor.disable();
    let events = editor.apply_route_response(&req, Ok(sample_route()));
    assert!(events.is_empty());
}

#[test]
fn vancouver_two_click_scenario() {
    let mut editor = enabled_editor();

    let first = editor.submit_point(p(49.28, -123.12));
    assert_eq!(editor.phase(), RoutePhase::HasStart);
    assert!(requests(&first).is_empty());

    let second = editor.submit_point(p(49.30, -123.05));
    assert_eq!(editor.phase(), RoutePhase::HasBoth);
    let req = requests(&second)[0].clone();
    assert_eq!(req.start, p(49.28, -123.12));
    assert_eq!(req.end, p(49.30, -123.05));
    assert_eq!(req.mode, TravelMode::Car, "Standard-Modus erwartet");

    let events = editor.apply_route_response(&req, Ok(sample_route()));
    match &events[..] {
        [RouteEvent::RouteComputed(route)] => {
            assert_eq!(route.distance_meters, 5000.0);
            assert_eq!(route.duration_seconds, 600.0);
        }
        other => panic!("RouteComputed erwartet, war: {other:?}"),
    }
}

#[test]
fn travel_mode_change_reissues_request_with_same_points() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));

    let events = editor.set_travel_mode(TravelMode::Bicycle);
    let reqs = requests(&events);
    assert_eq!(reqs.len(), 1, "Moduswechsel in HasBoth berechnet genau einmal neu");
    assert_eq!(reqs[0].start, p(49.28, -123.12));
    assert_eq!(reqs[0].end, p(49.30, -123.05));
    assert_eq!(reqs[0].mode, TravelMode::Bicycle);
}

#[test]
fn travel_mode_change_without_both_slots_does_not_request() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    let events = editor.set_travel_mode(TravelMode::Pedestrian);
    assert!(events.is_empty());
    assert_eq!(editor.mode(), TravelMode::Pedestrian);
}

#[test]
fn submits_are_ignored_while_disabled() {
    let mut editor = RouteEditor::new();
    assert!(editor.submit_point(p(49.28, -123.12)).is_empty());
    assert!(editor
        .submit_address_resolved(RouteSlot::Start, p(49.28, -123.12))
        .is_empty());
    assert!(editor.set_replace_target(Some(RouteSlot::Start)).is_empty());
    assert_eq!(editor.phase(), RoutePhase::Empty);
}

#[test]
fn enable_and_disable_are_noops_in_target_mode() {
    let mut editor = RouteEditor::new();
    assert!(editor.disable().is_empty());
    editor.enable();
    assert!(editor.enable().is_empty());
    assert!(editor.is_enabled());
}

#[test]
fn disable_resets_all_state() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));
    editor.set_replace_target(Some(RouteSlot::End));

    editor.disable();
    assert!(!editor.is_enabled());
    assert_eq!(editor.start(), None);
    assert_eq!(editor.end(), None);
    assert_eq!(editor.replace_target(), None);
}

#[test]
fn address_for_end_fills_end_from_has_start() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));

    let events = editor.submit_address_resolved(RouteSlot::End, p(49.30, -123.05));
    assert_eq!(editor.phase(), RoutePhase::HasBoth);
    assert_eq!(requests(&events).len(), 1);
}

#[test]
fn address_for_end_on_empty_editor_is_noop() {
    let mut editor = enabled_editor();
    let events = editor.submit_address_resolved(RouteSlot::End, p(49.30, -123.05));
    assert!(events.is_empty());
    assert_eq!(editor.phase(), RoutePhase::Empty);
}

#[test]
fn address_for_start_overwrites_existing_start() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    editor.submit_point(p(49.30, -123.05));

    let events = editor.submit_address_resolved(RouteSlot::Start, p(49.20, -123.30));
    assert_eq!(editor.start(), Some(p(49.20, -123.30)));
    assert_eq!(editor.end(), Some(p(49.30, -123.05)));
    assert_eq!(requests(&events).len(), 1);
}

#[test]
fn request_route_without_both_slots_is_incomplete() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    assert!(matches!(editor.request_route(), Err(IncompleteRoute)));
}

#[test]
fn request_ids_are_monotonic() {
    let mut editor = enabled_editor();
    editor.submit_point(p(49.28, -123.12));
    let e1 = editor.submit_point(p(49.30, -123.05));
    let e2 = editor.submit_point(p(49.40, -123.00));
    let id1 = requests(&e1)[0].id;
    let id2 = requests(&e2)[0].id;
    assert!(id2 > id1, "spaetere Anfragen brauchen groessere IDs");
}
