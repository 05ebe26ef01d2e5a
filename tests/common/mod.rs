//! Gemeinsamer Test-Aufbau: Controller + State + JobRunner mit
//! Stub-Providern.
//!
//! Nicht jede Test-Binary nutzt alle Helfer.
#![allow(dead_code)]

use stadt_kompass::app::jobs::Providers;
use stadt_kompass::app::JobRunner;
use stadt_kompass::core::{ComputedRoute, GeoBounds, GeoPosition, RouteRequest};
use stadt_kompass::providers::{
    CurrentWeather, Geocoder, Poi, PoiProvider, ProviderError, RadarProvider, RoutingProvider,
    TrafficIncident, TrafficProvider, TransitAgency, TransitArrival, TransitProvider,
    WeatherProvider,
};
use stadt_kompass::{AppController, AppIntent, AppState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Geocoder-Stub mit fester Antwort.
pub struct StubGeocoder(pub Result<GeoPosition, ProviderError>);

impl Geocoder for StubGeocoder {
    fn resolve(&self, _query: &str) -> Result<GeoPosition, ProviderError> {
        self.0.clone()
    }
}

/// Routing-Stub: Antworten in Reihenfolge, letzte Antwort wiederholt sich.
/// Zaehlt Aufrufe und merkt sich die letzte Anfrage.
pub struct StubRouting {
    responses: Mutex<Vec<Result<ComputedRoute, ProviderError>>>,
    pub calls: Arc<AtomicUsize>,
    pub last_request: Arc<Mutex<Option<RouteRequest>>>,
}

impl StubRouting {
    pub fn new(responses: Vec<Result<ComputedRoute, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }
}

impl RoutingProvider for StubRouting {
    fn route(&self, request: &RouteRequest) -> Result<ComputedRoute, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("Lock") = Some(request.clone());
        let mut responses = self.responses.lock().expect("Lock");
        if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses
                .first()
                .cloned()
                .unwrap_or(Err(ProviderError::NoResult))
        }
    }
}

struct StubWeather;

impl WeatherProvider for StubWeather {
    fn current(&self, _position: GeoPosition) -> Result<CurrentWeather, ProviderError> {
        Err(ProviderError::NoResult)
    }
}

struct StubRadar;

impl RadarProvider for StubRadar {
    fn latest_frame_path(&self) -> Result<String, ProviderError> {
        Err(ProviderError::NoResult)
    }
}

struct StubPoi;

impl PoiProvider for StubPoi {
    fn search(&self, _category: &str, _around: GeoPosition) -> Result<Vec<Poi>, ProviderError> {
        Ok(Vec::new())
    }
}

struct StubTraffic;

impl TrafficProvider for StubTraffic {
    fn incidents(&self, _bbox: GeoBounds) -> Result<Vec<TrafficIncident>, ProviderError> {
        Ok(Vec::new())
    }
}

/// OePNV-Stub mit fester Antwort.
pub struct StubTransit(pub Result<Vec<TransitArrival>, ProviderError>);

impl TransitProvider for StubTransit {
    fn arrivals(
        &self,
        _agency: TransitAgency,
        _stop_id: &str,
    ) -> Result<Vec<TransitArrival>, ProviderError> {
        self.0.clone()
    }
}

/// Provider-Buendel, bei dem alles ins Leere laeuft; Tests ersetzen die
/// relevanten Eintraege.
pub fn stub_providers() -> Providers {
    Providers {
        geocoder: Box::new(StubGeocoder(Err(ProviderError::NoResult))),
        routing: Box::new(StubRouting::new(Vec::new())),
        weather: Box::new(StubWeather),
        radar: Box::new(StubRadar),
        poi: Box::new(StubPoi),
        traffic: Box::new(StubTraffic),
        transit: Box::new(StubTransit(Ok(Vec::new()))),
    }
}

/// Beispielroute Downtown Vancouver (5 km, 10 min).
pub fn sample_route() -> ComputedRoute {
    ComputedRoute {
        distance_meters: 5000.0,
        duration_seconds: 600.0,
        geometry: vec![
            GeoPosition::new(49.28, -123.12),
            GeoPosition::new(49.29, -123.08),
            GeoPosition::new(49.30, -123.05),
        ],
        steps: Vec::new(),
    }
}

/// Controller + State + JobRunner mit Stub-Providern.
pub struct Harness {
    pub state: AppState,
    pub controller: AppController,
    pub jobs: JobRunner,
    rx: Receiver<AppIntent>,
}

impl Harness {
    pub fn new(providers: Providers) -> Self {
        let ctx = egui::Context::default();
        let (jobs, rx) = JobRunner::new(providers, ctx);
        Self {
            state: AppState::default(),
            controller: AppController::new(),
            jobs,
            rx,
        }
    }

    /// Verarbeitet einen Intent ueber den Controller.
    pub fn handle(&mut self, intent: AppIntent) {
        self.controller
            .handle_intent(&mut self.state, &self.jobs, intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }

    /// Wartet auf ausstehende Jobs und spielt deren Abschluesse ein.
    pub fn pump(&mut self) {
        while self.jobs.has_pending() {
            match self.rx.recv_timeout(Duration::from_secs(2)) {
                Ok(intent) => self.handle(intent),
                Err(_) => break,
            }
        }
        while let Ok(intent) = self.rx.try_recv() {
            self.handle(intent);
        }
    }
}
