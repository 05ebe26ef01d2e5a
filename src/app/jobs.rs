//! Hintergrund-Jobs fuer blockierende Dienst-Aufrufe.
//!
//! Jeder Job laeuft auf einem kurzlebigen Worker-Thread und meldet sein
//! Ergebnis als `AppIntent` ueber einen Channel an den UI-Thread zurueck.
//! Der Intent traegt den Anfrage-Snapshot, fuer den der Job gestartet
//! wurde; verspaetete Antworten verwirft die Empfangsseite.

use super::AppIntent;
use crate::core::{GeoBounds, GeoPosition, RouteRequest, RouteSlot};
use crate::providers::{
    build_http_client, Geocoder, NominatimGeocoder, PoiProvider, RadarProvider, RainViewerRadar,
    RoutingProvider, TomTomPoiProvider, TomTomRoutingProvider, TomTomTrafficProvider,
    TrafficProvider, TransitAgency, TransitFeeds, TransitProvider, WeatherProvider,
    WeatherbitProvider,
};
use crate::shared::AppOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Buendel aller Dienst-Anbindungen; Tests ersetzen einzelne Eintraege
/// durch Stubs.
pub struct Providers {
    pub geocoder: Box<dyn Geocoder + Send + Sync>,
    pub routing: Box<dyn RoutingProvider + Send + Sync>,
    pub weather: Box<dyn WeatherProvider + Send + Sync>,
    pub radar: Box<dyn RadarProvider + Send + Sync>,
    pub poi: Box<dyn PoiProvider + Send + Sync>,
    pub traffic: Box<dyn TrafficProvider + Send + Sync>,
    pub transit: Box<dyn TransitProvider + Send + Sync>,
}

impl Providers {
    /// Baut die Live-Anbindungen aus den konfigurierten Keys.
    pub fn live(options: &AppOptions) -> anyhow::Result<Self> {
        let client = build_http_client()?;
        Ok(Self {
            geocoder: Box::new(NominatimGeocoder::new(client.clone())),
            routing: Box::new(TomTomRoutingProvider::new(
                client.clone(),
                options.tomtom_api_key.clone(),
            )),
            weather: Box::new(WeatherbitProvider::new(
                client.clone(),
                options.weatherbit_api_key.clone(),
            )),
            radar: Box::new(RainViewerRadar::new(client.clone())),
            poi: Box::new(TomTomPoiProvider::new(
                client.clone(),
                options.tomtom_api_key.clone(),
            )),
            traffic: Box::new(TomTomTrafficProvider::new(
                client.clone(),
                options.tomtom_api_key.clone(),
            )),
            transit: Box::new(TransitFeeds::new(client, options.translink_api_key.clone())),
        })
    }
}

/// Startet Jobs und liefert Abschluesse als Intents zurueck.
pub struct JobRunner {
    providers: Arc<Providers>,
    tx: Sender<AppIntent>,
    ctx: egui::Context,
    pending: Arc<AtomicUsize>,
}

impl JobRunner {
    /// Erstellt den Runner samt Empfangsseite fuer den UI-Thread.
    pub fn new(providers: Providers, ctx: egui::Context) -> (Self, Receiver<AppIntent>) {
        let (tx, rx) = channel();
        (
            Self {
                providers: Arc::new(providers),
                tx,
                ctx,
                pending: Arc::new(AtomicUsize::new(0)),
            },
            rx,
        )
    }

    /// Gibt `true` zurueck, solange Jobs laufen (Repaint noetig).
    pub fn has_pending(&self) -> bool {
        self.pending.load(Ordering::Relaxed) > 0
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&Providers) -> AppIntent + Send + 'static,
    {
        let providers = self.providers.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        let pending = self.pending.clone();
        pending.fetch_add(1, Ordering::Relaxed);
        std::thread::spawn(move || {
            let intent = job(&providers);
            let _ = tx.send(intent);
            pending.fetch_sub(1, Ordering::Relaxed);
            ctx.request_repaint();
        });
    }

    /// Freitext-Suche aufloesen.
    pub fn resolve_search(&self, query: String) {
        self.spawn(move |p| AppIntent::SearchGeocodeArrived {
            result: p.geocoder.resolve(&query),
            query,
        });
    }

    /// Adresse fuer einen Routen-Slot aufloesen.
    pub fn resolve_route_address(&self, slot: RouteSlot, query: String) {
        self.spawn(move |p| AppIntent::RouteGeocodeArrived {
            slot,
            result: p.geocoder.resolve(&query),
            query,
        });
    }

    /// Route fuer einen Anfrage-Snapshot berechnen.
    pub fn compute_route(&self, request: RouteRequest) {
        self.spawn(move |p| AppIntent::RouteResponseArrived {
            result: p.routing.route(&request),
            request,
        });
    }

    /// Aktuelles Wetter fuer eine Position laden.
    pub fn fetch_weather(&self, position: GeoPosition) {
        self.spawn(move |p| AppIntent::WeatherArrived {
            position,
            result: p.weather.current(position),
        });
    }

    /// Juengsten Radar-Frame ermitteln.
    pub fn fetch_radar_frame(&self) {
        self.spawn(move |p| AppIntent::RadarFrameArrived {
            result: p.radar.latest_frame_path(),
        });
    }

    /// POIs einer Kategorie rund um eine Position suchen.
    pub fn fetch_pois(&self, around: GeoPosition, category: String) {
        self.spawn(move |p| AppIntent::PoisArrived {
            around,
            result: p.poi.search(&category, around),
            category,
        });
    }

    /// Verkehrsstoerungen im Kartenausschnitt laden.
    pub fn fetch_incidents(&self, bbox: GeoBounds) {
        self.spawn(move |p| AppIntent::IncidentsArrived {
            result: p.traffic.incidents(bbox),
        });
    }

    /// Abfahrten fuer eine Haltestelle laden.
    pub fn fetch_transit(&self, agency: TransitAgency, stop_id: String) {
        self.spawn(move |p| AppIntent::TransitArrived {
            agency,
            result: p.transit.arrivals(agency, &stop_id),
            stop_id,
        });
    }
}
