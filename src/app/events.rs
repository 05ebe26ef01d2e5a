//! AppIntent- und AppCommand-Enums fuer den Intent/Command-Datenfluss.

use crate::core::{ComputedRoute, GeoPosition, RouteRequest, RouteSlot, TravelMode};
use crate::providers::{
    CurrentWeather, Poi, ProviderError, TrafficIncident, TransitAgency, TransitArrival,
};

/// Intents sind Eingaben aus UI und System ohne direkte Mutationslogik.
/// Abgeschlossene Hintergrund-Jobs kommen ebenfalls als Intents zurueck
/// und tragen den Anfrage-Snapshot, fuer den sie gestartet wurden.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Anwendung beenden
    ExitRequested,

    // ── Kartenansicht ───────────────────────────────────────────
    /// Viewport-Groesse hat sich geaendert
    ViewportResized { size: [f32; 2] },
    /// Klick in die Karte (Geo-Position unter dem Cursor)
    MapClicked { position: GeoPosition },
    /// Karte um ein Pixel-Delta verschieben
    CameraPan { delta_px: glam::Vec2 },
    /// Zoom um Stufen aendern (optional auf einen Fokuspunkt)
    CameraZoom {
        delta_levels: f64,
        focus_px: Option<glam::Vec2>,
    },
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Pan/Zoom abgeschlossen (Incidents im neuen Ausschnitt laden)
    MapViewSettled,
    /// Ansicht auf eine Position zentrieren (POI-/Incident-Zeile)
    CenterOnRequested {
        position: GeoPosition,
        zoom: Option<f64>,
    },

    // ── Suche ───────────────────────────────────────────────────
    /// Freitext-Suche abgeschickt
    SearchSubmitted { query: String },

    // ── Wetter ──────────────────────────────────────────────────
    /// Wetter-Overlay umschalten
    WeatherOverlayToggled,
    /// Wetter-Panel aktualisieren
    RefreshWeatherRequested,

    // ── POIs ────────────────────────────────────────────────────
    /// POI-Kategorie gewechselt
    PoiCategoryChanged { category: String },
    /// POI-Liste aktualisieren
    RefreshPoisRequested,

    // ── Verkehr ─────────────────────────────────────────────────
    /// Traffic-Overlay und Incident-Liste umschalten
    TrafficToggled,

    // ── OePNV ───────────────────────────────────────────────────
    /// Verkehrsbetrieb gewechselt
    TransitAgencyChanged { agency: TransitAgency },
    /// Abfahrten fuer eine Haltestellen-ID abrufen
    TransitFetchRequested { stop_id: String },

    // ── Routing ─────────────────────────────────────────────────
    /// Routing-Modus umschalten
    RoutingToggled,
    /// Adresse fuer einen benannten Slot abgeschickt
    RouteAddressSubmitted { slot: RouteSlot, query: String },
    /// One-Shot-Replace-Modus armieren bzw. aufheben
    ReplaceTargetArmed { slot: Option<RouteSlot> },
    /// Fortbewegungsart gewechselt
    TravelModeChanged { mode: TravelMode },
    /// Route und Wegpunkte verwerfen
    ClearRouteRequested,

    // ── Job-Abschluesse ─────────────────────────────────────────
    /// Geocode fuer die Freitext-Suche abgeschlossen
    SearchGeocodeArrived {
        query: String,
        result: Result<GeoPosition, ProviderError>,
    },
    /// Geocode fuer einen Routen-Slot abgeschlossen
    RouteGeocodeArrived {
        slot: RouteSlot,
        query: String,
        result: Result<GeoPosition, ProviderError>,
    },
    /// Routenberechnung abgeschlossen
    RouteResponseArrived {
        request: RouteRequest,
        result: Result<ComputedRoute, ProviderError>,
    },
    /// Wetterabruf abgeschlossen
    WeatherArrived {
        position: GeoPosition,
        result: Result<CurrentWeather, ProviderError>,
    },
    /// Radar-Frame-Metadaten abgeschlossen
    RadarFrameArrived {
        result: Result<String, ProviderError>,
    },
    /// POI-Suche abgeschlossen
    PoisArrived {
        around: GeoPosition,
        category: String,
        result: Result<Vec<Poi>, ProviderError>,
    },
    /// Incident-Abruf abgeschlossen
    IncidentsArrived {
        result: Result<Vec<TrafficIncident>, ProviderError>,
    },
    /// Abfahrts-Abruf abgeschlossen
    TransitArrived {
        agency: TransitAgency,
        stop_id: String,
        result: Result<Vec<TransitArrival>, ProviderError>,
    },
}

/// Commands mutieren den AppState; der Controller dispatcht an die
/// Feature-Handler in `handlers/`.
#[derive(Debug, Clone)]
pub enum AppCommand {
    RequestExit,
    /// Statusmeldung in der Status-Bar setzen
    SetStatusMessage { message: String },

    // ── Kartenansicht ───────────────────────────────────────────
    SetViewportSize { size: [f32; 2] },
    PanCamera { delta_px: glam::Vec2 },
    ZoomCamera {
        delta_levels: f64,
        focus_px: Option<glam::Vec2>,
    },
    CenterOn {
        position: GeoPosition,
        zoom: Option<f64>,
    },
    /// Aktuelle Position auf das Kartenzentrum setzen
    SyncViewCenter,

    // ── Suche ───────────────────────────────────────────────────
    ResolveSearch { query: String },
    ApplySearchGeocode {
        query: String,
        result: Result<GeoPosition, ProviderError>,
    },

    // ── Wetter ──────────────────────────────────────────────────
    RefreshWeather,
    ApplyWeather {
        position: GeoPosition,
        result: Result<CurrentWeather, ProviderError>,
    },
    ToggleWeatherOverlay,
    ApplyRadarFrame {
        result: Result<String, ProviderError>,
    },

    // ── POIs ────────────────────────────────────────────────────
    SetPoiCategory { category: String },
    RefreshPois,
    ApplyPois {
        around: GeoPosition,
        category: String,
        result: Result<Vec<Poi>, ProviderError>,
    },

    // ── Verkehr ─────────────────────────────────────────────────
    ToggleTraffic,
    RefreshIncidents,
    ApplyIncidents {
        result: Result<Vec<TrafficIncident>, ProviderError>,
    },

    // ── OePNV ───────────────────────────────────────────────────
    SetTransitAgency { agency: TransitAgency },
    FetchTransit { stop_id: String },
    ApplyTransit {
        agency: TransitAgency,
        stop_id: String,
        result: Result<Vec<TransitArrival>, ProviderError>,
    },

    // ── Routing ─────────────────────────────────────────────────
    EnableRouting,
    DisableRouting,
    SubmitRoutePoint { position: GeoPosition },
    ArmReplaceTarget { slot: Option<RouteSlot> },
    SubmitRouteAddress { slot: RouteSlot, query: String },
    ApplyRouteGeocode {
        slot: RouteSlot,
        query: String,
        result: Result<GeoPosition, ProviderError>,
    },
    SetTravelMode { mode: TravelMode },
    ClearRoute,
    ApplyRouteResponse {
        request: RouteRequest,
        result: Result<ComputedRoute, ProviderError>,
    },
}
