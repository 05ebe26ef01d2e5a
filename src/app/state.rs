//! Application State — zentrale Datenhaltung.

use super::CommandLog;
use crate::core::{GeoPosition, MapViewport, RouteEditor};
use crate::map::{LineHandle, MapScene, MarkerHandle, MarkerStyle};
use crate::providers::{CurrentWeather, Poi, TrafficIncident, TransitAgency, TransitArrival};
use crate::shared::AppOptions;

/// Anfangstext der Routing-Statuszeile.
pub const ROUTE_PROMPT_INITIAL: &str = "Click two points on the map or enter locations below";

/// Lebenszyklus eines Panel-Abrufs.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Noch nichts abgerufen
    Idle,
    /// Abruf laeuft
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Daten, falls vorhanden.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Einfaerbung der Routing-Statuszeile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Success,
    Error,
}

/// View-bezogener Anwendungszustand.
pub struct ViewState {
    /// Karten-Viewport (Zentrum, Zoom, Pixelgroesse)
    pub viewport: MapViewport,
    /// Marker/Linien-Szene ueber der Basiskarte
    pub scene: MapScene,
    /// Aktuelle Position (Suchtreffer bzw. Startposition)
    pub current_position: GeoPosition,
    /// Marker der aktuellen Position
    pub place_marker: Option<MarkerHandle>,
    /// Traffic-Overlay und Incident-Liste aktiv
    pub traffic_enabled: bool,
    /// Wetter-Overlay (Label + Radar) aktiv
    pub weather_overlay_enabled: bool,
    /// Kachel-Template des aktuellen Radar-Frames
    pub radar_tile_template: Option<String>,
}

impl ViewState {
    fn new(start: GeoPosition, zoom: f64) -> Self {
        let mut scene = MapScene::new();
        let place_marker = scene.show_marker(start, "You are here", MarkerStyle::Place);
        let mut viewport = MapViewport::new(start);
        viewport.set_zoom(zoom);
        Self {
            viewport,
            scene,
            current_position: start,
            place_marker: Some(place_marker),
            traffic_enabled: false,
            weather_overlay_enabled: false,
            radar_tile_template: None,
        }
    }
}

/// Zustand der Info-Panels in der Seitenleiste.
pub struct PanelsState {
    pub weather: FetchState<CurrentWeather>,
    pub pois: FetchState<Vec<Poi>>,
    /// Handles der POI-Marker (vor jedem Refresh zu entfernen)
    pub poi_markers: Vec<MarkerHandle>,
    pub incidents: FetchState<Vec<TrafficIncident>>,
    /// Handles der Incident-Marker
    pub incident_markers: Vec<MarkerHandle>,
    pub transit: FetchState<Vec<TransitArrival>>,
    pub transit_agency: TransitAgency,
    /// Zuletzt abgefragte Haltestelle (Stale-Guard fuer Antworten)
    pub transit_last_query: Option<(TransitAgency, String)>,
}

impl PanelsState {
    fn new() -> Self {
        Self {
            weather: FetchState::Idle,
            pois: FetchState::Idle,
            poi_markers: Vec::new(),
            incidents: FetchState::Idle,
            incident_markers: Vec::new(),
            transit: FetchState::Idle,
            transit_agency: TransitAgency::Ttc,
            transit_last_query: None,
        }
    }
}

/// Praesentationszustand des Routen-Panels.
///
/// Haelt die Marker/Linien-Handles der Route; wer einen Slot ersetzt,
/// entfernt zuerst das alte Handle aus der Szene.
pub struct RoutePanelState {
    /// Statuszeile des Panels
    pub status: String,
    pub status_tone: StatusTone,
    /// Adresseingabe Start
    pub start_input: String,
    /// Adresseingabe Ziel
    pub end_input: String,
    pub start_marker: Option<MarkerHandle>,
    pub end_marker: Option<MarkerHandle>,
    pub line: Option<LineHandle>,
}

impl RoutePanelState {
    fn new() -> Self {
        Self {
            status: ROUTE_PROMPT_INITIAL.to_string(),
            status_tone: StatusTone::Neutral,
            start_input: String::new(),
            end_input: String::new(),
            start_marker: None,
            end_marker: None,
            line: None,
        }
    }
}

/// UI-bezogener Anwendungszustand (Eingabefelder, Statusmeldung).
#[derive(Default)]
pub struct UiState {
    /// Freitext-Suchfeld
    pub search_input: String,
    /// Haltestellen-ID-Feld im OePNV-Panel
    pub transit_stop_input: String,
    /// Temporaere Statusmeldung in der Status-Bar
    pub status_message: Option<String>,
}

/// Hauptzustand der Anwendung.
pub struct AppState {
    /// Routen-Editor (reine Zustandsmaschine)
    pub route: RouteEditor,
    /// Praesentation des Routen-Panels (Handles, Statuszeile, Eingaben)
    pub route_panel: RoutePanelState,
    /// View-State
    pub view: ViewState,
    /// Panel-State (Wetter, POIs, Verkehr, OePNV)
    pub panels: PanelsState,
    /// UI-State
    pub ui: UiState,
    /// Laufzeit-Optionen (API-Keys, Startposition, Voreinstellungen)
    pub options: AppOptions,
    /// Verlauf ausgefuehrter Commands
    pub command_log: CommandLog,
    /// Signalisiert dem Host (eframe), die Anwendung zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt den App-State aus den geladenen Optionen.
    pub fn new(options: AppOptions) -> Self {
        let start = options.start_position();
        Self {
            route: RouteEditor::new(),
            route_panel: RoutePanelState::new(),
            view: ViewState::new(start, options.start_zoom),
            panels: PanelsState::new(),
            ui: UiState::default(),
            options,
            command_log: CommandLog::new(),
            should_exit: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppOptions::default())
    }
}
