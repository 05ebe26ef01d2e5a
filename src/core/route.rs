//! Routen-Editor: Zwei-Wegpunkt-Zustandsmaschine mit Replace-Modus.
//!
//! Der Editor haelt ausschliesslich reinen Zustand (Start/Ziel-Slots,
//! Replace-Ziel, Fortbewegungsart, letzte Route) und liefert fuer jede
//! Transition eine Ereignisliste an die Praesentationsschicht. Netzwerk,
//! Marker und Statuszeile liegen ausserhalb; Routenberechnungen werden als
//! `RouteRequest`-Snapshot angefordert und ueber `apply_route_response`
//! wieder eingespielt.

use super::geo::GeoPosition;
use serde::{Deserialize, Serialize};

/// Benannter Routen-Slot: Startpunkt oder Ziel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSlot {
    Start,
    End,
}

/// Fortbewegungsart fuer die Provider-Anfrage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Car,
    Pedestrian,
    Bicycle,
}

impl TravelMode {
    /// Alle Modi in Anzeige-Reihenfolge.
    pub const ALL: [TravelMode; 3] = [TravelMode::Car, TravelMode::Pedestrian, TravelMode::Bicycle];

    /// Wert fuer den `travelMode`-Query-Parameter des Routing-Dienstes.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Pedestrian => "pedestrian",
            TravelMode::Bicycle => "bicycle",
        }
    }

    /// Anzeigename fuer die Modus-Auswahl.
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Car => "Car",
            TravelMode::Pedestrian => "Walk",
            TravelMode::Bicycle => "Bicycle",
        }
    }
}

/// Einzelner Navigationsschritt aus der Provider-Antwort.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnInstruction {
    /// Anweisungstext ("Turn left onto ...")
    pub message: String,
    /// Manoever-Kennung des Providers (z.B. `TURN_LEFT`)
    pub maneuver: String,
    /// Position des Schritts entlang der Route in Metern
    pub route_offset_meters: f64,
}

/// Vollstaendig berechnete Route: Zusammenfassung, Geometrie, Schritte.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedRoute {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Polyline-Punkte in Fahrreihenfolge
    pub geometry: Vec<GeoPosition>,
    pub steps: Vec<TurnInstruction>,
}

/// Snapshot einer ausgehenden Routen-Anfrage.
///
/// Die Antwort traegt denselben Snapshot zurueck; nur die aktuell
/// ausstehende Anfrage darf ihr Ergebnis in den Editor einspielen.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub id: u64,
    pub start: GeoPosition,
    pub end: GeoPosition,
    pub mode: TravelMode,
}

/// Fehlgeschlagene Routenberechnung; lokal behandelt, Zustand bleibt gueltig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFailure {
    /// Provider fand keine Route zwischen den Punkten
    NoRouteFound,
    /// Provider nicht erreichbar oder Antwort unbrauchbar
    ProviderUnreachable,
}

/// Interner Vorbedingungsfehler: Anfrage ohne zwei belegte Slots.
/// Ueber die oeffentlichen Transitionen nicht erreichbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("route computation requires both start and end waypoints")]
pub struct IncompleteRoute;

/// Belegungszustand der beiden Slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePhase {
    Empty,
    HasStart,
    HasBoth,
}

/// Benachrichtigungen des Editors an die Praesentationsschicht.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvent {
    /// Slot-Belegung hat sich geaendert (Marker synchronisieren)
    WaypointsChanged {
        start: Option<GeoPosition>,
        end: Option<GeoPosition>,
    },
    /// Replace-Ziel gesetzt oder verbraucht
    ReplaceTargetChanged { target: Option<RouteSlot> },
    /// Beide Slots belegt: Anfrage an den Routing-Provider stellen
    RouteRequested(RouteRequest),
    /// Provider-Antwort uebernommen
    RouteComputed(ComputedRoute),
    /// Berechnung fehlgeschlagen; vorherige Route bleibt erhalten
    RouteFailed(RouteFailure),
    /// Editor vollstaendig zurueckgesetzt
    Cleared,
}

/// Zwei-Wegpunkt-Zustandsmaschine (`Empty -> HasStart -> HasBoth`).
#[derive(Debug, Default)]
pub struct RouteEditor {
    enabled: bool,
    start: Option<GeoPosition>,
    end: Option<GeoPosition>,
    replace_target: Option<RouteSlot>,
    mode: TravelMode,
    last_route: Option<ComputedRoute>,
    /// Aktuell ausstehende Anfrage (Stale-Guard fuer spaete Antworten)
    pending: Option<RouteRequest>,
    next_request_id: u64,
}

impl RouteEditor {
    /// Erstellt einen deaktivierten, leeren Editor.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start(&self) -> Option<GeoPosition> {
        self.start
    }

    pub fn end(&self) -> Option<GeoPosition> {
        self.end
    }

    pub fn replace_target(&self) -> Option<RouteSlot> {
        self.replace_target
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn last_route(&self) -> Option<&ComputedRoute> {
        self.last_route.as_ref()
    }

    /// Aktuell ausstehende Anfrage, falls eine Berechnung laeuft.
    pub fn pending_request(&self) -> Option<&RouteRequest> {
        self.pending.as_ref()
    }

    /// Belegungszustand, abgeleitet aus den Slots.
    pub fn phase(&self) -> RoutePhase {
        match (self.start, self.end) {
            (Some(_), Some(_)) => RoutePhase::HasBoth,
            (Some(_), None) => RoutePhase::HasStart,
            _ => RoutePhase::Empty,
        }
    }

    /// Aktiviert den interaktiven Routing-Modus. No-op wenn bereits aktiv.
    pub fn enable(&mut self) -> Vec<RouteEvent> {
        if self.enabled {
            return Vec::new();
        }
        self.enabled = true;
        Vec::new()
    }

    /// Deaktiviert den Routing-Modus und setzt den Editor vollstaendig
    /// zurueck. No-op wenn bereits deaktiviert.
    pub fn disable(&mut self) -> Vec<RouteEvent> {
        if !self.enabled {
            return Vec::new();
        }
        let events = self.clear();
        self.enabled = false;
        events
    }

    /// Armiert den One-Shot-Replace-Modus fuer einen Slot (oder hebt ihn auf).
    pub fn set_replace_target(&mut self, target: Option<RouteSlot>) -> Vec<RouteEvent> {
        if !self.enabled {
            return Vec::new();
        }
        self.replace_target = target;
        vec![RouteEvent::ReplaceTargetChanged { target }]
    }

    /// Nimmt einen Punkt entgegen (Karten-Klick oder aufgeloester Geocode).
    ///
    /// Transitionstabelle: ein armiertes Replace-Ziel verbraucht den Punkt
    /// fuer genau diesen Slot; sonst fuellt der erste Punkt Start, der zweite
    /// Ziel, und jeder weitere ueberschreibt ausschliesslich das Ziel.
    pub fn submit_point(&mut self, position: GeoPosition) -> Vec<RouteEvent> {
        if !self.enabled {
            return Vec::new();
        }
        let mut events = Vec::new();

        if let Some(slot) = self.replace_target.take() {
            self.assign(slot, position);
            events.push(RouteEvent::ReplaceTargetChanged { target: None });
            events.push(self.waypoints_changed());
            self.push_request_if_complete(&mut events);
            return events;
        }

        if self.start.is_none() {
            self.start = Some(position);
        } else {
            self.end = Some(position);
        }
        events.push(self.waypoints_changed());
        self.push_request_if_complete(&mut events);
        events
    }

    /// Uebernimmt einen fuer einen benannten Slot aufgeloesten Geocode.
    ///
    /// Verhaelt sich wie `submit_point`, beschraenkt auf den Slot: Start
    /// fuellt bzw. ueberschreibt Start, Ziel fuellt bzw. ueberschreibt Ziel.
    /// Ein Ziel-Geocode ohne gesetzten Start bleibt ein No-op.
    pub fn submit_address_resolved(
        &mut self,
        slot: RouteSlot,
        position: GeoPosition,
    ) -> Vec<RouteEvent> {
        if !self.enabled {
            return Vec::new();
        }
        if slot == RouteSlot::End && self.start.is_none() {
            return Vec::new();
        }
        self.assign(slot, position);
        let mut events = vec![self.waypoints_changed()];
        self.push_request_if_complete(&mut events);
        events
    }

    /// Setzt die Fortbewegungsart; in `HasBoth` wird neu berechnet.
    pub fn set_travel_mode(&mut self, mode: TravelMode) -> Vec<RouteEvent> {
        if !self.enabled {
            return Vec::new();
        }
        self.mode = mode;
        let mut events = Vec::new();
        self.push_request_if_complete(&mut events);
        events
    }

    /// Setzt Slots, Replace-Ziel, ausstehende Anfrage und letzte Route
    /// zurueck. Idempotent.
    pub fn clear(&mut self) -> Vec<RouteEvent> {
        if !self.enabled {
            return Vec::new();
        }
        self.start = None;
        self.end = None;
        self.replace_target = None;
        self.last_route = None;
        self.pending = None;
        vec![self.waypoints_changed(), RouteEvent::Cleared]
    }

    /// Erstellt den Anfrage-Snapshot fuer die aktuelle Belegung.
    ///
    /// Vorbedingung: beide Slots belegt. Die oeffentlichen Transitionen
    /// rufen dies nur dann auf; der Fehlerpfad ist eine Assertion gegen
    /// Programmierfehler, kein Nutzerfehler.
    pub fn request_route(&mut self) -> Result<RouteRequest, IncompleteRoute> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(IncompleteRoute);
        };
        self.next_request_id += 1;
        let request = RouteRequest {
            id: self.next_request_id,
            start,
            end,
            mode: self.mode,
        };
        self.pending = Some(request.clone());
        Ok(request)
    }

    /// Spielt eine Provider-Antwort ein.
    ///
    /// Verspaetete Antworten werden verworfen, wenn Routing inzwischen
    /// deaktiviert wurde oder die Anfrage nicht mehr der ausstehende
    /// Snapshot ist (Wegpunkte/Modus haben sich geaendert, Route geloescht).
    pub fn apply_route_response(
        &mut self,
        request: &RouteRequest,
        outcome: Result<ComputedRoute, RouteFailure>,
    ) -> Vec<RouteEvent> {
        if !self.enabled || self.pending.as_ref() != Some(request) {
            return Vec::new();
        }
        self.pending = None;
        match outcome {
            Ok(route) => {
                self.last_route = Some(route.clone());
                vec![RouteEvent::RouteComputed(route)]
            }
            Err(failure) => vec![RouteEvent::RouteFailed(failure)],
        }
    }

    fn assign(&mut self, slot: RouteSlot, position: GeoPosition) {
        match slot {
            RouteSlot::Start => self.start = Some(position),
            RouteSlot::End => self.end = Some(position),
        }
    }

    fn waypoints_changed(&self) -> RouteEvent {
        RouteEvent::WaypointsChanged {
            start: self.start,
            end: self.end,
        }
    }

    fn push_request_if_complete(&mut self, events: &mut Vec<RouteEvent>) {
        if self.start.is_some() && self.end.is_some() {
            match self.request_route() {
                Ok(request) => events.push(RouteEvent::RouteRequested(request)),
                Err(_) => debug_assert!(false, "Slots belegt, Anfrage muss moeglich sein"),
            }
        }
    }
}

#[cfg(test)]
mod tests;
