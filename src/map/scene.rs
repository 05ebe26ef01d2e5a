//! Retained Marker/Linien-Szene ueber der Kachelkarte.
//!
//! Die Szene haelt alles, was zusaetzlich zur Basiskarte gezeichnet wird.
//! Wer einen Marker setzt, erhaelt ein Handle und ist fuer dessen
//! Entfernung verantwortlich; vor dem Ersetzen eines Slots wird das alte
//! Handle entfernt, damit keine visuellen Artefakte zurueckbleiben.

use crate::core::{GeoBounds, GeoPosition};
use std::collections::BTreeMap;

/// Handle eines gesetzten Markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MarkerHandle(u64);

/// Handle einer gezeichneten Polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineHandle(u64);

/// Darstellungsklasse eines Markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Aktuelle Position / Suchtreffer
    Place,
    /// Routen-Startpunkt
    RouteStart,
    /// Routen-Ziel
    RouteEnd,
    /// POI-Suchtreffer
    Poi,
    /// Verkehrsstoerung mit Verzoegerungs-Magnitude
    Incident { severity: u8 },
}

/// Ein Marker der Szene.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: GeoPosition,
    pub label: String,
    pub style: MarkerStyle,
}

/// Eine Polyline der Szene (aktuell nur die Routen-Geometrie).
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<GeoPosition>,
}

impl Polyline {
    /// Bounds der Linie; `None` bei leerer Punktliste.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::around(&self.points)
    }
}

/// Szene aus Markern und Linien; BTreeMap fuer stabile Zeichenreihenfolge.
#[derive(Debug, Default)]
pub struct MapScene {
    markers: BTreeMap<u64, Marker>,
    lines: BTreeMap<u64, Polyline>,
    next_id: u64,
}

impl MapScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt einen Marker und gibt dessen Handle zurueck.
    pub fn show_marker(
        &mut self,
        position: GeoPosition,
        label: impl Into<String>,
        style: MarkerStyle,
    ) -> MarkerHandle {
        self.next_id += 1;
        self.markers.insert(
            self.next_id,
            Marker {
                position,
                label: label.into(),
                style,
            },
        );
        MarkerHandle(self.next_id)
    }

    /// Entfernt einen Marker. `false`, wenn das Handle nicht (mehr) existiert.
    pub fn remove_marker(&mut self, handle: MarkerHandle) -> bool {
        self.markers.remove(&handle.0).is_some()
    }

    /// Zeichnet eine Polyline und gibt deren Handle zurueck.
    pub fn draw_polyline(&mut self, points: Vec<GeoPosition>) -> LineHandle {
        self.next_id += 1;
        self.lines.insert(self.next_id, Polyline { points });
        LineHandle(self.next_id)
    }

    /// Entfernt eine Polyline. `false`, wenn das Handle nicht (mehr) existiert.
    pub fn remove_line(&mut self, handle: LineHandle) -> bool {
        self.lines.remove(&handle.0).is_some()
    }

    /// Bounds einer Linie (fuer `fit_view` nach der Routenberechnung).
    pub fn line_bounds(&self, handle: LineHandle) -> Option<GeoBounds> {
        self.lines.get(&handle.0).and_then(|line| line.bounds())
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Polyline> {
        self.lines.values()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
