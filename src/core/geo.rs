//! Geographische Grundtypen: Position, Bounds, Distanzberechnung.

use serde::{Deserialize, Serialize};

/// Mittlerer Erdradius in Kilometern (Haversine).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographische Position in Grad (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Breitengrad in Grad (positiv = Nord)
    pub lat: f64,
    /// Laengengrad in Grad (positiv = Ost)
    pub lng: f64,
}

impl GeoPosition {
    /// Erstellt eine Position aus Breiten- und Laengengrad.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Grosskreis-Distanz zu einer anderen Position in Kilometern.
    pub fn distance_km(&self, other: &GeoPosition) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let s1 = (d_lat / 2.0).sin().powi(2);
        let s2 = self.lat.to_radians().cos() * other.lat.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * (s1 + s2).sqrt().asin()
    }
}

/// Achsenparalleles Bounding-Rechteck in Geo-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Suedwest-Ecke
    pub south_west: GeoPosition,
    /// Nordost-Ecke
    pub north_east: GeoPosition,
}

impl GeoBounds {
    /// Erstellt Bounds aus zwei Ecken (Reihenfolge beliebig).
    pub fn new(a: GeoPosition, b: GeoPosition) -> Self {
        Self {
            south_west: GeoPosition::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: GeoPosition::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Bounds um alle Punkte einer Liste. `None` bei leerer Liste.
    pub fn around(points: &[GeoPosition]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(*first, *first);
        for p in &points[1..] {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    /// Erweitert die Bounds, so dass `pos` enthalten ist.
    pub fn extend(&mut self, pos: GeoPosition) {
        self.south_west.lat = self.south_west.lat.min(pos.lat);
        self.south_west.lng = self.south_west.lng.min(pos.lng);
        self.north_east.lat = self.north_east.lat.max(pos.lat);
        self.north_east.lng = self.north_east.lng.max(pos.lng);
    }

    /// Geometrischer Mittelpunkt der Bounds.
    pub fn center(&self) -> GeoPosition {
        GeoPosition::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Formatiert die Bounds als `minLng,minLat,maxLng,maxLat` (TomTom-bbox).
    pub fn as_bbox_query(&self) -> String {
        format!(
            "{},{},{},{}",
            self.south_west.lng, self.south_west.lat, self.north_east.lng, self.north_east.lat
        )
    }
}
