//! Einheiten-Formatierung fuer Distanzen und Fahrzeiten.

/// Formatiert eine Distanz in Metern fuer die Routen-Zusammenfassung
/// (immer Kilometer mit zwei Nachkommastellen).
pub fn format_route_distance(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Formatiert eine Distanz in Metern fuer einen einzelnen Navigationsschritt
/// (Kilometer mit einer Nachkommastelle ab 1 km, sonst ganze Meter).
pub fn format_step_distance(meters: f64) -> String {
    if meters > 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}

/// Formatiert eine Fahrzeit in Sekunden als `1h 5m` bzw. `42m`.
pub fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds / 60.0).round() as i64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_distance_always_in_km() {
        assert_eq!(format_route_distance(5000.0), "5.00 km");
        assert_eq!(format_route_distance(650.0), "0.65 km");
    }

    #[test]
    fn step_distance_switches_units_at_one_km() {
        assert_eq!(format_step_distance(999.0), "999 m");
        assert_eq!(format_step_distance(1000.0), "1000 m");
        assert_eq!(format_step_distance(1500.0), "1.5 km");
    }

    #[test]
    fn duration_splits_hours_and_minutes() {
        assert_eq!(format_duration(600.0), "10m");
        assert_eq!(format_duration(3900.0), "1h 5m");
        assert_eq!(format_duration(29.0), "0m");
    }
}
