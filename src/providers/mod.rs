//! Anbindungen an externe Web-Dienste.
//!
//! Jeder Dienst steht hinter einem schmalen Trait; die Implementierungen
//! parsen die Antwort in enge DTOs und formen sie sofort in Domaenentypen
//! um. Alle Aufrufe blockieren und laufen deshalb nur auf Worker-Threads
//! (siehe `app::jobs`).

pub mod geocoder;
pub mod poi;
pub mod routing;
pub mod traffic;
pub mod transit;
pub mod weather;

pub use geocoder::{Geocoder, NominatimGeocoder};
pub use poi::{Poi, PoiProvider, TomTomPoiProvider};
pub use routing::{RoutingProvider, TomTomRoutingProvider};
pub use traffic::{TomTomTrafficProvider, TrafficIncident, TrafficProvider};
pub use transit::{TransitAgency, TransitArrival, TransitFeeds, TransitProvider};
pub use weather::{
    CurrentWeather, RadarProvider, RainViewerRadar, WeatherOverlayKind, WeatherProvider,
    WeatherbitProvider,
};

use std::time::Duration;

/// Fehler-Taxonomie fuer alle externen Dienste.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Transportfehler: DNS, Timeout, Verbindungsabbruch
    #[error("request failed: {0}")]
    Transport(String),
    /// Dienst hat mit einem Fehlerstatus geantwortet
    #[error("service answered with status {0}")]
    BadStatus(u16),
    /// Antwort liess sich nicht in die erwartete Form bringen
    #[error("unexpected response shape: {0}")]
    Decode(String),
    /// Anfrage war gueltig, aber ohne Treffer
    #[error("no result for this query")]
    NoResult,
    /// Dienst benoetigt einen API-Key, der nicht konfiguriert ist
    #[error("api key missing")]
    MissingKey,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ProviderError::BadStatus(status.as_u16()),
            None => ProviderError::Transport(err.to_string()),
        }
    }
}

/// Timeout fuer alle Dienst-Aufrufe.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Baut den geteilten blockierenden HTTP-Client.
/// `reqwest::blocking::Client` ist intern referenzgezaehlt; ein Clone pro
/// Provider ist billig.
pub fn build_http_client() -> anyhow::Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("StadtKompass/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Prueft den HTTP-Status und liefert den Body als Text.
pub(crate) fn read_text(response: reqwest::blocking::Response) -> Result<String, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::BadStatus(status.as_u16()));
    }
    response
        .text()
        .map_err(|e| ProviderError::Transport(e.to_string()))
}
