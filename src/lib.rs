//! StadtKompass Library.
//! Core-Funktionalitaet als Library exportiert fuer Tests und
//! Wiederverwendung.

pub mod app;
pub mod core;
pub mod map;
pub mod providers;
pub mod shared;
pub mod ui;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, FetchState, JobRunner, Providers, StatusTone,
};
pub use core::{
    ComputedRoute, GeoBounds, GeoPosition, MapViewport, RouteEditor, RouteEvent, RouteFailure,
    RoutePhase, RouteRequest, RouteSlot, TravelMode, TurnInstruction,
};
pub use map::{MapLayers, MapScene, MarkerStyle};
pub use providers::{ProviderError, TransitAgency};
pub use shared::AppOptions;
