//! Core-Domaenentypen: Geo-Positionen, Viewport, Routen-Editor, Einheiten.

pub mod geo;
pub mod route;
pub mod units;
pub mod viewport;

pub use geo::{GeoBounds, GeoPosition};
pub use route::{
    ComputedRoute, IncompleteRoute, RouteEditor, RouteEvent, RouteFailure, RoutePhase,
    RouteRequest, RouteSlot, TravelMode, TurnInstruction,
};
pub use viewport::MapViewport;
