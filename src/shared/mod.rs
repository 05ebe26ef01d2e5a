//! Geteilte Typen fuer layer-uebergreifende Vertraege.

pub mod options;

pub use options::AppOptions;
pub use options::{DEFAULT_POI_CATEGORY, DEFAULT_ZOOM, OSM_TILE_TEMPLATE};
