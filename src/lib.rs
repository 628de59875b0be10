//! # signdb-map
//!
//! Map facade for the municipal sign database.
//!
//! The crate bundles a small, headless, Leaflet-shaped map engine (layers,
//! controls, viewport, click events) together with the custom AD-SDI
//! coordinate reference system, and exposes [`SignDbMap`], the facade the
//! sign-database application talks to: three predefined base layers, a
//! layer switcher, point markers and click callbacks.

pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod signdb;
pub mod tiles;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{FacadeConfig, InitOptions, MapOptions, ReinitPolicy},
    crs::Crs,
    geo::{LatLng, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use layers::{base::LayerTrait, marker::Marker, tile::TileLayer};

pub use input::{events::InputEvent, events::MapEvent, handler::EventManager};

pub use ui::controls::LayerSwitcher;

pub use signdb::{
    backend::{CoreMapFactory, MapBackend, MapFactory},
    facade::{round, MarkerHandle, SignDbMap, SignDbMapBuilder},
    layers::{BaseLayerId, BaseLayers},
    lookup::{Lookup, LookupService, PendingLookupService},
    model::{District, Point, Street},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Map is not initialized")]
    NotInitialized,

    #[error("Map is already initialized in container '{container_id}'")]
    AlreadyInitialized { container_id: String },

    #[error("Unknown base layer: {0}")]
    UnknownBaseLayer(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Control error: {0}")]
    Control(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Lookup error: {0}")]
    Lookup(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initializes `env_logger` with an `info` default filter.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "debug")]
    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
        log::info!("logging initialized");
    }

    #[test]
    fn test_not_initialized_message() {
        assert_eq!(
            MapError::NotInitialized.to_string(),
            crate::constants::NOT_INITIALIZED_MSG
        );
    }
}
