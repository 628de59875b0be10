//! Prelude module for common signdb-map types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use signdb_map::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{FacadeConfig, InitOptions, MapOptions, ReinitPolicy, SwitcherConfig},
    crs::Crs,
    geo::{LatLng, LatLngBounds, TileCoord},
    map::Map as CoreMap,
    viewport::Viewport,
};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    manager::LayerManager,
    marker::Marker,
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::tiles::source::{TileSource, UrlTemplateSource};

pub use crate::input::{
    events::{InputEvent, MapEvent, MouseButton},
    handler::EventManager,
};

pub use crate::ui::controls::{ControlPosition, LayerSwitcher};

pub use crate::signdb::{
    backend::{ClickCallback, CoreMapFactory, MapBackend, MapFactory},
    facade::{round, MarkerHandle, SignDbMap, SignDbMapBuilder},
    layers::{BaseLayerId, BaseLayers},
    lookup::{Lookup, LookupService, PendingLookupService},
    model::{District, Point, Street},
};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
