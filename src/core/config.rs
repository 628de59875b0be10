//! Configuration for the engine and the facade
//!
//! `MapOptions` configures a single engine map, `InitOptions` replaces the
//! optional arguments of `SignDbMap::init`, and `FacadeConfig` bundles the
//! facade-wide defaults so they can be loaded from JSON.

use crate::{
    core::{
        constants::{DEFAULT_PRECISION, DEFAULT_VIEWPORT_SIZE, DEFAULT_ZOOM},
        crs::Crs,
        geo::Point,
    },
    signdb::layers::BaseLayerId,
    ui::controls::ControlPosition,
    Result,
};
use serde::{Deserialize, Serialize};

/// Options for constructing an engine map, mirroring Leaflet's map options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub dragging: bool,
    pub zoom_control: bool,
    pub attribution_control: bool,
    pub crs: Crs,
    /// Container size in pixels until the host reports a resize
    pub size: Point,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            dragging: true,
            zoom_control: true,
            attribution_control: true,
            crs: Crs::default(),
            size: Point::new(DEFAULT_VIEWPORT_SIZE.0, DEFAULT_VIEWPORT_SIZE.1),
            min_zoom: None,
            max_zoom: None,
        }
    }
}

/// What `init` does when the facade already owns a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinitPolicy {
    /// Refuse with `MapError::AlreadyInitialized`, keeping the current map
    #[default]
    Reject,
    /// Build a new map and, once it is fully set up, replace the current
    /// one and its markers. A failed rebuild keeps the current map.
    Rebuild,
}

/// Optional arguments of `SignDbMap::init`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitOptions {
    /// Initial zoom level
    pub zoom: f64,
    /// Drop a marker at the initial center
    pub draw: bool,
}

impl InitOptions {
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_marker(mut self, draw: bool) -> Self {
        self.draw = draw;
        self
    }
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            draw: false,
        }
    }
}

/// Layer switcher placement and state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    pub collapsed: bool,
    pub position: ControlPosition,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            collapsed: true,
            position: ControlPosition::TopRight,
        }
    }
}

/// Facade-wide defaults.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use signdb_map::{FacadeConfig, ReinitPolicy};
///
/// let config = FacadeConfig::from_json(r#"{ "reinit": "rebuild" }"#).unwrap();
/// assert_eq!(config.reinit, ReinitPolicy::Rebuild);
/// assert_eq!(config.default_zoom, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    pub default_zoom: f64,
    pub default_precision: u32,
    pub default_base_layer: BaseLayerId,
    pub reinit: ReinitPolicy,
    pub switcher: SwitcherConfig,
    pub dragging: bool,
    pub zoom_control: bool,
    pub attribution_control: bool,
}

impl FacadeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Engine options derived from this configuration, using the AD-SDI CRS.
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            dragging: self.dragging,
            zoom_control: self.zoom_control,
            attribution_control: self.attribution_control,
            crs: Crs::ad_sdi(),
            ..MapOptions::default()
        }
    }

    /// `InitOptions` carrying the configured default zoom.
    pub fn init_options(&self) -> InitOptions {
        InitOptions::default().with_zoom(self.default_zoom)
    }
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            default_precision: DEFAULT_PRECISION,
            default_base_layer: BaseLayerId::Satellite50cm,
            reinit: ReinitPolicy::Reject,
            switcher: SwitcherConfig::default(),
            dragging: true,
            zoom_control: true,
            attribution_control: false,
        }
    }
}
