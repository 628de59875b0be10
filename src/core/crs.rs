//! Custom coordinate reference systems.
//!
//! A [`Crs`] maps geographic coordinates to the pixel grid of each zoom
//! level. It is defined the proj4leaflet way: an EPSG code, a proj4
//! definition, a pixel-grid origin and an explicit resolution (map units
//! per pixel) for every zoom level.

use crate::core::{
    constants::TILE_SIZE,
    geo::{LatLng, Point, TileCoord},
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Resolution table of the AD-SDI tile services, in degrees per pixel.
///
/// Tile alignment depends on these exact doubles; do not recompute them.
pub const AD_SDI_RESOLUTIONS: [f64; 13] = [
    0.011897305029151402,
    0.005948652514575701,
    0.0029743262572878505,
    0.00118973050291514,
    5.9486525145757E-4,
    3.5691915087454206E-4,
    1.7845957543727103E-4,
    1.1897305029151401E-4,
    5.9486525145757005E-5,
    3.5691915087454204E-5,
    1.903568804664224E-5,
    9.51784402332112E-6,
    4.75892201166056E-6,
];

/// Grid origin (top-left corner) of the AD-SDI tile services.
pub const AD_SDI_ORIGIN: (f64, f64) = (-400.0, 400.0);

pub const AD_SDI_CODE: &str = "EPSG:4326";

pub const AD_SDI_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Shared instance of the AD-SDI coordinate system.
pub static AD_SDI: Lazy<Crs> = Lazy::new(Crs::ad_sdi);

/// A coordinate reference system with a per-zoom resolution table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    /// EPSG code, e.g. `EPSG:4326`
    pub code: String,
    /// proj4 definition string
    pub proj4def: String,
    /// Projected coordinate of pixel (0, 0)
    pub origin: Point,
    /// Map units per pixel, indexed by zoom level
    pub resolutions: Vec<f64>,
}

impl Crs {
    pub fn new(
        code: impl Into<String>,
        proj4def: impl Into<String>,
        origin: Point,
        resolutions: Vec<f64>,
    ) -> Self {
        Self {
            code: code.into(),
            proj4def: proj4def.into(),
            origin,
            resolutions,
        }
    }

    /// The coordinate system of the Abu Dhabi spatial data infrastructure.
    pub fn ad_sdi() -> Self {
        Self::new(
            AD_SDI_CODE,
            AD_SDI_PROJ4,
            Point::new(AD_SDI_ORIGIN.0, AD_SDI_ORIGIN.1),
            AD_SDI_RESOLUTIONS.to_vec(),
        )
    }

    pub fn min_zoom(&self) -> f64 {
        0.0
    }

    pub fn max_zoom(&self) -> f64 {
        self.resolutions.len().saturating_sub(1) as f64
    }

    /// Pixels per map unit at `zoom`.
    ///
    /// Integer zooms read the table directly; fractional zooms interpolate
    /// linearly between the two neighbouring scales. Zooms outside the table
    /// are clamped to it.
    pub fn scale(&self, zoom: f64) -> f64 {
        if self.resolutions.is_empty() {
            return 1.0;
        }

        let zoom = zoom.clamp(self.min_zoom(), self.max_zoom());
        let base = zoom.floor();
        let index = base as usize;
        let base_scale = 1.0 / self.resolutions[index];

        if zoom == base || index + 1 >= self.resolutions.len() {
            return base_scale;
        }

        let next_scale = 1.0 / self.resolutions[index + 1];
        base_scale + (next_scale - base_scale) * (zoom - base)
    }

    /// Projects a geographic coordinate to absolute pixel coordinates.
    ///
    /// The proj4 definition is plain longlat, so the projected coordinate is
    /// the coordinate itself; only the grid transformation applies.
    pub fn project(&self, lat_lng: &LatLng, zoom: f64) -> Point {
        let scale = self.scale(zoom);
        Point::new(
            (lat_lng.lng - self.origin.x) * scale,
            (self.origin.y - lat_lng.lat) * scale,
        )
    }

    /// Inverse of [`Crs::project`].
    pub fn unproject(&self, point: &Point, zoom: f64) -> LatLng {
        let scale = self.scale(zoom);
        LatLng::new(self.origin.y - point.y / scale, point.x / scale + self.origin.x)
    }

    /// Tile containing `lat_lng` at an integer zoom level.
    ///
    /// Returns `None` above the deepest zoom of the table or when the
    /// coordinate lies left of / above the grid origin.
    pub fn tile_for(&self, lat_lng: &LatLng, zoom: u8) -> Option<TileCoord> {
        if zoom as f64 > self.max_zoom() {
            return None;
        }

        let tile = self
            .project(lat_lng, zoom as f64)
            .multiply(1.0 / TILE_SIZE as f64)
            .floor();
        if tile.x < 0.0 || tile.y < 0.0 {
            return None;
        }

        Some(TileCoord::new(tile.x as u32, tile.y as u32, zoom))
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::ad_sdi()
    }
}
