use crate::core::{
    crs::Crs,
    geo::{LatLng, LatLngBounds, Point},
};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Coordinate system used for every pixel conversion
    crs: Crs,
}

impl Viewport {
    /// Creates a viewport whose zoom limits are the span of the CRS table.
    pub fn new(center: LatLng, zoom: f64, size: Point, crs: Crs) -> Self {
        let min_zoom = crs.min_zoom();
        let max_zoom = crs.max_zoom();
        Self {
            center,
            zoom: zoom.clamp(min_zoom, max_zoom),
            size,
            min_zoom,
            max_zoom,
            crs,
        }
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom, clamped to the current limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Narrows the zoom range to the part that fits the CRS table.
    ///
    /// `min_zoom` is pulled into the table first; a `max_zoom` below it
    /// collapses the range onto `min_zoom`. NaN limits keep the table's.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (table_min, table_max) = (self.crs.min_zoom(), self.crs.max_zoom());
        self.min_zoom = min_zoom.max(table_min).min(table_max);
        self.max_zoom = max_zoom.min(table_max).max(self.min_zoom);
        self.set_zoom(self.zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Projects to absolute pixel coordinates at `zoom` (current zoom if `None`)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        self.crs.project(lat_lng, zoom.unwrap_or(self.zoom))
    }

    pub fn unproject(&self, point: &Point, zoom: Option<f64>) -> LatLng {
        self.crs.unproject(point, zoom.unwrap_or(self.zoom))
    }

    /// Absolute pixel position of the container's top-left corner
    fn pixel_origin(&self) -> Point {
        let half = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        self.project(&self.center, None).subtract(&half)
    }

    /// Converts a container pixel (top-left is `0, 0`) to a coordinate.
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        self.unproject(&pixel.add(&self.pixel_origin()), None)
    }

    /// Converts a coordinate to a container pixel.
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        self.project(lat_lng, None).subtract(&self.pixel_origin())
    }

    /// Geographic bounds currently covered by the container
    pub fn bounds(&self) -> LatLngBounds {
        let top_left = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let bottom_right = self.pixel_to_lat_lng(&self.size);
        LatLngBounds::new(
            LatLng::new(bottom_right.lat, top_left.lng),
            LatLng::new(top_left.lat, bottom_right.lng),
        )
    }
}
