//! Map builder for fluent API configuration
//!
//! This module provides a MapBuilder that allows for fluent configuration
//! of engine map instances: container, CRS, interaction options and the
//! initial view.

use crate::{
    core::{
        config::MapOptions,
        crs::Crs,
        geo::{LatLng, Point},
        map::Map,
    },
    layers::base::LayerTrait,
    Result,
};

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    container_id: String,
    /// Map interaction options
    map_options: MapOptions,
    /// Initial view, applied after the layers are added
    view: Option<(LatLng, f64)>,
    layers: Vec<Box<dyn LayerTrait>>,
}

impl MapBuilder {
    /// Create a new MapBuilder bound to a host container
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            map_options: MapOptions::default(),
            view: None,
            layers: Vec::new(),
        }
    }

    /// Set map interaction options
    pub fn with_map_options(mut self, options: MapOptions) -> Self {
        self.map_options = options;
        self
    }

    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.map_options.crs = crs;
        self
    }

    /// Enable or disable dragging
    pub fn with_dragging(mut self, enabled: bool) -> Self {
        self.map_options.dragging = enabled;
        self
    }

    pub fn with_zoom_control(mut self, enabled: bool) -> Self {
        self.map_options.zoom_control = enabled;
        self
    }

    pub fn with_attribution_control(mut self, enabled: bool) -> Self {
        self.map_options.attribution_control = enabled;
        self
    }

    /// Container size in pixels
    pub fn with_size(mut self, size: Point) -> Self {
        self.map_options.size = size;
        self
    }

    /// Set zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: Option<f64>, max_zoom: Option<f64>) -> Self {
        self.map_options.min_zoom = min_zoom;
        self.map_options.max_zoom = max_zoom;
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.view = Some((center, zoom));
        self
    }

    pub fn with_layer(mut self, layer: Box<dyn LayerTrait>) -> Self {
        self.layers.push(layer);
        self
    }

    /// Build the map
    pub fn build(self) -> Result<Map> {
        let mut map = Map::new(self.container_id, self.map_options);
        for layer in self.layers {
            map.add_layer(layer)?;
        }
        if let Some((center, zoom)) = self.view {
            map.set_view(center, zoom)?;
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::tile::TileLayer;

    #[test]
    fn test_builder_defaults() {
        let map = MapBuilder::new("map").build().unwrap();
        assert_eq!(map.container_id(), "map");
        assert!(map.options().dragging);
        assert_eq!(map.options().crs, Crs::ad_sdi());
    }

    #[test]
    fn test_builder_options_and_view() {
        let map = MapBuilder::new("sign-map")
            .with_dragging(false)
            .with_attribution_control(false)
            .with_size(Point::new(640.0, 480.0))
            .with_zoom_limits(Some(2.0), Some(10.0))
            .with_layer(Box::new(TileLayer::new(
                "base".into(),
                "Base".into(),
                "http://t/{z}/{y}/{x}".into(),
            )))
            .with_center_and_zoom(LatLng::new(24.45, 54.37), 11.0)
            .build()
            .unwrap();

        assert!(!map.options().dragging);
        assert!(map.has_layer("base"));
        assert_eq!(map.size(), Point::new(640.0, 480.0));
        assert_eq!(map.viewport.center, LatLng::new(24.45, 54.37));
        assert_eq!(map.viewport.zoom, 10.0);
    }

    #[test]
    fn test_builder_zoom_limits_beyond_table() {
        let map = MapBuilder::new("map")
            .with_zoom_limits(Some(13.0), Some(20.0))
            .build()
            .unwrap();
        assert_eq!(map.viewport.min_zoom, 12.0);
        assert_eq!(map.viewport.max_zoom, 12.0);
        assert_eq!(map.viewport.zoom, 12.0);
    }

    #[test]
    fn test_builder_inverted_zoom_limits() {
        let map = MapBuilder::new("map")
            .with_zoom_limits(Some(8.0), Some(3.0))
            .with_center_and_zoom(LatLng::new(24.45, 54.37), 5.0)
            .build()
            .unwrap();
        assert_eq!(map.viewport.min_zoom, 8.0);
        assert_eq!(map.viewport.max_zoom, 8.0);
        assert_eq!(map.viewport.zoom, 8.0);
    }

    #[test]
    fn test_builder_single_zoom_limit() {
        let map = MapBuilder::new("map")
            .with_zoom_limits(Some(4.0), None)
            .build()
            .unwrap();
        assert_eq!(map.viewport.min_zoom, 4.0);
        assert_eq!(map.viewport.max_zoom, 12.0);
    }
}
