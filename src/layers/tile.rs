use crate::{
    core::{
        constants::TILE_SIZE,
        geo::{Point, TileCoord},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    tiles::source::{TileSource, UrlTemplateSource},
};

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "http://host/tile/{z}/{y}/{x}")
    pub url_template: String,
    /// Attribution text
    pub attribution: String,
    /// Tile size in pixels
    pub tile_size: u32,
    /// Maximum zoom level for this tile source
    pub max_zoom: u8,
    /// Minimum zoom level for this tile source
    pub min_zoom: u8,
    /// Keep requesting tiles outside the CRS world bounds
    pub continuous_world: bool,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: String::new(),
            attribution: String::new(),
            tile_size: TILE_SIZE,
            max_zoom: 18,
            min_zoom: 0,
            continuous_world: false,
        }
    }
}

/// A tile-based layer that displays map tiles from a tile server
#[derive(Debug, Clone)]
pub struct TileLayer {
    /// Base layer properties
    properties: LayerProperties,
    /// Tile layer specific options
    options: TileLayerOptions,
    /// Expands the URL template
    source: UrlTemplateSource,
}

impl TileLayer {
    pub fn new(id: String, name: String, url_template: String) -> Self {
        let options = TileLayerOptions {
            url_template,
            ..Default::default()
        };
        Self::with_options(id, name, options)
    }

    /// A `max_zoom` below `min_zoom` is raised to `min_zoom`.
    pub fn with_options(id: String, name: String, mut options: TileLayerOptions) -> Self {
        options.max_zoom = options.max_zoom.max(options.min_zoom);
        let properties = LayerProperties::new(id, name, LayerType::Tile);
        let source = UrlTemplateSource::new(options.url_template.clone());
        Self {
            properties,
            options,
            source,
        }
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    pub fn url_template(&self) -> &str {
        &self.options.url_template
    }

    pub fn attribution(&self) -> &str {
        &self.options.attribution
    }

    /// URL of a tile, or `None` when its zoom is outside the layer's range
    pub fn tile_url(&self, coord: TileCoord) -> Option<String> {
        if coord.z < self.options.min_zoom || coord.z > self.options.max_zoom {
            return None;
        }
        Some(self.source.url(coord))
    }

    /// Tiles needed to cover the viewport, row by row.
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<TileCoord> {
        let zoom = (viewport.zoom.floor() as u8).clamp(self.options.min_zoom, self.options.max_zoom);
        let tile_size = self.options.tile_size as f64;

        let center = viewport.project(&viewport.center, Some(zoom as f64));
        let half = Point::new(viewport.size.x / 2.0, viewport.size.y / 2.0);
        let min = center.subtract(&half).multiply(1.0 / tile_size).floor();
        let max = center.add(&half).multiply(1.0 / tile_size).floor();

        let mut tiles = Vec::new();
        for y in (min.y.max(0.0) as u32)..=(max.y.max(0.0) as u32) {
            for x in (min.x.max(0.0) as u32)..=(max.x.max(0.0) as u32) {
                tiles.push(TileCoord::new(x, y, zoom));
            }
        }
        tiles
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(&self.options).unwrap_or(serde_json::Value::Null)
    }
}
