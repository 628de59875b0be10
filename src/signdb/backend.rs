//! The seam between the facade and the map engine.
//!
//! The facade only ever talks to a [`MapBackend`] created by a
//! [`MapFactory`]. The bundled engine implements both; hosts with their
//! own renderer, and tests, provide their own.

use crate::{
    core::{builder::MapBuilder, config::MapOptions, geo::LatLng, map::Map},
    input::MapEvent,
    layers::base::LayerTrait,
    ui::controls::LayerSwitcher,
    Result,
};

/// Click listener handed to the backend, called with the clicked coordinate
pub type ClickCallback = Box<dyn Fn(LatLng) + Send + Sync>;

/// Operations the facade needs from an initialized map
pub trait MapBackend {
    fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()>;

    fn remove_layer(&mut self, layer_id: &str) -> Result<()>;

    fn add_layer_switcher(&mut self, switcher: LayerSwitcher) -> Result<()>;

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()>;

    fn pan_to(&mut self, center: LatLng) -> Result<()>;

    /// Registers one more click listener; earlier ones stay registered
    fn on_click(&mut self, callback: ClickCallback);
}

/// Builds the map a facade owns once `init` runs
pub trait MapFactory {
    type Map: MapBackend;

    fn create(&self, container_id: &str, options: MapOptions) -> Result<Self::Map>;
}

/// Factory for the bundled engine
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreMapFactory;

impl MapFactory for CoreMapFactory {
    type Map = Map;

    fn create(&self, container_id: &str, options: MapOptions) -> Result<Map> {
        MapBuilder::new(container_id)
            .with_map_options(options)
            .build()
    }
}

impl MapBackend for Map {
    fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        Map::add_layer(self, layer)
    }

    fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        Map::remove_layer(self, layer_id)
    }

    fn add_layer_switcher(&mut self, switcher: LayerSwitcher) -> Result<()> {
        Map::add_layer_switcher(self, switcher)
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        Map::set_view(self, center, zoom)
    }

    fn pan_to(&mut self, center: LatLng) -> Result<()> {
        Map::pan_to(self, center)
    }

    fn on_click(&mut self, callback: ClickCallback) {
        self.on("click", move |event| {
            if let MapEvent::Click { lat_lng, .. } = event {
                callback(*lat_lng);
            }
        });
    }
}
