use crate::{
    core::{
        config::MapOptions,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    input::{EventManager, InputEvent, MapEvent},
    layers::{
        base::{LayerTrait, LayerType},
        manager::LayerManager,
        marker::Marker,
    },
    ui::controls::{ControlManager, LayerSwitcher},
    Result,
};

/// A headless map bound to a host container.
///
/// Holds layers, controls and the viewport, and turns host input into
/// [`MapEvent`]s. Events are queued by the mutating calls and delivered to
/// listeners by [`Map::process_events`].
pub struct Map {
    container_id: String,
    pub viewport: Viewport,
    layer_manager: LayerManager,
    controls: ControlManager,
    event_manager: EventManager,
    options: MapOptions,
}

impl Map {
    pub fn new(container_id: impl Into<String>, options: MapOptions) -> Self {
        let mut viewport = Viewport::new(
            LatLng::default(),
            options.crs.min_zoom(),
            options.size,
            options.crs.clone(),
        );
        if options.min_zoom.is_some() || options.max_zoom.is_some() {
            viewport.set_zoom_limits(
                options.min_zoom.unwrap_or(options.crs.min_zoom()),
                options.max_zoom.unwrap_or(options.crs.max_zoom()),
            );
        }

        let controls = ControlManager::new()
            .with_zoom_control(options.zoom_control)
            .with_attribution_control(options.attribution_control);

        let container_id = container_id.into();
        log::debug!("creating map in container '{}'", container_id);

        Self {
            container_id,
            viewport,
            layer_manager: LayerManager::new(),
            controls,
            event_manager: EventManager::new(),
            options,
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn controls(&self) -> &ControlManager {
        &self.controls
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        let old_center = self.viewport.center;
        let old_zoom = self.viewport.zoom;

        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);

        if self.viewport.center != old_center || self.viewport.zoom != old_zoom {
            log::info!(
                "view set to ({:.6}, {:.6}) at zoom {}",
                self.viewport.center.lat,
                self.viewport.center.lng,
                self.viewport.zoom
            );
            self.event_manager.emit(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }

        Ok(())
    }

    /// Moves the center, keeping the zoom
    pub fn pan_to(&mut self, center: LatLng) -> Result<()> {
        let zoom = self.viewport.zoom;
        self.set_view(center, zoom)
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        self.layer_manager.add_layer(layer)?;
        log::debug!("layer '{}' added", layer_id);
        self.event_manager.emit(MapEvent::LayerAdd { layer_id });
        Ok(())
    }

    /// Removes a layer; removing an absent layer does nothing
    pub fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        if self.layer_manager.remove_layer(layer_id).is_some() {
            log::debug!("layer '{}' removed", layer_id);
            self.event_manager.emit(MapEvent::LayerRemove {
                layer_id: layer_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn has_layer(&self, layer_id: &str) -> bool {
        self.layer_manager.contains(layer_id)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layer_manager.get_layer(layer_id)
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layer_manager.list_layers()
    }

    /// Markers currently on the map, in draw order
    pub fn markers(&self) -> Vec<&Marker> {
        self.layer_manager
            .layers()
            .into_iter()
            .filter_map(|layer| layer.as_any().downcast_ref::<Marker>())
            .collect()
    }

    /// Id of the tile layer currently acting as base layer.
    ///
    /// Prefers a layer offered by the layer switcher, falling back to the
    /// lowest tile layer.
    pub fn base_layer(&self) -> Option<&str> {
        let tiles: Vec<&dyn LayerTrait> = self
            .layer_manager
            .layers()
            .into_iter()
            .filter(|layer| layer.layer_type() == LayerType::Tile)
            .collect();

        let offered = self.controls.layer_switcher().and_then(|switcher| {
            tiles
                .iter()
                .copied()
                .find(|layer| switcher.offers_base_layer(layer.id()))
        });

        offered
            .or_else(|| tiles.first().copied())
            .map(|layer| layer.id())
    }

    /// Installs the layer switcher control
    pub fn add_layer_switcher(&mut self, switcher: LayerSwitcher) -> Result<()> {
        log::debug!(
            "layer switcher added with base layers {:?}",
            switcher.base_layer_labels()
        );
        self.controls.set_layer_switcher(switcher);
        Ok(())
    }

    pub fn layer_switcher(&self) -> Option<&LayerSwitcher> {
        self.controls.layer_switcher()
    }

    /// Switches the base layer to the switcher entry labelled `label`
    pub fn select_base_layer(&mut self, label: &str) -> Result<()> {
        let layer = match self.controls.layer_switcher() {
            Some(switcher) => switcher.base_layer(label)?.clone(),
            None => {
                return Err(crate::MapError::Control(
                    "no layer switcher installed".to_string(),
                ))
            }
        };

        let layer_id = layer.id().to_string();
        if self.has_layer(&layer_id) {
            return Ok(());
        }

        if let Some(current) = self.base_layer().map(str::to_string) {
            self.remove_layer(&current)?;
        }
        self.add_layer(Box::new(layer))?;
        self.event_manager
            .emit(MapEvent::BaseLayerChange { layer_id });
        Ok(())
    }

    /// Attribution line built from the visible tile layers, when the
    /// attribution control is enabled
    pub fn attribution(&self) -> Option<String> {
        if !self.controls.has_attribution_control() {
            return None;
        }

        let parts: Vec<String> = self
            .layer_manager
            .layers()
            .into_iter()
            .filter(|layer| layer.is_visible())
            .filter_map(|layer| {
                layer
                    .as_any()
                    .downcast_ref::<crate::layers::tile::TileLayer>()
                    .map(|tile| tile.attribution().to_string())
            })
            .filter(|text| !text.is_empty())
            .collect();
        Some(parts.join(" | "))
    }

    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.event_manager.listener_count(event_type)
    }

    /// Delivers every queued event to its listeners
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    /// Queues a click at a geographic coordinate, as if the user clicked there
    pub fn fire_click(&mut self, lat_lng: LatLng) {
        let pixel = self.viewport.lat_lng_to_pixel(&lat_lng);
        self.event_manager.emit(MapEvent::Click { lat_lng, pixel });
    }

    pub fn handle_input(&mut self, input: InputEvent) -> Result<()> {
        match input {
            InputEvent::Click { position, .. } => {
                let lat_lng = self.viewport.pixel_to_lat_lng(&position);
                self.event_manager.emit(MapEvent::Click {
                    lat_lng,
                    pixel: position,
                });
            }
            InputEvent::Resize { size } => {
                self.viewport.set_size(size);
            }
        }
        Ok(())
    }

    pub fn size(&self) -> Point {
        self.viewport.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{input::MouseButton, layers::tile::TileLayer};
    use std::sync::{Arc, Mutex};

    fn map() -> Map {
        Map::new("map", MapOptions::default())
    }

    fn tile(id: &str) -> TileLayer {
        TileLayer::new(id.to_string(), id.to_string(), "http://t/{z}/{y}/{x}".to_string())
    }

    #[test]
    fn test_map_creation() {
        let map = map();
        assert_eq!(map.container_id(), "map");
        assert_eq!(map.viewport.center, LatLng::default());
        assert_eq!(map.viewport.zoom, 0.0);
        assert!(map.controls().has_zoom_control());
        assert!(map.list_layers().is_empty());
    }

    #[test]
    fn test_set_view_emits_once() {
        let mut map = map();
        map.set_view(LatLng::new(24.45, 54.37), 5.0).unwrap();
        map.set_view(LatLng::new(24.45, 54.37), 5.0).unwrap();

        let events = map.process_events();
        assert_eq!(events.len(), 1);
        assert_eq!(map.viewport.zoom, 5.0);
    }

    #[test]
    fn test_pan_to_keeps_zoom() {
        let mut map = map();
        map.set_view(LatLng::new(24.45, 54.37), 7.0).unwrap();
        map.pan_to(LatLng::new(24.0, 54.0)).unwrap();
        assert_eq!(map.viewport.center, LatLng::new(24.0, 54.0));
        assert_eq!(map.viewport.zoom, 7.0);
    }

    #[test]
    fn test_layer_management() {
        let mut map = map();
        map.add_layer(Box::new(tile("base"))).unwrap();
        map.add_layer(Box::new(Marker::new("m1".into(), LatLng::new(1.0, 2.0))))
            .unwrap();

        assert!(map.has_layer("base"));
        assert_eq!(map.markers().len(), 1);
        assert_eq!(map.base_layer(), Some("base"));

        map.remove_layer("m1").unwrap();
        map.remove_layer("m1").unwrap();
        assert!(map.markers().is_empty());

        let removals = map
            .process_events()
            .into_iter()
            .filter(|e| matches!(e, MapEvent::LayerRemove { .. }))
            .count();
        assert_eq!(removals, 1);
    }

    #[test]
    fn test_select_base_layer() {
        let mut map = map();
        map.add_layer(Box::new(tile("satellite"))).unwrap();
        map.add_layer_switcher(
            LayerSwitcher::new()
                .with_base_layer("Streets", tile("streets"))
                .with_base_layer("Imagery", tile("satellite")),
        )
        .unwrap();

        map.select_base_layer("Streets").unwrap();
        assert!(map.has_layer("streets"));
        assert!(!map.has_layer("satellite"));
        assert_eq!(map.base_layer(), Some("streets"));

        let changed = map
            .process_events()
            .into_iter()
            .any(|e| e == MapEvent::BaseLayerChange { layer_id: "streets".into() });
        assert!(changed);

        assert!(map.select_base_layer("Nope").is_err());
    }

    #[test]
    fn test_select_base_layer_without_switcher() {
        let mut map = map();
        assert!(matches!(
            map.select_base_layer("Streets"),
            Err(crate::MapError::Control(_))
        ));
    }

    #[test]
    fn test_attribution() {
        let mut map = map();
        let layer = TileLayer::with_options(
            "base".into(),
            "Base".into(),
            crate::layers::tile::TileLayerOptions {
                url_template: "http://t/{z}/{y}/{x}".into(),
                attribution: "Map data".into(),
                ..Default::default()
            },
        );
        map.add_layer(Box::new(layer)).unwrap();
        assert_eq!(map.attribution(), Some("Map data".to_string()));

        let silent = Map::new(
            "map",
            MapOptions {
                attribution_control: false,
                ..MapOptions::default()
            },
        );
        assert_eq!(silent.attribution(), None);
    }

    #[test]
    fn test_click_input_reaches_listener() {
        let mut map = map();
        map.set_view(LatLng::new(24.45, 54.37), 5.0).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        map.on("click", move |event| {
            if let MapEvent::Click { lat_lng, .. } = event {
                sink.lock().unwrap().push(*lat_lng);
            }
        });
        assert_eq!(map.listener_count("click"), 1);

        let size = map.size();
        map.handle_input(InputEvent::Click {
            position: Point::new(size.x / 2.0, size.y / 2.0),
            button: MouseButton::Left,
        })
        .unwrap();
        map.process_events();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!((seen[0].lat - 24.45).abs() < 1e-9);
        assert!((seen[0].lng - 54.37).abs() < 1e-9);
    }

    #[test]
    fn test_resize_input() {
        let mut map = map();
        map.handle_input(InputEvent::Resize {
            size: Point::new(1024.0, 768.0),
        })
        .unwrap();
        assert_eq!(map.size(), Point::new(1024.0, 768.0));
    }
}
