use crate::{layers::base::LayerTrait, prelude::HashMap, MapError, Result};

/// Manages layers for the map, handling ordering and lookup
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs for drawing (sorted by z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer; ids must be unique within the map
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("layer '{}' already added", layer_id)));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        // Insert in sorted order by z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer, returning it if it was present
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    /// Lists all layer IDs in draw order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in draw order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::LatLng,
        layers::{marker::Marker, tile::TileLayer},
    };

    #[test]
    fn test_markers_sort_after_tiles() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(Marker::new("m1".to_string(), LatLng::default())))
            .unwrap();
        manager
            .add_layer(Box::new(TileLayer::new(
                "base".to_string(),
                "Base".to_string(),
                "http://tiles/{z}/{y}/{x}".to_string(),
            )))
            .unwrap();

        assert_eq!(manager.list_layers(), vec!["base".to_string(), "m1".to_string()]);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(Marker::new("m1".to_string(), LatLng::default())))
            .unwrap();
        let err = manager
            .add_layer(Box::new(Marker::new("m1".to_string(), LatLng::default())))
            .unwrap_err();
        assert!(matches!(err, MapError::Layer(_)));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_remove_layer() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(Marker::new("m1".to_string(), LatLng::default())))
            .unwrap();

        assert!(manager.remove_layer("m1").is_some());
        assert!(manager.remove_layer("m1").is_none());
        assert!(manager.is_empty());
        assert!(manager.list_layers().is_empty());
    }
}
