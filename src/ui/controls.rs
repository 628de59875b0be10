use crate::{
    layers::{base::LayerTrait, tile::TileLayer},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Corner of the map container a control is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Layer switcher: lets the user pick one base layer and toggle overlays.
///
/// Entries are kept in insertion order, which is also the display order.
#[derive(Debug, Clone)]
pub struct LayerSwitcher {
    base_layers: Vec<(String, TileLayer)>,
    overlays: Vec<(String, TileLayer)>,
    collapsed: bool,
    position: ControlPosition,
}

impl LayerSwitcher {
    pub fn new() -> Self {
        Self {
            base_layers: Vec::new(),
            overlays: Vec::new(),
            collapsed: true,
            position: ControlPosition::TopRight,
        }
    }

    pub fn with_base_layer(mut self, label: impl Into<String>, layer: TileLayer) -> Self {
        self.base_layers.push((label.into(), layer));
        self
    }

    pub fn with_overlay(mut self, label: impl Into<String>, layer: TileLayer) -> Self {
        self.overlays.push((label.into(), layer));
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }

    pub fn base_layer_labels(&self) -> Vec<&str> {
        self.base_layers.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn overlay_labels(&self) -> Vec<&str> {
        self.overlays.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Base layer offered under `label`
    pub fn base_layer(&self, label: &str) -> Result<&TileLayer> {
        self.base_layers
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, layer)| layer)
            .ok_or_else(|| MapError::Control(format!("no base layer labelled '{}'", label)))
    }

    /// Whether `layer_id` is one of the offered base layers
    pub fn offers_base_layer(&self, layer_id: &str) -> bool {
        self.base_layers.iter().any(|(_, layer)| layer.id() == layer_id)
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn expand(&mut self) {
        self.collapsed = false;
    }

    pub fn collapse(&mut self) {
        self.collapsed = true;
    }

    pub fn position(&self) -> ControlPosition {
        self.position
    }
}

impl Default for LayerSwitcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Control manager that holds the map's controls
#[derive(Debug, Clone, Default)]
pub struct ControlManager {
    zoom_control: bool,
    attribution_control: bool,
    layer_switcher: Option<LayerSwitcher>,
}

impl ControlManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zoom control
    pub fn with_zoom_control(mut self, enabled: bool) -> Self {
        self.zoom_control = enabled;
        self
    }

    /// Add the attribution control
    pub fn with_attribution_control(mut self, enabled: bool) -> Self {
        self.attribution_control = enabled;
        self
    }

    /// Installs the layer switcher, replacing any previous one
    pub fn set_layer_switcher(&mut self, switcher: LayerSwitcher) {
        self.layer_switcher = Some(switcher);
    }

    pub fn layer_switcher(&self) -> Option<&LayerSwitcher> {
        self.layer_switcher.as_ref()
    }

    pub fn layer_switcher_mut(&mut self) -> Option<&mut LayerSwitcher> {
        self.layer_switcher.as_mut()
    }

    pub fn has_zoom_control(&self) -> bool {
        self.zoom_control
    }

    pub fn has_attribution_control(&self) -> bool {
        self.attribution_control
    }

    /// Check if any control is visible
    pub fn has_visible_controls(&self) -> bool {
        self.zoom_control || self.attribution_control || self.layer_switcher.is_some()
    }
}
