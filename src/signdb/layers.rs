//! Predefined AD-SDI base maps.

use crate::{
    core::config::SwitcherConfig,
    layers::tile::{TileLayer, TileLayerOptions},
    ui::controls::LayerSwitcher,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const ATTRIBUTION_SDI: &str = "Map data &copy; Abu Dhabi Municipality / Abu Dhabi SDI";
const ATTRIBUTION_AD_SDI: &str = "Map data &copy; Abu Dhabi Municipality / AD-SDI";

/// Key of a predefined base layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseLayerId {
    /// Base map with English labels
    MapEnglish,
    /// Base map with Arabic labels
    MapArabic,
    /// 50cm satellite imagery
    Satellite50cm,
}

impl BaseLayerId {
    /// Every key, in layer-switcher order
    pub const ALL: [BaseLayerId; 3] = [
        BaseLayerId::MapEnglish,
        BaseLayerId::MapArabic,
        BaseLayerId::Satellite50cm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseLayerId::MapEnglish => "MapEnglish",
            BaseLayerId::MapArabic => "MapArabic",
            BaseLayerId::Satellite50cm => "Satellite50cm",
        }
    }

    /// Entry shown in the layer switcher
    pub fn switcher_label(&self) -> &'static str {
        match self {
            BaseLayerId::MapEnglish => "English base map",
            BaseLayerId::MapArabic => "Arabic base map",
            BaseLayerId::Satellite50cm => "Satellite image",
        }
    }

    pub fn url_template(&self) -> &'static str {
        match self {
            BaseLayerId::MapEnglish => {
                "http://geoportal.abudhabi.ae/rest/services/BaseMapEnglish/MapServer/tile/{z}/{y}/{x}"
            }
            BaseLayerId::MapArabic => {
                "http://geoportal.abudhabi.ae/rest/services/BaseMapArabic/MapServer/tile/{z}/{y}/{x}"
            }
            BaseLayerId::Satellite50cm => {
                "http://geoportal.abudhabi.ae/rest/services/BaseMapSatellite50cm/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            BaseLayerId::MapEnglish | BaseLayerId::MapArabic => ATTRIBUTION_SDI,
            BaseLayerId::Satellite50cm => ATTRIBUTION_AD_SDI,
        }
    }

    /// Builds the tile layer for this key
    pub fn tile_layer(&self) -> TileLayer {
        TileLayer::with_options(
            self.as_str().to_string(),
            self.switcher_label().to_string(),
            TileLayerOptions {
                url_template: self.url_template().to_string(),
                attribution: self.attribution().to_string(),
                min_zoom: 0,
                max_zoom: 12,
                continuous_world: true,
                ..Default::default()
            },
        )
    }
}

impl fmt::Display for BaseLayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseLayerId {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        BaseLayerId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| MapError::UnknownBaseLayer(s.to_string()))
    }
}

/// The named set of base layers the facade installs.
#[derive(Debug, Clone)]
pub struct BaseLayers {
    english: TileLayer,
    arabic: TileLayer,
    satellite: TileLayer,
}

impl BaseLayers {
    pub fn predefined() -> Self {
        Self {
            english: BaseLayerId::MapEnglish.tile_layer(),
            arabic: BaseLayerId::MapArabic.tile_layer(),
            satellite: BaseLayerId::Satellite50cm.tile_layer(),
        }
    }

    pub fn get(&self, id: BaseLayerId) -> &TileLayer {
        match id {
            BaseLayerId::MapEnglish => &self.english,
            BaseLayerId::MapArabic => &self.arabic,
            BaseLayerId::Satellite50cm => &self.satellite,
        }
    }

    /// Looks a layer up by its string key, e.g. `"MapEnglish"`
    pub fn by_key(&self, key: &str) -> Result<&TileLayer> {
        Ok(self.get(key.parse()?))
    }

    pub fn keys(&self) -> Vec<&'static str> {
        BaseLayerId::ALL.iter().map(BaseLayerId::as_str).collect()
    }

    /// Layer switcher offering every base layer under its label, no overlays
    pub fn layer_switcher(&self, config: &SwitcherConfig) -> LayerSwitcher {
        BaseLayerId::ALL
            .into_iter()
            .fold(LayerSwitcher::new(), |switcher, id| {
                switcher.with_base_layer(id.switcher_label(), self.get(id).clone())
            })
            .with_collapsed(config.collapsed)
            .with_position(config.position)
    }
}

impl Default for BaseLayers {
    fn default() -> Self {
        Self::predefined()
    }
}
