use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Id carried by districts and streets that were not resolved
pub const UNSET_ID: i64 = -1;

/// A point to show on the map as a marker.
///
/// `x` is the longitude and `y` the latitude. Points are immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
    popup_message: Option<String>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            popup_message: None,
        }
    }

    /// A point whose marker opens `message` when clicked
    pub fn with_popup(x: f64, y: f64, message: impl Into<String>) -> Self {
        Self {
            x,
            y,
            popup_message: Some(message.into()),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn popup_message(&self) -> Option<&str> {
        self.popup_message.as_deref()
    }

    /// Latitude-first coordinate for the map engine
    pub fn lat_lng(&self) -> LatLng {
        LatLng::from_xy(self.x, self.y)
    }
}

/// Information about a single district
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct District {
    pub id: i64,
    pub abbreviation: String,
    /// District name in Latin alphabet
    pub name_latin: String,
    /// District name in Arabic alphabet
    pub name_arabic: String,
}

impl District {
    pub fn new(
        id: i64,
        abbreviation: impl Into<String>,
        name_latin: impl Into<String>,
        name_arabic: impl Into<String>,
    ) -> Self {
        Self {
            id,
            abbreviation: abbreviation.into(),
            name_latin: name_latin.into(),
            name_arabic: name_arabic.into(),
        }
    }

    /// Whether this is a placeholder rather than a resolved district
    pub fn is_unset(&self) -> bool {
        self.id == UNSET_ID
    }
}

impl Default for District {
    fn default() -> Self {
        Self::new(UNSET_ID, "n/a", "District name", "District name Arabic")
    }
}

/// Information about a single street
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Street {
    pub id: i64,
    pub name_latin: String,
    pub name_arabic: String,
}

impl Street {
    pub fn new(id: i64, name_latin: impl Into<String>, name_arabic: impl Into<String>) -> Self {
        Self {
            id,
            name_latin: name_latin.into(),
            name_arabic: name_arabic.into(),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.id == UNSET_ID
    }
}

impl Default for Street {
    fn default() -> Self {
        Self::new(UNSET_ID, "Latin street name", "Arabic street name")
    }
}
