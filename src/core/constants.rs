//! Engine-wide constants and the facade defaults.
//! Keeping them in a single place makes it easier to tweak magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom level used by `init` when the caller does not pass one.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Decimal digits kept by `round` when the caller does not pass a precision.
pub const DEFAULT_PRECISION: u32 = 6;

/// Map viewport size assumed until the host reports a resize.
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (800.0, 600.0);

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);

/// Diagnostic emitted whenever a facade operation runs before `init`.
pub const NOT_INITIALIZED_MSG: &str = "Map is not initialized";
