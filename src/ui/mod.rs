pub mod controls;

pub use controls::{ControlManager, ControlPosition, LayerSwitcher};
