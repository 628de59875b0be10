//! The sign-database facade: data holders, predefined base layers,
//! placeholder lookups and [`SignDbMap`] itself.

pub mod backend;
pub mod facade;
pub mod layers;
pub mod lookup;
pub mod model;

pub use facade::{round, MarkerHandle, SignDbMap, SignDbMapBuilder};
