//! Wayfarer data model.
//!
//! Plain data types exchanged between the sync core and the presentation
//! layer. Everything here is serde-serializable so it can round-trip through
//! the key-value store without loss.
//!
//! # Types
//!
//! - [`Hotspot`] - a remotely defined point of interest
//! - [`Coordinates`] / [`Position`] - a latitude/longitude pair
//! - [`DisplayPreference`] - light or dark appearance
//! - [`MapRegion`] - initial map viewport

mod coordinates;
mod hotspot;
mod preference;
mod region;

pub use coordinates::{Coordinates, Position};
pub use hotspot::Hotspot;
pub use preference::{DisplayPreference, ParsePreferenceError};
pub use region::MapRegion;
