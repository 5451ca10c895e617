//! Map viewport model.

use crate::Coordinates;
use serde::{Deserialize, Serialize};

/// Initial viewport of the map: a centre plus the visible span in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Centre of the overview map (Rotterdam).
    pub const OVERVIEW_CENTER: Coordinates = Coordinates {
        latitude: 51.9173,
        longitude: 4.4843,
    };

    /// Span of the overview map.
    pub const OVERVIEW_DELTA: f64 = 0.1;

    /// Span of a map focused on a single hotspot.
    pub const FOCUS_DELTA: f64 = 0.01;

    /// Region showing the whole city.
    pub fn overview() -> Self {
        Self::centered(Self::OVERVIEW_CENTER, Self::OVERVIEW_DELTA)
    }

    /// Region zoomed in on one point.
    pub fn around(center: Coordinates) -> Self {
        Self::centered(center, Self::FOCUS_DELTA)
    }

    fn centered(center: Coordinates, delta: f64) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}
