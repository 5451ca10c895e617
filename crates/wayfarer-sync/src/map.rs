//! What the map screen shows: a starting region and the hotspot pins.

use wayfarer_models::{Hotspot, MapRegion};

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub region: MapRegion,
    pub hotspots: Vec<Hotspot>,
    /// Set when the map was opened for a single hotspot.
    pub focus: Option<String>,
}

impl MapScene {
    /// Every catalog hotspot over the city overview.
    pub fn overview(catalog: &[Hotspot]) -> Self {
        Self {
            region: MapRegion::overview(),
            hotspots: catalog.to_vec(),
            focus: None,
        }
    }

    /// Only `hotspot`, zoomed in on it.
    pub fn focused(hotspot: &Hotspot) -> Self {
        Self {
            region: MapRegion::around(hotspot.coordinates),
            hotspots: vec![hotspot.clone()],
            focus: Some(hotspot.id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_models::Coordinates;

    #[test]
    fn overview_shows_everything() {
        let catalog = vec![
            Hotspot::new("1", "Fountain", "", Coordinates::new(51.92, 4.48)),
            Hotspot::new("2", "Mill", "", Coordinates::new(51.93, 4.47)),
        ];
        let scene = MapScene::overview(&catalog);
        assert_eq!(scene.region, MapRegion::overview());
        assert_eq!(scene.hotspots.len(), 2);
        assert!(scene.focus.is_none());
    }

    #[test]
    fn focused_centers_on_hotspot() {
        let mill = Hotspot::new("2", "Mill", "", Coordinates::new(51.93, 4.47));
        let scene = MapScene::focused(&mill);
        assert_eq!(scene.region.center(), mill.coordinates);
        assert_eq!(scene.region.latitude_delta, MapRegion::FOCUS_DELTA);
        assert_eq!(scene.hotspots, vec![mill]);
        assert_eq!(scene.focus.as_deref(), Some("2"));
    }
}
