//! Build configuration

use hashbrown::HashSet;

use crate::model::NeighborOrdering;

/// `highway` classes closed to motorized traffic.
///
/// See <http://wiki.openstreetmap.org/wiki/Map_Features>.
const PROHIBITED_HIGHWAYS: [&str; 27] = [
    "pedestrian",
    "track",
    "bus_guide",
    "raceway",
    "footway",
    "bridleway",
    "steps",
    "path",
    "sidewalk",
    "cycleway",
    "proposed",
    "construction",
    "bus_stop",
    "crossing",
    "elevator",
    "emergency_access_point",
    "escape",
    "give_way",
    "mini_roundabout",
    "passing_place",
    "rest_area",
    "speed_camera",
    "street_lamp",
    "services",
    "stop",
    "traffic_signals",
    "turning_circle",
];

/// Configuration for one graph build
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// `highway` tag values rejected by the way filter
    pub prohibited_highways: HashSet<String>,
    /// Neighbor ordering applied at finalization
    pub ordering: NeighborOrdering,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            prohibited_highways: PROHIBITED_HIGHWAYS
                .iter()
                .map(|class| (*class).to_string())
                .collect(),
            ordering: NeighborOrdering::default(),
        }
    }
}

impl GraphConfig {
    /// An empty `highway` value counts as motorized, per the OSM wiki.
    pub fn is_motorized(&self, highway: &str) -> bool {
        highway.is_empty() || !self.prohibited_highways.contains(highway)
    }
}
