//! Node records used while ingesting an extract

use geo::Point;

use crate::NodeId;

/// Geographic coordinate of a map node (x = longitude, y = latitude, degrees).
///
/// Stored single-precision, matching the precision delivered by the extract
/// format.
pub type GeoPoint = Point<f32>;

/// Registry entry for a node referenced somewhere in the extract.
///
/// `node` elements and the `way` elements referencing them may appear in any
/// order, so the coordinates stay unset until the defining element has been
/// parsed. A node whose coordinates never arrive is a data error and is
/// excluded wherever distances are computed.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub id: NodeId,
    pub geometry: Option<GeoPoint>,
    /// Number of references from admissible ways. A count above one marks an
    /// intersection.
    pub use_count: u32,
}

impl NodeInfo {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            geometry: None,
            use_count: 0,
        }
    }
}
