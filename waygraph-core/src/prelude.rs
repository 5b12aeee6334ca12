// Re-export key components
pub use crate::distance::haversine;
pub use crate::error::Error;
pub use crate::loading::{GraphConfig, build_from_stream};
pub use crate::model::{Edge, GeoPoint, NeighborOrdering, NodeInfo, RoadGraph, Way};

// Core identifier types
pub use crate::NodeId;
pub use crate::WayId;
