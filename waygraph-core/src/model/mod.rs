//! Data model of the road network

pub mod graph;
pub mod node;
pub mod way;

pub use graph::{Edge, NeighborOrdering, RoadGraph};
pub use node::{GeoPoint, NodeInfo};
pub use way::Way;
