//! Core transformation pipeline turning an OpenStreetMap XML extract into a
//! weighted, directed adjacency-list graph for motorized routing.
//!
//! The build is a single streaming pass over the extract that fills a node
//! registry and a way accumulator, followed by segmentation of every
//! admissible way at its intersection nodes, and a final prune and ordering
//! pass over the assembled adjacency lists. Acquiring the extract bytes and
//! persisting the finished graph are left to the caller.

pub mod distance;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;

pub use error::Error;
pub use loading::{GraphConfig, build_from_stream};
pub use model::{Edge, GeoPoint, NeighborOrdering, RoadGraph, Way};

/// OSM node identifier, globally unique per extract
pub type NodeId = i64;

/// OSM way identifier
pub type WayId = i64;
