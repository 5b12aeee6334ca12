//! Final adjacency-list graph and its mutation operations

use hashbrown::HashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::NodeId;
use crate::model::GeoPoint;

/// Neighbor entry in an adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub target: NodeId,
    /// Cumulative great-circle distance of the segment, in kilometers
    pub distance: f64,
}

/// Strategy applied to every neighbor list when the graph is finalized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborOrdering {
    /// Ascending edge distance; ties keep insertion order
    #[default]
    Distance,
    /// Leave insertion order untouched
    Insertion,
}

/// Weighted directed road graph, stored as adjacency lists.
///
/// Vertices are nodes with at least one outgoing edge (plus any standalone
/// nodes added programmatically until [`RoadGraph::prune_isolated_nodes`]
/// runs). Coordinates of vertices are kept alongside the adjacency so the
/// artifact is self-contained once the ingestion state is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadGraph {
    adjacency: HashMap<NodeId, Vec<Edge>>,
    positions: HashMap<NodeId, GeoPoint>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directed edge `src -> dst`; unless `one_way`, the reverse edge
    /// is added with the same distance.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, distance: f64, one_way: bool) {
        self.add_directed_edge(src, dst, distance);
        if !one_way {
            self.add_directed_edge(dst, src, distance);
        }
    }

    /// The first inserted edge towards a target wins; later duplicates are
    /// dropped without updating the stored distance.
    fn add_directed_edge(&mut self, src: NodeId, dst: NodeId, distance: f64) {
        let neighbors = self.adjacency.entry(src).or_default();
        if neighbors.iter().all(|edge| edge.target != dst) {
            neighbors.push(Edge {
                target: dst,
                distance,
            });
        }
    }

    /// Adds an isolated node; no-op when the identifier is already present.
    pub fn add_standalone_node(&mut self, id: NodeId, lat: f32, lon: f32) {
        if self.adjacency.contains_key(&id) {
            return;
        }
        self.adjacency.insert(id, Vec::new());
        self.positions.insert(id, GeoPoint::new(lon, lat));
    }

    /// Removes every entry whose neighbor list is empty. Each emptiness
    /// check is independent, so the sweep runs in parallel and the removals
    /// are applied as a batch.
    pub fn prune_isolated_nodes(&mut self) {
        let isolated: Vec<NodeId> = self
            .adjacency
            .par_iter()
            .filter(|(_, neighbors)| neighbors.is_empty())
            .map(|(id, _)| *id)
            .collect();
        for id in isolated {
            self.adjacency.remove(&id);
            self.positions.remove(&id);
        }
    }

    /// Rewrites every neighbor list according to the ordering strategy.
    pub fn finalize_ordering(&mut self, ordering: NeighborOrdering) {
        match ordering {
            NeighborOrdering::Distance => {
                for neighbors in self.adjacency.values_mut() {
                    neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
                }
            }
            NeighborOrdering::Insertion => {}
        }
    }

    pub fn count_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Each direction of a bidirectional edge counts separately.
    pub fn count_edges(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Neighbor entries of `id`; empty when the node is unknown.
    pub fn neighbors_of(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Coordinate of a vertex, when known.
    pub fn position(&self, id: NodeId) -> Option<GeoPoint> {
        self.positions.get(&id).copied()
    }

    /// Iterator over every vertex carrying an adjacency entry.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub(crate) fn record_position(&mut self, id: NodeId, point: GeoPoint) {
        self.positions.insert(id, point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_directions_separately() {
        let mut graph = RoadGraph::new();
        for id in 0..4 {
            graph.add_standalone_node(id, 0.0, 0.0);
        }
        graph.add_edge(0, 1, 10.0, false);
        assert_eq!(graph.count_nodes(), 4);
        assert_eq!(graph.count_edges(), 2);

        graph.add_edge(0, 2, 10.0, false);
        graph.add_edge(1, 3, 10.0, false);
        // Both directions already exist, nothing may be double counted
        graph.add_edge(3, 1, 10.0, false);
        assert_eq!(graph.count_nodes(), 4);
        assert_eq!(graph.count_edges(), 6);
    }

    #[test]
    fn readding_standalone_nodes_is_a_noop() {
        let mut graph = RoadGraph::new();
        for id in 0..4 {
            graph.add_standalone_node(id, 0.0, 0.0);
        }
        graph.add_edge(0, 1, 10.0, false);
        graph.add_standalone_node(0, 0.0, 0.0);
        graph.add_standalone_node(3, 0.0, 0.0);
        assert_eq!(graph.count_nodes(), 4);
        assert_eq!(graph.count_edges(), 2);
    }

    #[test]
    fn first_inserted_distance_wins() {
        let mut graph = RoadGraph::new();
        graph.add_edge(1, 2, 5.0, true);
        graph.add_edge(1, 2, 9.0, true);
        assert_eq!(graph.neighbors_of(1).len(), 1);
        assert_eq!(graph.neighbors_of(1)[0].distance, 5.0);
    }

    #[test]
    fn one_way_adds_no_reverse() {
        let mut graph = RoadGraph::new();
        graph.add_edge(1, 2, 5.0, true);
        assert_eq!(graph.count_edges(), 1);
        assert!(graph.neighbors_of(2).is_empty());
    }

    #[test]
    fn prune_removes_only_isolated_nodes() {
        let mut graph = RoadGraph::new();
        graph.add_standalone_node(7, 46.0, 11.0);
        graph.add_edge(1, 2, 5.0, false);
        graph.prune_isolated_nodes();
        assert_eq!(graph.count_nodes(), 2);
        assert!(graph.position(7).is_none());
        assert_eq!(graph.neighbors_of(1).len(), 1);
    }

    #[test]
    fn ordering_sorts_ascending_by_distance() {
        let mut graph = RoadGraph::new();
        graph.add_edge(1, 2, 9.0, true);
        graph.add_edge(1, 3, 4.0, true);
        graph.add_edge(1, 4, 6.5, true);
        graph.finalize_ordering(NeighborOrdering::Distance);
        let targets: Vec<NodeId> = graph.neighbors_of(1).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![3, 4, 2]);
    }

    #[test]
    fn ordering_keeps_insertion_order_on_ties() {
        let mut graph = RoadGraph::new();
        graph.add_edge(1, 2, 5.0, true);
        graph.add_edge(1, 3, 5.0, true);
        graph.add_edge(1, 4, 1.0, true);
        graph.finalize_ordering(NeighborOrdering::Distance);
        let targets: Vec<NodeId> = graph.neighbors_of(1).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![4, 2, 3]);
    }

    #[test]
    fn insertion_strategy_leaves_lists_untouched() {
        let mut graph = RoadGraph::new();
        graph.add_edge(1, 2, 9.0, true);
        graph.add_edge(1, 3, 4.0, true);
        graph.finalize_ordering(NeighborOrdering::Insertion);
        let targets: Vec<NodeId> = graph.neighbors_of(1).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![2, 3]);
    }

    #[test]
    fn survives_serde_round_trip() {
        let mut graph = RoadGraph::new();
        graph.add_standalone_node(9, 46.5, 11.3);
        graph.add_edge(1, 2, 5.0, false);
        let json = serde_json::to_string(&graph).unwrap();
        let restored: RoadGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.count_nodes(), 3);
        assert_eq!(restored.count_edges(), 2);
        assert_eq!(restored.position(9), graph.position(9));
    }
}
