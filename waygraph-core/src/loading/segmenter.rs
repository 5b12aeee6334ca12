//! Way segmentation: turning a way's node sequence into graph edges
//!
//! A way's reference list mixes shape points (used by this way alone) with
//! genuine intersections (shared with at least one other admissible way).
//! Shape points fold into the running edge length; intersections close the
//! current edge and open the next one. Counting admissible-way usage per
//! node is the cheapest signal in the raw data that tells the two apart.

use log::trace;

use super::accumulator::NodeRegistry;
use crate::NodeId;
use crate::distance::haversine;
use crate::model::Way;

/// Directed edge request emitted towards the graph assembler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeRequest {
    pub(crate) src: NodeId,
    pub(crate) dst: NodeId,
    pub(crate) distance: f64,
}

/// Walks the way's reference list and emits one edge per segment between
/// intersection nodes. A reference without registered coordinates is a data
/// error and does not advance the walk.
pub(crate) fn segment_way(way: &Way, registry: &NodeRegistry) -> Vec<EdgeRequest> {
    let refs = &way.node_refs;
    let Some(&first) = refs.first() else {
        return Vec::new();
    };

    let mut edges = Vec::new();
    let mut anchor = first;
    let mut previous = first;
    let mut accumulated = 0.0;

    for (position, &node_ref) in refs.iter().enumerate().skip(1) {
        let Some(geometry) = registry.get(node_ref).and_then(|node| node.geometry) else {
            trace!("way {}: reference {node_ref} has no coordinates", way.id);
            continue;
        };
        if let Some(previous_geometry) = registry.get(previous).and_then(|node| node.geometry) {
            accumulated += haversine(previous_geometry, geometry);
        }

        // An interior node shared with another way always splits the way;
        // the final reference always closes the last edge.
        let use_count = registry.get(node_ref).map_or(0, |node| node.use_count);
        if use_count <= 1 && position < refs.len() - 1 {
            previous = node_ref;
            continue;
        }

        push_edge(&mut edges, anchor, node_ref, accumulated);
        anchor = node_ref;
        previous = node_ref;
        accumulated = 0.0;
    }

    // Trailing segment, still open when the walk ended on a skipped reference
    push_edge(&mut edges, anchor, previous, accumulated);
    edges
}

/// Degenerate self-loops (possible when trailing references carry no
/// coordinates) are dropped instead of reaching the assembler.
fn push_edge(edges: &mut Vec<EdgeRequest>, src: NodeId, dst: NodeId, distance: f64) {
    if src == dst {
        return;
    }
    edges.push(EdgeRequest { src, dst, distance });
}
