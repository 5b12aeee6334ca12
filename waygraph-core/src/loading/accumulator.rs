//! Transient working state of one build: node registry and retained ways

use hashbrown::{HashMap, HashSet};

use crate::model::{GeoPoint, NodeInfo, Way};
use crate::{NodeId, WayId};

/// Collects coordinates and admissible-way use counts for every referenced
/// node. References and defining `node` elements may arrive in any order.
#[derive(Debug, Default)]
pub(crate) struct NodeRegistry {
    nodes: HashMap<NodeId, NodeInfo>,
}

impl NodeRegistry {
    /// Returns the entry for `id`, creating it with unset coordinates when
    /// absent. Increments the use counter when requested.
    pub(crate) fn register(&mut self, id: NodeId, increment_use: bool) -> &mut NodeInfo {
        let node = self.nodes.entry(id).or_insert_with(|| NodeInfo::new(id));
        if increment_use {
            node.use_count += 1;
        }
        node
    }

    /// Registers `id` if absent and sets its coordinates. The use counter is
    /// left untouched.
    pub(crate) fn set_coordinates(&mut self, id: NodeId, lat: f32, lon: f32) {
        self.register(id, false).geometry = Some(GeoPoint::new(lon, lat));
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&NodeInfo> {
        self.nodes.get(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Accumulator owned by a single build invocation and discarded with it.
#[derive(Debug, Default)]
pub(crate) struct BuildSession {
    pub(crate) registry: NodeRegistry,
    pub(crate) ways: Vec<Way>,
    retained_ids: HashSet<WayId>,
}

impl BuildSession {
    pub(crate) fn is_retained(&self, id: WayId) -> bool {
        self.retained_ids.contains(&id)
    }

    /// Retains a fully read admissible way, registering every node reference
    /// (repeats included) with one use-count increment each.
    pub(crate) fn retain_way(&mut self, way: Way) {
        for &node_ref in &way.node_refs {
            self.registry.register(node_ref, true);
        }
        self.retained_ids.insert(way.id);
        self.ways.push(way);
    }
}
