//! Way records accumulated during the extract pass

use crate::{NodeId, WayId};

/// An admissible way retained for segmentation.
#[derive(Debug, Clone, Default)]
pub struct Way {
    pub id: WayId,
    /// Referenced node identifiers (`nd` children) in document order.
    /// Repeated references are legal and occur in looping roads.
    pub node_refs: Vec<NodeId>,
    /// Set when the way carried `oneway=yes`
    pub one_way: bool,
}

impl Way {
    pub fn new(id: WayId) -> Self {
        Self {
            id,
            node_refs: Vec::new(),
            one_way: false,
        }
    }
}
