//! Extract ingestion: streaming parse, way segmentation, graph assembly
//!
//! The phases run strictly in order. Segmentation needs the fully populated
//! registry (a node's use count and coordinates may come from anywhere in
//! the stream), so no phase may overlap its predecessor.

mod accumulator;
mod config;
mod parser;
mod segmenter;

pub use config::GraphConfig;

use std::io::BufRead;

use log::info;
use rayon::prelude::*;

use accumulator::BuildSession;
use segmenter::segment_way;

use crate::error::Error;
use crate::model::RoadGraph;

/// Runs the full pipeline over an extract stream and returns the finalized
/// graph.
///
/// # Errors
///
/// Fails when the stream is not well-formed OSM XML. Per-element data errors
/// (missing attributes, dangling references, duplicate ways) are tolerated
/// and surface only as omissions from the result.
pub fn build_from_stream<R: BufRead>(reader: R, config: &GraphConfig) -> Result<RoadGraph, Error> {
    let mut session = BuildSession::default();
    parser::parse_extract(reader, config, &mut session)?;
    info!(
        "parsed extract: {} referenced nodes, {} admissible ways",
        session.registry.len(),
        session.ways.len()
    );

    let mut graph = RoadGraph::new();
    // Segmentation is independent per way; emission into the assembler
    // stays serialized so that first-edge-wins deduplication follows
    // document order.
    let segments: Vec<_> = session
        .ways
        .par_iter()
        .map(|way| (segment_way(way, &session.registry), way.one_way))
        .collect();
    for (requests, one_way) in segments {
        for request in requests {
            graph.add_edge(request.src, request.dst, request.distance, one_way);
        }
    }

    graph.prune_isolated_nodes();
    let retained: Vec<_> = graph.node_ids().collect();
    for id in retained {
        if let Some(geometry) = session.registry.get(id).and_then(|node| node.geometry) {
            graph.record_position(id, geometry);
        }
    }
    graph.finalize_ordering(config.ordering);

    info!(
        "road graph ready: {} nodes, {} directed edges",
        graph.count_nodes(),
        graph.count_edges()
    );
    Ok(graph)
}
