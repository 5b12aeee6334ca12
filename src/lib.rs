//! Road graphs for motorized routing, built from OpenStreetMap extracts.
//!
//! `waygraph` ties the extract acquisition layer ([`waygraph_fetch`]) to the
//! core transformation pipeline ([`waygraph_core`]): download or reuse a
//! cached region extract, stream-parse it, and hand back the finalized
//! adjacency-list graph. Callers that already own an extract stream can go
//! through [`build_from_stream`] directly.

use std::path::PathBuf;

use log::info;
use thiserror::Error;

pub use waygraph_core::{
    Edge, GeoPoint, GraphConfig, NeighborOrdering, NodeId, RoadGraph, Way, WayId,
    build_from_stream,
};
pub use waygraph_core::Error as BuildError;
pub use waygraph_fetch::Error as FetchError;
pub use waygraph_fetch::Extract;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Region selection and cache behavior for [`road_graph_for_region`].
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// Geofabrik continent, e.g. `"Europe"`
    pub continent: String,
    /// Geofabrik country, e.g. `"Andorra"`
    pub country: String,
    /// Directory holding cached extracts
    pub cache_dir: PathBuf,
    /// Discard cached extracts and refetch
    pub refresh: bool,
}

impl RegionConfig {
    pub fn new(continent: &str, country: &str) -> Self {
        Self {
            continent: continent.to_string(),
            country: country.to_string(),
            cache_dir: PathBuf::from("."),
            refresh: false,
        }
    }
}

/// Builds the road graph for a region, reusing cached extracts unless
/// `refresh` is set.
///
/// # Errors
///
/// Fails when the extract cannot be acquired, or when its content is not
/// well-formed OSM XML.
pub fn road_graph_for_region(config: &RegionConfig) -> Result<RoadGraph, Error> {
    let extract = Extract::new(&config.continent, &config.country, &config.cache_dir);
    if config.refresh {
        extract.invalidate_cache()?;
    }

    info!(
        "building road graph for {}/{}",
        config.continent, config.country
    );
    let stream = extract.acquire()?;
    let graph = build_from_stream(stream, &GraphConfig::default())?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_exposes_the_build_pipeline() {
        let xml = r#"<osm>
            <node id="1" lat="46.0" lon="11.0"/>
            <node id="2" lat="46.001" lon="11.0"/>
            <way id="5"><nd ref="1"/><nd ref="2"/><tag k="highway" v="primary"/></way>
        </osm>"#;
        let graph = build_from_stream(xml.as_bytes(), &GraphConfig::default()).unwrap();
        assert_eq!(graph.count_nodes(), 2);
        assert_eq!(graph.count_edges(), 2);
    }

    #[test]
    fn region_config_defaults_to_cached_use() {
        let config = RegionConfig::new("Europe", "Andorra");
        assert!(!config.refresh);
        assert_eq!(config.cache_dir, PathBuf::from("."));
    }
}
