use geo::{Coord, Distance, Euclidean, Point};
use hashbrown::HashMap;
use log::{info, trace, warn};
use petgraph::graph::{NodeIndex, UnGraph};

use super::components::{largest_component, retain_nodes};
use super::config::NetworkConfig;
use crate::{
    Error, LineFeature, Projector,
    model::{BuildStats, NetworkEdge, NetworkNode, NodeKey, NodeKind, RoutingGraph},
};

/// Builds the routing graph for one alpha from line features.
///
/// Every consecutive coordinate pair of a feature becomes an edge; a pair
/// that recurs overwrites the earlier edge. The result is pruned to its
/// largest connected component.
///
/// # Errors
///
/// - [`Error::InvalidConfiguration`] if `config` does not validate
/// - [`Error::EmptyInput`] if no feature has at least two coordinates
/// - [`Error::InvalidData`] / [`Error::Projection`] for unusable coordinates
/// - [`Error::DegenerateGraph`] if fewer than two nodes remain
pub fn build_graph(
    features: &[LineFeature],
    config: &NetworkConfig,
) -> Result<RoutingGraph, Error> {
    config.validate()?;

    let (usable, skipped): (Vec<&LineFeature>, Vec<&LineFeature>) = features
        .iter()
        .partition(|feature| feature.coordinates.len() >= 2);

    if !skipped.is_empty() {
        warn!(
            "Skipping {} line feature(s) with fewer than two coordinates",
            skipped.len()
        );
    }
    if usable.is_empty() {
        return Err(Error::EmptyInput);
    }

    let projector = config
        .projection
        .resolve(usable.iter().flat_map(|feature| feature.coordinates.iter()))?;
    info!(
        "Building network from {} line features (alpha = {}, projection = {projector:?})",
        usable.len(),
        config.alpha
    );

    let mut builder = RawNetwork::new(projector);
    for feature in &usable {
        builder.add_feature(feature, config)?;
    }

    let raw = builder.graph;
    let (keep, components) = largest_component(&raw);
    let graph = retain_nodes(&raw, &keep);

    let stats = BuildStats {
        skipped_features: skipped.len(),
        raw_nodes: raw.node_count(),
        raw_edges: raw.edge_count(),
        components,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    };

    if stats.nodes < 2 {
        return Err(Error::DegenerateGraph { nodes: stats.nodes });
    }

    info!(
        "Kept largest of {} component(s): {} nodes, {} edges (pruned {} nodes, {} edges)",
        stats.components,
        stats.nodes,
        stats.edges,
        stats.pruned_nodes(),
        stats.pruned_edges()
    );
    #[allow(clippy::cast_precision_loss)]
    let pruned_share = stats.pruned_nodes() as f64 / stats.raw_nodes as f64;
    if pruned_share > 0.25 {
        warn!(
            "{} of {} nodes lie outside the largest component and were discarded",
            stats.pruned_nodes(),
            stats.raw_nodes
        );
    }

    Ok(RoutingGraph::new(graph, projector, config.alpha, stats))
}

/// Graph under construction, before component pruning
struct RawNetwork {
    graph: UnGraph<NetworkNode, NetworkEdge>,
    lookup: HashMap<NodeKey, NodeIndex>,
    projector: Projector,
}

impl RawNetwork {
    fn new(projector: Projector) -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            lookup: HashMap::new(),
            projector,
        }
    }

    fn node_for(&mut self, coord: Coord<f64>) -> Result<NodeIndex, Error> {
        let key = NodeKey::new(coord)?;
        if let Some(&node) = self.lookup.get(&key) {
            return Ok(node);
        }
        let projected = self.projector.project(coord)?;
        let node = self.graph.add_node(NetworkNode {
            key,
            projected,
            kind: NodeKind::Network,
        });
        self.lookup.insert(key, node);
        Ok(node)
    }

    fn add_feature(&mut self, feature: &LineFeature, config: &NetworkConfig) -> Result<(), Error> {
        let category = feature.properties.category();
        let surface = config
            .scoring
            .surface_class(feature.properties.surface.as_deref());

        for pair in feature.coordinates.windows(2) {
            let from = self.node_for(pair[0])?;
            let to = self.node_for(pair[1])?;
            if from == to {
                trace!("Skipping zero-length segment at {:?}", pair[0]);
                continue;
            }

            let raw_distance = Euclidean.distance(
                Point::from(self.graph[from].projected),
                Point::from(self.graph[to].projected),
            );
            let weight = config
                .scoring
                .edge_weight(raw_distance, category, surface, config.alpha);

            self.graph.update_edge(
                from,
                to,
                NetworkEdge {
                    raw_distance,
                    category,
                    surface,
                    weight,
                },
            );
        }
        Ok(())
    }
}
