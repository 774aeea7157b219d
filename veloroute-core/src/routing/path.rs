//! Reconstructed network paths and the single-pair / single-source entry points

use geo::{Coord, LineString};
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::{
    WeightKind,
    dijkstra::{ShortestPathTree, dijkstra_tree},
};
use crate::{EdgeCategory, Error, Meters, RoutingGraph};

/// Simple path through the network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPath {
    /// Visited nodes, source first
    pub nodes: Vec<NodeIndex>,
    /// Traversed edges; `edges[i]` joins `nodes[i]` and `nodes[i + 1]`
    pub edges: Vec<EdgeIndex>,
    /// Sum of `raw_distance` over `edges`
    pub distance: Meters,
    /// Sum of the searched weight over `edges`
    pub cost: f64,
}

impl NetworkPath {
    pub fn source(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }

    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Geographic coordinates of the visited nodes
    pub fn coordinates(&self, graph: &RoutingGraph) -> Vec<Coord<f64>> {
        self.nodes
            .iter()
            .filter_map(|&node| graph.node(node))
            .map(|node| node.key.coord())
            .collect()
    }

    pub fn line_string(&self, graph: &RoutingGraph) -> LineString<f64> {
        LineString::new(self.coordinates(graph))
    }

    /// Metres travelled per edge category, in order of first appearance
    pub fn category_breakdown(&self, graph: &RoutingGraph) -> Vec<(EdgeCategory, Meters)> {
        let mut breakdown: Vec<(EdgeCategory, Meters)> = Vec::new();
        for edge in self.edges.iter().filter_map(|&edge| graph.edge(edge)) {
            match breakdown
                .iter_mut()
                .find(|(category, _)| *category == edge.category)
            {
                Some((_, metres)) => *metres += edge.raw_distance,
                None => breakdown.push((edge.category, edge.raw_distance)),
            }
        }
        breakdown
    }

    /// Same path walked from target to source
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut nodes = self.nodes.clone();
        let mut edges = self.edges.clone();
        nodes.reverse();
        edges.reverse();
        Self {
            nodes,
            edges,
            distance: self.distance,
            cost: self.cost,
        }
    }
}

/// Cheapest path between two nodes under `weight`.
///
/// # Errors
///
/// - [`Error::UnknownNode`] if either node is not part of `graph`
/// - [`Error::NoPathFound`] if `target` is unreachable from `source`
pub fn shortest_path(
    graph: &RoutingGraph,
    source: NodeIndex,
    target: NodeIndex,
    weight: WeightKind,
) -> Result<NetworkPath, Error> {
    let from = node_key(graph, source)?;
    let to = node_key(graph, target)?;

    let tree = dijkstra_tree(graph, source, Some(target), weight);
    let path = tree.path_to(target).ok_or(Error::NoPathFound { from, to })?;
    debug!(
        "Path {from} -> {to}: {} edges, {:.1} m, cost {:.1}",
        path.edges.len(),
        path.distance,
        path.cost
    );
    Ok(path)
}

/// Cheapest paths from `source` to every reachable node under `weight`,
/// in a single traversal.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if `source` is not part of `graph`.
pub fn shortest_paths_from(
    graph: &RoutingGraph,
    source: NodeIndex,
    weight: WeightKind,
) -> Result<ShortestPathTree, Error> {
    node_key(graph, source)?;
    Ok(dijkstra_tree(graph, source, None, weight))
}

fn node_key(graph: &RoutingGraph, node: NodeIndex) -> Result<crate::NodeKey, Error> {
    graph
        .node(node)
        .map(|node| node.key)
        .ok_or(Error::UnknownNode(node))
}
