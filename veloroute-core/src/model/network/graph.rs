//! Routable network: graph, node lookup and spatial index

use geo::Coord;
use hashbrown::{HashMap, HashSet};
use petgraph::Undirected;
use petgraph::graph::{EdgeIndex, EdgeReference, Edges, NodeIndex, UnGraph};

use super::{NetworkEdge, NetworkNode, NodeKey, NodeKind, SpatialIndex};
use crate::{Error, Meters, Projector};

/// Node/edge counts recorded while building a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Line features skipped for having fewer than two coordinates
    pub skipped_features: usize,
    /// Nodes before pruning to the largest component
    pub raw_nodes: usize,
    pub raw_edges: usize,
    /// Connected components before pruning
    pub components: usize,
    pub nodes: usize,
    pub edges: usize,
}

impl BuildStats {
    pub fn pruned_nodes(&self) -> usize {
        self.raw_nodes - self.nodes
    }

    pub fn pruned_edges(&self) -> usize {
        self.raw_edges - self.edges
    }
}

/// Connected, undirected, weighted network for a single alpha.
///
/// Immutable once built; parking augmentation produces a new value.
#[derive(Debug, Clone)]
pub struct RoutingGraph {
    pub(crate) graph: UnGraph<NetworkNode, NetworkEdge>,
    node_lookup: HashMap<NodeKey, NodeIndex>,
    index: SpatialIndex,
    projector: Projector,
    alpha: f64,
    parking: Vec<NodeIndex>,
    parking_lookup: HashSet<NodeIndex>,
    stats: BuildStats,
}

impl RoutingGraph {
    pub(crate) fn new(
        graph: UnGraph<NetworkNode, NetworkEdge>,
        projector: Projector,
        alpha: f64,
        stats: BuildStats,
    ) -> Self {
        let node_lookup = graph
            .node_indices()
            .map(|idx| (graph[idx].key, idx))
            .collect();
        let index = build_index(&graph);

        Self {
            graph,
            node_lookup,
            index,
            projector,
            alpha,
            parking: Vec::new(),
            parking_lookup: HashSet::new(),
            stats,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn projector(&self) -> Projector {
        self.projector
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn node(&self, node: NodeIndex) -> Option<&NetworkNode> {
        self.graph.node_weight(node)
    }

    pub fn edge(&self, edge: EdgeIndex) -> Option<&NetworkEdge> {
        self.graph.edge_weight(edge)
    }

    pub fn edge_endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge)
    }

    /// Edge between two nodes, if any
    pub fn find_edge(&self, a: NodeIndex, b: NodeIndex) -> Option<&NetworkEdge> {
        self.graph.find_edge(a, b).map(|edge| &self.graph[edge])
    }

    pub fn node_index(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.node_lookup.get(key).copied()
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        node.index() < self.graph.node_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &NetworkNode)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Edges incident to `node`
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, NetworkEdge, Undirected> {
        self.graph.edges(node)
    }

    pub fn edge_references(&self) -> impl Iterator<Item = EdgeReference<'_, NetworkEdge>> {
        self.graph.edge_references()
    }

    /// Parking nodes in insertion order
    pub fn parking_nodes(&self) -> &[NodeIndex] {
        &self.parking
    }

    pub fn is_parking(&self, node: NodeIndex) -> bool {
        self.parking_lookup.contains(&node)
    }

    /// Nearest graph node to a geographic point.
    ///
    /// A point that is exactly a node coordinate resolves to that node with
    /// distance 0 without projecting or querying the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the point cannot be projected or the index is empty.
    pub fn resolve_nearest(&self, point: Coord<f64>) -> Result<(NodeIndex, Meters), Error> {
        let key = NodeKey::new(point)?;
        if let Some(node) = self.node_index(&key) {
            return Ok((node, 0.0));
        }
        let projected = self.projector.project(point)?;
        self.index.nearest(projected).ok_or(Error::NoPointsFound)
    }

    /// Nearest line-vertex node to an already projected point, ignoring
    /// inserted parking nodes.
    pub(crate) fn nearest_network_node(
        &self,
        projected: Coord<f64>,
    ) -> Option<(NodeIndex, Meters)> {
        self.index.nearest_matching(projected, |node| {
            self.graph
                .node_weight(node)
                .is_some_and(NetworkNode::is_network)
        })
    }

    pub(crate) fn add_parking_node(
        &mut self,
        key: NodeKey,
        projected: Coord<f64>,
        access: NodeIndex,
        distance: Meters,
    ) -> NodeIndex {
        let node = self.graph.add_node(NetworkNode {
            key,
            projected,
            kind: NodeKind::Parking,
        });
        self.graph.add_edge(node, access, NetworkEdge::connector(distance));
        self.node_lookup.insert(key, node);
        self.mark_parking(node);
        node
    }

    /// Returns false if the node was already a parking node.
    pub(crate) fn mark_parking(&mut self, node: NodeIndex) -> bool {
        if self.parking_lookup.insert(node) {
            self.parking.push(node);
            true
        } else {
            false
        }
    }

    pub(crate) fn rebuild_index(&mut self) {
        self.index = build_index(&self.graph);
    }
}

fn build_index(graph: &UnGraph<NetworkNode, NetworkEdge>) -> SpatialIndex {
    SpatialIndex::build(graph.node_indices().map(|idx| (idx, graph[idx].projected)))
}
