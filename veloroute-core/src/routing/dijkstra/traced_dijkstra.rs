use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, hash_map::Entry};
use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use super::state::State;
use crate::{Meters, RoutingGraph, routing::WeightKind, routing::path::NetworkPath};

/// Result of a single-source search.
///
/// Only settled nodes are reported; with a target the search stops as soon
/// as the target is settled, so other nodes may be missing.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: NodeIndex,
    weight: WeightKind,
    costs: HashMap<NodeIndex, f64>,
    distances: HashMap<NodeIndex, Meters>,
    predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
    settled: FixedBitSet,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn weight(&self) -> WeightKind {
        self.weight
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.settled.contains(node.index())
    }

    /// Number of settled nodes, the source included
    pub fn reached(&self) -> usize {
        self.settled.count_ones(..)
    }

    pub fn cost_to(&self, node: NodeIndex) -> Option<f64> {
        self.contains(node)
            .then(|| self.costs.get(&node).copied())
            .flatten()
    }

    /// Sum of `raw_distance` along the tree path to `node`
    pub fn distance_to(&self, node: NodeIndex) -> Option<Meters> {
        self.contains(node)
            .then(|| self.distances.get(&node).copied())
            .flatten()
    }

    /// Walks the predecessor chain back from `node`.
    pub fn path_to(&self, node: NodeIndex) -> Option<NetworkPath> {
        let cost = self.cost_to(node)?;
        let distance = self.distance_to(node)?;

        let mut nodes = vec![node];
        let mut edges = Vec::new();
        let mut current = node;
        while current != self.source {
            let &(prev, edge) = self.predecessors.get(&current)?;
            nodes.push(prev);
            edges.push(edge);
            current = prev;
        }
        nodes.reverse();
        edges.reverse();

        Some(NetworkPath {
            nodes,
            edges,
            distance,
            cost,
        })
    }

    /// Paths to every settled node, ordered by node index
    pub fn paths(&self) -> impl Iterator<Item = (NodeIndex, NetworkPath)> + '_ {
        self.settled.ones().filter_map(move |i| {
            let node = NodeIndex::new(i);
            self.path_to(node).map(|path| (node, path))
        })
    }
}

/// Dijkstra over the routing graph recording predecessor edges.
///
/// Costs come from `weight`; alongside, the raw distance of the chosen
/// path is accumulated. A tentative entry is replaced only by a strictly
/// cheaper one, so among equal-cost paths the first found is kept.
pub(crate) fn dijkstra_tree(
    graph: &RoutingGraph,
    start: NodeIndex,
    target: Option<NodeIndex>,
    weight: WeightKind,
) -> ShortestPathTree {
    let estimated_nodes = graph.node_count().min(1000);
    let mut costs: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut distances: HashMap<NodeIndex, Meters> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> =
        HashMap::with_capacity(estimated_nodes);
    let mut settled = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    costs.insert(start, 0.0);
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Stale heap entry
        if settled.put(node.index()) {
            continue;
        }
        if target == Some(node) {
            break;
        }

        let base_distance = distances.get(&node).copied().unwrap_or_default();
        for edge in graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            if settled.contains(next.index()) {
                continue;
            }
            let next_cost = cost + weight.cost(edge.weight());
            let next_distance = base_distance + edge.weight().raw_distance;

            let improved = match costs.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    true
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        true
                    } else {
                        false
                    }
                }
            };
            if improved {
                distances.insert(next, next_distance);
                predecessors.insert(next, (node, edge.id()));
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    ShortestPathTree {
        source: start,
        weight,
        costs,
        distances,
        predecessors,
        settled,
    }
}
