mod common;

use common::{cars, coord, key, mixed_lattice, node, plain, planar};
use hashbrown::HashSet;
use petgraph::{graph::NodeIndex, visit::EdgeRef};
use veloroute_core::{
    EdgeCategory, NetworkPath, NodeKey, RoutingGraph, WeightKind, augment_with_parking,
    build_graph, shortest_path,
};

/// Cheapest simple path by exhaustive enumeration, as (cost, distance)
fn brute_force(
    graph: &RoutingGraph,
    from: NodeIndex,
    to: NodeIndex,
    weight: WeightKind,
) -> (f64, f64) {
    #[allow(clippy::too_many_arguments)]
    fn walk(
        graph: &RoutingGraph,
        at: NodeIndex,
        to: NodeIndex,
        weight: WeightKind,
        visited: &mut HashSet<NodeIndex>,
        cost: f64,
        distance: f64,
        best: &mut (f64, f64),
    ) {
        if at == to {
            if cost < best.0 {
                *best = (cost, distance);
            }
            return;
        }
        for edge in graph.edges(at) {
            let next = edge.target();
            if visited.insert(next) {
                walk(
                    graph,
                    next,
                    to,
                    weight,
                    visited,
                    cost + weight.cost(edge.weight()),
                    distance + edge.weight().raw_distance,
                    best,
                );
                visited.remove(&next);
            }
        }
    }

    let mut best = (f64::INFINITY, f64::INFINITY);
    let mut visited = HashSet::from([from]);
    walk(graph, from, to, weight, &mut visited, 0.0, 0.0, &mut best);
    best
}

fn assert_simple_connected(graph: &RoutingGraph, path: &NetworkPath) {
    let unique: HashSet<NodeIndex> = path.nodes.iter().copied().collect();
    assert_eq!(unique.len(), path.nodes.len(), "path repeats a node");
    assert_eq!(path.edges.len() + 1, path.nodes.len());

    let mut distance = 0.0;
    for (i, &edge) in path.edges.iter().enumerate() {
        let (a, b) = graph.edge_endpoints(edge).unwrap();
        let (u, v) = (path.nodes[i], path.nodes[i + 1]);
        assert!(
            (a, b) == (u, v) || (a, b) == (v, u),
            "edge does not join consecutive nodes"
        );
        distance += graph.edge(edge).unwrap().raw_distance;
    }
    assert!((distance - path.distance).abs() < 1e-9);
}

#[test]
fn pure_distance_routes_are_shortest() {
    let graph = build_graph(&mixed_lattice(), &planar(0.0)).unwrap();
    let nodes: Vec<NodeIndex> = graph.nodes().map(|(idx, _)| idx).collect();

    for &from in &nodes {
        for &to in &nodes {
            let path = shortest_path(&graph, from, to, WeightKind::Safety).unwrap();
            assert_simple_connected(&graph, &path);
            let (_, shortest) = brute_force(&graph, from, to, WeightKind::Distance);
            assert!(path.distance <= shortest + 1e-9);
        }
    }
}

#[test]
fn weighted_routes_minimize_cost() {
    let graph = build_graph(&mixed_lattice(), &planar(0.7)).unwrap();
    let from = node(&graph, 0.0, 0.0);

    for (to, _) in graph.nodes() {
        let path = shortest_path(&graph, from, to, WeightKind::Safety).unwrap();
        assert_simple_connected(&graph, &path);
        let (cheapest, _) = brute_force(&graph, from, to, WeightKind::Safety);
        assert!((path.cost - cheapest).abs() < 1e-9);
    }
}

#[test]
fn raising_a_category_factor_never_lowers_cost() {
    let features = mixed_lattice();
    let base = planar(1.0);
    let mut riskier = base.clone();
    riskier.scoring.category_factors.shared_with_cars = 3.0;

    let a = build_graph(&features, &base).unwrap();
    let b = build_graph(&features, &riskier).unwrap();

    for (from_x, from_y, to_x, to_y) in [
        (0.0, 0.0, 200.0, 0.0),
        (0.0, 0.0, 200.0, 200.0),
        (200.0, 0.0, 0.0, 200.0),
        (100.0, 0.0, 200.0, 100.0),
    ] {
        let before = shortest_path(
            &a,
            node(&a, from_x, from_y),
            node(&a, to_x, to_y),
            WeightKind::Safety,
        )
        .unwrap();
        let after = shortest_path(
            &b,
            node(&b, from_x, from_y),
            node(&b, to_x, to_y),
            WeightKind::Safety,
        )
        .unwrap();
        assert!(after.cost >= before.cost - 1e-9);
    }
}

#[test]
fn rebuilding_is_deterministic() {
    let features = mixed_lattice();
    let a = build_graph(&features, &planar(0.6)).unwrap();
    let b = build_graph(&features, &planar(0.6)).unwrap();

    let keys = |g: &RoutingGraph| g.nodes().map(|(_, n)| n.key).collect::<Vec<NodeKey>>();
    assert_eq!(keys(&a), keys(&b));

    let edges = |g: &RoutingGraph| {
        g.edge_references()
            .map(|e| {
                let source = g.node(e.source()).unwrap().key;
                let target = g.node(e.target()).unwrap().key;
                (source, target, e.weight().clone())
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(edges(&a), edges(&b));

    for (from, _) in a.nodes() {
        for (to, _) in a.nodes() {
            assert_eq!(
                shortest_path(&a, from, to, WeightKind::Safety).unwrap(),
                shortest_path(&b, from, to, WeightKind::Safety).unwrap()
            );
        }
    }
}

#[test]
fn exact_node_coordinates_resolve_with_zero_distance() {
    let graph = build_graph(&mixed_lattice(), &planar(0.5)).unwrap();
    for (idx, n) in graph.nodes() {
        assert_eq!(graph.resolve_nearest(n.key.coord()).unwrap(), (idx, 0.0));
    }
}

#[test]
fn parking_augmentation_is_order_independent() {
    let graph = build_graph(&mixed_lattice(), &planar(0.5)).unwrap();
    let points = [
        coord(40.0, 10.0),
        coord(150.0, 160.0),
        coord(100.0, 100.0),
        coord(210.0, -5.0),
        coord(50.0, 50.0),
    ];

    let fingerprint = |g: &RoutingGraph| {
        let parking: HashSet<NodeKey> = g
            .parking_nodes()
            .iter()
            .map(|&p| g.node(p).unwrap().key)
            .collect();
        let connectors: HashSet<(NodeKey, NodeKey, u64)> = g
            .edge_references()
            .filter(|e| e.weight().category == EdgeCategory::ParkingConnector)
            .map(|e| {
                let (a, b) = (g.node(e.source()).unwrap(), g.node(e.target()).unwrap());
                let (parking, access) = if a.is_network() { (b, a) } else { (a, b) };
                (parking.key, access.key, e.weight().raw_distance.to_bits())
            })
            .collect();
        (g.node_count(), g.edge_count(), parking, connectors)
    };

    let forward = augment_with_parking(&graph, &points).unwrap();
    let mut reversed_points = points;
    reversed_points.reverse();
    let reversed = augment_with_parking(&graph, &reversed_points).unwrap();
    let rotated_points = [points[2], points[4], points[0], points[3], points[1]];
    let rotated = augment_with_parking(&graph, &rotated_points).unwrap();

    assert_eq!(fingerprint(&forward), fingerprint(&reversed));
    assert_eq!(fingerprint(&forward), fingerprint(&rotated));
    // (100, 100) is a lattice vertex and gets no connector
    assert_eq!(forward.parking_nodes().len(), 5);
    assert_eq!(forward.edge_count(), graph.edge_count() + 4);
    assert!(forward.is_parking(node(&forward, 100.0, 100.0)));
}

#[test]
fn small_fragments_are_discarded() {
    let features = [
        plain(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]),
        plain(&[(20.0, 0.0), (20.0, 10.0), (20.0, 20.0)]),
        common::line(&[(500.0, 500.0), (510.0, 500.0)], cars()),
    ];
    let graph = build_graph(&features, &planar(1.0)).unwrap();
    assert_eq!(graph.node_count(), 5);
    assert!(graph.node_index(&key(500.0, 500.0)).is_none());
    assert!(graph.node_index(&key(510.0, 500.0)).is_none());

    // A query near the discarded fragment snaps into the kept component
    let (snapped, _) = graph.resolve_nearest(coord(505.0, 500.0)).unwrap();
    assert_eq!(snapped, node(&graph, 20.0, 20.0));
}
