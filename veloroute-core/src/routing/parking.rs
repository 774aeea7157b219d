use geo::Coord;
use log::{info, trace};

use crate::{Error, NodeKey, RoutingGraph};

/// Returns a copy of `graph` with parking points added as parking nodes.
///
/// Each new point is linked to its nearest network node (line vertex) by a
/// connector edge whose length and weight are the projected distance. A point
/// lying exactly on a network node marks that node instead, without a
/// connector. Points already present are skipped. Parking nodes keep the
/// order of `parking_points`.
///
/// Only network nodes are candidates for the connector, so the result does
/// not depend on the order of the points.
///
/// # Errors
///
/// Returns an error if a point cannot be projected or the graph has no
/// network nodes.
pub fn augment_with_parking(
    graph: &RoutingGraph,
    parking_points: &[Coord<f64>],
) -> Result<RoutingGraph, Error> {
    let mut augmented = graph.clone();
    let mut inserted = 0usize;
    let mut flagged = 0usize;

    for &point in parking_points {
        let key = NodeKey::new(point)?;

        if let Some(existing) = augmented.node_index(&key) {
            if augmented.mark_parking(existing) {
                flagged += 1;
            } else {
                trace!("Skipping duplicate parking point {key}");
            }
            continue;
        }

        let projected = graph.projector().project(point)?;
        let (access, distance) = graph
            .nearest_network_node(projected)
            .ok_or(Error::NoPointsFound)?;
        augmented.add_parking_node(key, projected, access, distance);
        inserted += 1;
    }

    augmented.rebuild_index();
    info!(
        "Added {inserted} parking node(s), flagged {flagged} network node(s) as parking ({} total)",
        augmented.parking_nodes().len()
    );
    Ok(augmented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        EdgeCategory, LineFeature, NetworkConfig, ProjectionConfig, build_graph,
        model::FeatureProperties,
    };

    fn base() -> RoutingGraph {
        let features = [LineFeature::new(
            vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 100.0, y: 0.0 },
                Coord { x: 200.0, y: 0.0 },
            ],
            FeatureProperties::default(),
        )];
        let config = NetworkConfig {
            projection: ProjectionConfig::Planar,
            ..NetworkConfig::default()
        };
        build_graph(&features, &config).unwrap()
    }

    #[test]
    fn parking_point_gets_connector_to_nearest_node() {
        let graph = base();
        let augmented = augment_with_parking(&graph, &[Coord { x: 90.0, y: 30.0 }]).unwrap();

        assert_eq!(augmented.node_count(), graph.node_count() + 1);
        assert_eq!(augmented.edge_count(), graph.edge_count() + 1);

        let parking = augmented.parking_nodes()[0];
        assert!(augmented.is_parking(parking));
        assert!(!augmented.node(parking).unwrap().is_network());

        let access = augmented
            .node_index(&NodeKey::new(Coord { x: 100.0, y: 0.0 }).unwrap())
            .unwrap();
        let connector = augmented.find_edge(parking, access).unwrap();
        assert_eq!(connector.category, EdgeCategory::ParkingConnector);
        assert!((connector.raw_distance - 1000.0_f64.sqrt()).abs() < 1e-9);
        assert_eq!(connector.weight, connector.raw_distance);
    }

    #[test]
    fn base_graph_is_left_untouched() {
        let graph = base();
        let _ = augment_with_parking(&graph, &[Coord { x: 50.0, y: 10.0 }]).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert!(graph.parking_nodes().is_empty());
    }

    #[test]
    fn index_is_rebuilt_for_new_nodes() {
        let graph = base();
        let augmented = augment_with_parking(&graph, &[Coord { x: 150.0, y: 80.0 }]).unwrap();
        let nearby = Coord { x: 150.0, y: 79.0 };
        let (node, distance) = augmented.resolve_nearest(nearby).unwrap();
        assert_eq!(node, augmented.parking_nodes()[0]);
        assert!((distance - 1.0).abs() < 1e-9);
    }

    #[test]
    fn point_on_network_node_is_flagged_in_place() {
        let graph = base();
        let on_node = Coord { x: 200.0, y: 0.0 };
        let augmented = augment_with_parking(&graph, &[on_node, on_node]).unwrap();

        assert_eq!(augmented.node_count(), graph.node_count());
        assert_eq!(augmented.edge_count(), graph.edge_count());
        assert_eq!(augmented.parking_nodes().len(), 1);
        let flagged = augmented.parking_nodes()[0];
        assert!(augmented.node(flagged).unwrap().is_network());
    }

    #[test]
    fn parking_nodes_keep_input_order() {
        let graph = base();
        let points = [
            Coord { x: 180.0, y: 5.0 },
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 20.0, y: 5.0 },
            Coord { x: 180.0, y: 5.0 },
        ];
        let augmented = augment_with_parking(&graph, &points).unwrap();
        let keys: Vec<Coord<f64>> = augmented
            .parking_nodes()
            .iter()
            .map(|&n| augmented.node(n).unwrap().key.coord())
            .collect();
        assert_eq!(keys, points[..3].to_vec());
    }
}
