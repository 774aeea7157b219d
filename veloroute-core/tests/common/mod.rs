#![allow(dead_code)]

use geo::Coord;
use veloroute_core::{
    FeatureProperties, LineFeature, NetworkConfig, NodeKey, ProjectionConfig, RoutingGraph,
};

pub fn coord(x: f64, y: f64) -> Coord<f64> {
    Coord { x, y }
}

pub fn key(x: f64, y: f64) -> NodeKey {
    NodeKey::new(coord(x, y)).unwrap()
}

pub fn planar(alpha: f64) -> NetworkConfig {
    NetworkConfig {
        alpha,
        projection: ProjectionConfig::Planar,
        ..NetworkConfig::default()
    }
}

pub fn line(coords: &[(f64, f64)], properties: FeatureProperties) -> LineFeature {
    LineFeature::new(
        coords.iter().map(|&(x, y)| coord(x, y)).collect(),
        properties,
    )
}

pub fn plain(coords: &[(f64, f64)]) -> LineFeature {
    line(coords, FeatureProperties::default())
}

pub fn cars() -> FeatureProperties {
    FeatureProperties {
        shared_with_cars: true,
        surface: Some("asphalt".to_string()),
        ..FeatureProperties::default()
    }
}

pub fn designated(surface: &str) -> FeatureProperties {
    FeatureProperties {
        designated_paths: true,
        surface: Some(surface.to_string()),
        ..FeatureProperties::default()
    }
}

pub fn pedestrian() -> FeatureProperties {
    FeatureProperties {
        shared_with_pedestrian: true,
        surface: Some("paving_stones".to_string()),
        ..FeatureProperties::default()
    }
}

/// 3x3 lattice (100 m spacing) with mixed infrastructure and two diagonals
pub fn mixed_lattice() -> Vec<LineFeature> {
    vec![
        line(&[(0.0, 0.0), (100.0, 0.0), (200.0, 0.0)], cars()),
        line(
            &[(0.0, 100.0), (100.0, 100.0), (200.0, 100.0)],
            designated("gravel"),
        ),
        line(
            &[(0.0, 200.0), (100.0, 200.0), (200.0, 200.0)],
            pedestrian(),
        ),
        line(
            &[(0.0, 0.0), (0.0, 100.0), (0.0, 200.0)],
            designated("asphalt"),
        ),
        plain(&[(100.0, 0.0), (100.0, 100.0), (100.0, 200.0)]),
        line(&[(200.0, 0.0), (200.0, 100.0), (200.0, 200.0)], cars()),
        line(&[(0.0, 0.0), (100.0, 100.0)], pedestrian()),
        plain(&[(100.0, 100.0), (200.0, 200.0)]),
    ]
}

pub fn node(graph: &RoutingGraph, x: f64, y: f64) -> petgraph::graph::NodeIndex {
    graph.node_index(&key(x, y)).unwrap()
}
