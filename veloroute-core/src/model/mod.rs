//! Data model of the routable cycling network
//!
//! Contains input feature records, scoring tables and the graph itself.

pub mod feature;
pub mod network;
pub mod scoring;

pub use feature::{FeatureProperties, LineFeature, PointFeature};
pub use network::{
    BuildStats, EdgeCategory, IndexedPoint, NetworkEdge, NetworkNode, NodeKey, NodeKind,
    RoutingGraph, SpatialIndex,
};
pub use scoring::{CategoryFactors, ScoringConfig, SurfaceClass, SurfaceFactors};
