//! Safety-weighted bicycle routing over a street and path network.
//!
//! The engine turns line features into a metric, undirected graph, scores
//! every segment by infrastructure category and surface quality, and
//! answers single-leg and bike-then-walk routing queries on it.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod projection;
pub mod routing;

pub use error::Error;
pub use loading::{FeatureSet, NetworkConfig, build_graph, features_from_geojson};
pub use model::{
    BuildStats, CategoryFactors, EdgeCategory, FeatureProperties, LineFeature, NetworkEdge,
    NetworkNode, NodeKey, NodeKind, PointFeature, RoutingGraph, ScoringConfig, SurfaceClass,
    SurfaceFactors,
};
pub use projection::{ProjectionConfig, Projector};
pub use routing::{
    Itinerary, NetworkPath, ShortestPathTree, TravelSpeeds, WeightKind, augment_with_parking,
    optimize_multimodal, shortest_path, shortest_paths_from,
};

/// Metres in the projected coordinate system
pub type Meters = f64;
