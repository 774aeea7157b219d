pub use crate::Error;
pub use crate::Meters;

// Graph construction
pub use crate::loading::{FeatureSet, NetworkConfig, build_graph, features_from_geojson};
pub use crate::model::{
    BuildStats, EdgeCategory, FeatureProperties, LineFeature, NodeKey, PointFeature, RoutingGraph,
    ScoringConfig,
};
pub use crate::projection::{ProjectionConfig, Projector};

// Queries
pub use crate::routing::{
    Itinerary, NetworkPath, ShortestPathTree, TravelSpeeds, WeightKind, augment_with_parking,
    optimize_multimodal, shortest_path, shortest_paths_from,
};
