//! Safety-aware cycling and bike-then-walk routing.
//!
//! Thin, caller-facing layer over [`veloroute_core`]: graph building from a
//! plain alpha, coordinate-based routing that reports unreachable targets as
//! `None`, batch helpers running on `rayon`, and TOML settings.

pub mod alpha;
pub mod config;
pub mod routing;

pub use alpha::{GraphCache, explore_alphas};
pub use config::Settings;
pub use routing::{
    Route, augment_with_parking, build_graph, optimize_multimodal, parse_features, resolve_nearest,
    route, route_one_to_many,
};

pub use veloroute_core::{
    EdgeCategory, Error, FeatureProperties, FeatureSet, Itinerary, LineFeature, Meters,
    NetworkConfig, NetworkPath, NodeKey, PointFeature, ProjectionConfig, RoutingGraph,
    ScoringConfig, TravelSpeeds,
};
