//! This module turns already-parsed geographic features into a
//! routable network graph.

mod builder;
mod components;
mod config;
mod ingest;

pub use builder::build_graph;
pub use config::NetworkConfig;
pub use ingest::{FeatureSet, features_from_geojson};
