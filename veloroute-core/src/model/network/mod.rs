//! Cycling network graph and its spatial index

pub mod components;
pub mod graph;
pub mod index;

pub use components::{EdgeCategory, NetworkEdge, NetworkNode, NodeKey, NodeKind};
pub use graph::{BuildStats, RoutingGraph};
pub use index::{IndexedPoint, SpatialIndex};
