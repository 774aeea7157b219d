use thiserror::Error;

use crate::NodeKey;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No usable line features in input")]
    EmptyInput,
    #[error("Network too small to route on: {nodes} node(s) after pruning")]
    DegenerateGraph { nodes: usize },
    #[error("No path between {from} and {to}")]
    NoPathFound { from: NodeKey, to: NodeKey },
    #[error("No parking node is reachable by bike from the start and on foot from the end")]
    NoParkingReachable,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Projection error: {0}")]
    Projection(String),
    #[error("No nearby points found for snapping")]
    NoPointsFound,
    #[error("Node {0:?} is not part of the graph")]
    UnknownNode(petgraph::graph::NodeIndex),
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
}

impl Error {
    /// Query-time outcomes that callers are expected to handle as normal results
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NoPathFound { .. } | Error::NoParkingReachable)
    }
}
