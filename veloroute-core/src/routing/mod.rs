//! Shortest paths, parking augmentation and bike-then-walk optimization

pub mod dijkstra;
pub mod itinerary;
pub mod multimodal;
pub mod parking;
pub mod path;

use serde::{Deserialize, Serialize};

use crate::NetworkEdge;

pub use dijkstra::ShortestPathTree;
pub use itinerary::Itinerary;
pub use multimodal::{TravelSpeeds, optimize_multimodal};
pub use parking::augment_with_parking;
pub use path::{NetworkPath, shortest_path, shortest_paths_from};

/// Edge attribute a search minimizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightKind {
    /// Composite safety weight, used for cycling
    #[default]
    Safety,
    /// Raw metric distance, used for walking
    Distance,
}

impl WeightKind {
    pub fn cost(self, edge: &NetworkEdge) -> f64 {
        match self {
            WeightKind::Safety => edge.weight,
            WeightKind::Distance => edge.raw_distance,
        }
    }
}
