//! Result of a bike-then-walk query

mod to_geojson;

use std::time::Duration;

use petgraph::graph::NodeIndex;

use super::{NetworkPath, TravelSpeeds};
use crate::Meters;

/// Decomposed bike and walk legs through one parking node
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub start: NodeIndex,
    pub end: NodeIndex,
    /// Selected parking node; equals `end` when the end is itself parking
    pub parking: NodeIndex,
    /// Start to parking
    pub bike_leg: NetworkPath,
    /// Parking to end, absent when the end is the parking node
    pub walk_leg: Option<NetworkPath>,
    pub bike_distance: Meters,
    pub walk_distance: Meters,
    pub total_distance: Meters,
    pub bike_time: Duration,
    pub walk_time: Duration,
    pub total_time: Duration,
}

impl Itinerary {
    pub(crate) fn new(
        start: NodeIndex,
        end: NodeIndex,
        parking: NodeIndex,
        bike_leg: NetworkPath,
        walk_leg: Option<NetworkPath>,
        speeds: &TravelSpeeds,
    ) -> Self {
        let bike_distance = bike_leg.distance;
        let walk_distance = walk_leg.as_ref().map_or(0.0, |leg| leg.distance);
        let bike_time = travel_time(bike_distance, speeds.bike_kmh);
        let walk_time = travel_time(walk_distance, speeds.walk_kmh);

        Self {
            start,
            end,
            parking,
            bike_leg,
            walk_leg,
            bike_distance,
            walk_distance,
            total_distance: bike_distance + walk_distance,
            bike_time,
            walk_time,
            total_time: bike_time + walk_time,
        }
    }

    pub fn bike_distance_km(&self) -> f64 {
        self.bike_distance / 1000.0
    }

    pub fn walk_distance_km(&self) -> f64 {
        self.walk_distance / 1000.0
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance / 1000.0
    }

    pub fn has_walk_leg(&self) -> bool {
        self.walk_leg.is_some()
    }
}

// Speeds are validated positive before an itinerary is built
fn travel_time(distance: Meters, speed_kmh: f64) -> Duration {
    let seconds = distance / 1000.0 / speed_kmh * 3600.0;
    Duration::try_from_secs_f64(seconds).unwrap_or_default()
}
