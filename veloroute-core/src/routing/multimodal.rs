//! Bike-then-walk itinerary optimization over parking nodes

use geo::Coord;
use log::debug;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use super::{Itinerary, WeightKind, path::shortest_path, path::shortest_paths_from};
use crate::{Error, Meters, RoutingGraph};

/// Average travel speeds in km/h
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelSpeeds {
    pub bike_kmh: f64,
    pub walk_kmh: f64,
}

impl Default for TravelSpeeds {
    fn default() -> Self {
        Self {
            bike_kmh: 15.0,
            walk_kmh: 4.0,
        }
    }
}

impl TravelSpeeds {
    pub fn new(bike_kmh: f64, walk_kmh: f64) -> Self {
        Self { bike_kmh, walk_kmh }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless both speeds are finite
    /// and positive.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, speed) in [("bike", self.bike_kmh), ("walk", self.walk_kmh)] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "{name} speed must be a positive number of km/h, got {speed}"
                )));
            }
        }
        Ok(())
    }
}

/// Finds the parking node minimizing bike distance plus walk distance.
///
/// The bike leg follows the safety weight from `start`, the walk leg the
/// raw distance to `end`. Each side is a single traversal regardless of the
/// number of parking nodes. Equal totals keep the parking node listed first
/// in [`RoutingGraph::parking_nodes`].
///
/// When `end` resolves to a parking node the itinerary is a single bike leg.
///
/// # Errors
///
/// - [`Error::InvalidConfiguration`] for invalid speeds
/// - [`Error::NoPathFound`] if the end is a parking node the start cannot reach
/// - [`Error::NoParkingReachable`] if no parking node is reachable from both sides
pub fn optimize_multimodal(
    graph: &RoutingGraph,
    start: Coord<f64>,
    end: Coord<f64>,
    speeds: &TravelSpeeds,
) -> Result<Itinerary, Error> {
    speeds.validate()?;

    let (start_node, start_offset) = graph.resolve_nearest(start)?;
    let (end_node, end_offset) = graph.resolve_nearest(end)?;
    debug!(
        "Resolved start to {start_node:?} ({start_offset:.1} m away), end to {end_node:?} ({end_offset:.1} m away)"
    );

    if graph.is_parking(end_node) {
        let bike_leg = shortest_path(graph, start_node, end_node, WeightKind::Safety)?;
        debug!("End is a parking node, riding all the way");
        return Ok(Itinerary::new(start_node, end_node, end_node, bike_leg, None, speeds));
    }

    if graph.parking_nodes().is_empty() {
        return Err(Error::NoParkingReachable);
    }

    let bike = shortest_paths_from(graph, start_node, WeightKind::Safety)?;
    let walk = shortest_paths_from(graph, end_node, WeightKind::Distance)?;

    let best = graph
        .parking_nodes()
        .iter()
        .filter_map(|&parking| {
            let total = bike.distance_to(parking)? + walk.distance_to(parking)?;
            Some((parking, total))
        })
        .fold(None, |best: Option<(NodeIndex, Meters)>, candidate| match best {
            Some((_, total)) if total <= candidate.1 => best,
            _ => Some(candidate),
        });

    let (parking, total) = best.ok_or(Error::NoParkingReachable)?;
    let bike_leg = bike.path_to(parking).ok_or(Error::NoParkingReachable)?;
    let walk_leg = walk
        .path_to(parking)
        .ok_or(Error::NoParkingReachable)?
        .reversed();
    debug!("Selected parking node {parking:?}, total {total:.1} m");

    Ok(Itinerary::new(
        start_node,
        end_node,
        parking,
        bike_leg,
        Some(walk_leg),
        speeds,
    ))
}
