//! Network components - node identity, nodes and edges

use std::fmt;
use std::hash::{Hash, Hasher};

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use crate::{Error, Meters, model::SurfaceClass};

/// Stable identity of a node: its exact input coordinate.
///
/// Two keys are equal only when both components are bit-identical after
/// folding `-0.0` into `0.0`. No snapping tolerance is applied, so two
/// vertices a micrometre apart are distinct nodes.
#[derive(Clone, Copy)]
pub struct NodeKey {
    x: f64,
    y: f64,
}

impl NodeKey {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for NaN or infinite components.
    pub fn new(coord: Coord<f64>) -> Result<Self, Error> {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return Err(Error::InvalidData(format!(
                "non-finite coordinate ({}, {})",
                coord.x, coord.y
            )));
        }
        // -0.0 + 0.0 == +0.0
        Ok(Self {
            x: coord.x + 0.0,
            y: coord.y + 0.0,
        })
    }

    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::from(self.coord())
    }
}

impl PartialEq for NodeKey {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for NodeKey {}

impl Hash for NodeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKey({}, {})", self.x, self.y)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Vertex of a line feature
    Network,
    /// Inserted from a parking point feature
    Parking,
}

/// Network graph node
#[derive(Debug, Clone)]
pub struct NetworkNode {
    /// Original geographic coordinate
    pub key: NodeKey,
    /// Cached metric coordinate
    pub projected: Coord<f64>,
    pub kind: NodeKind,
}

impl NetworkNode {
    pub fn geometry(&self) -> Point<f64> {
        self.key.point()
    }

    pub fn is_network(&self) -> bool {
        self.kind == NodeKind::Network
    }
}

/// Infrastructure class of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeCategory {
    SharedWithCars,
    DesignatedPaths,
    SharedWithPedestrian,
    NoInfrastructure,
    ParkingConnector,
}

impl EdgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeCategory::SharedWithCars => "shared-with-cars",
            EdgeCategory::DesignatedPaths => "designated-paths",
            EdgeCategory::SharedWithPedestrian => "shared-with-pedestrian",
            EdgeCategory::NoInfrastructure => "no-infrastructure",
            EdgeCategory::ParkingConnector => "parking-connector",
        }
    }
}

impl fmt::Display for EdgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network graph edge (street or path segment)
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkEdge {
    /// Euclidean length in the projected plane
    pub raw_distance: Meters,
    pub category: EdgeCategory,
    /// Surface bucket, `None` for unknown surfaces and connectors
    pub surface: Option<SurfaceClass>,
    /// Routing cost for safety-aware routing
    pub weight: f64,
}

impl NetworkEdge {
    /// Distance-only edge between a parking node and the network
    pub fn connector(distance: Meters) -> Self {
        Self {
            raw_distance: distance,
            category: EdgeCategory::ParkingConnector,
            surface: None,
            weight: distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn keys_use_exact_equality() {
        let a = NodeKey::new(Coord { x: 7.1, y: 50.7 }).unwrap();
        let b = NodeKey::new(Coord { x: 7.1, y: 50.7 }).unwrap();
        let c = NodeKey::new(Coord {
            x: 7.1 + 1e-12,
            y: 50.7,
        })
        .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<NodeKey> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn negative_zero_folds_into_zero() {
        let a = NodeKey::new(Coord { x: -0.0, y: 0.0 }).unwrap();
        let b = NodeKey::new(Coord { x: 0.0, y: -0.0 }).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let nan = Coord {
            x: f64::NAN,
            y: 1.0,
        };
        let infinite = Coord {
            x: 1.0,
            y: f64::INFINITY,
        };
        assert!(NodeKey::new(nan).is_err());
        assert!(NodeKey::new(infinite).is_err());
    }

    #[test]
    fn connector_uses_distance_as_weight() {
        let edge = NetworkEdge::connector(12.5);
        assert_eq!(edge.category, EdgeCategory::ParkingConnector);
        assert_eq!(edge.weight, 12.5);
        assert_eq!(edge.raw_distance, 12.5);
    }
}
