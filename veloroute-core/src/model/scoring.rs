//! Edge scoring tables: surface quality and infrastructure risk.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Meters, model::EdgeCategory};

/// Surface bucket a raw `surface` tag falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceClass {
    Asphalt,
    Compacted,
    LooseAndRough,
    Paved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceFactors {
    pub asphalt: f64,
    pub compacted: f64,
    pub loose_and_rough: f64,
    pub paved: f64,
    /// Missing or unrecognised surface tags
    pub unknown: f64,
}

impl Default for SurfaceFactors {
    fn default() -> Self {
        Self {
            asphalt: 0.8,
            compacted: 0.95,
            loose_and_rough: 1.2,
            paved: 1.1,
            unknown: 1.4,
        }
    }
}

impl SurfaceFactors {
    pub fn factor(&self, class: Option<SurfaceClass>) -> f64 {
        match class {
            Some(SurfaceClass::Asphalt) => self.asphalt,
            Some(SurfaceClass::Compacted) => self.compacted,
            Some(SurfaceClass::LooseAndRough) => self.loose_and_rough,
            Some(SurfaceClass::Paved) => self.paved,
            None => self.unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryFactors {
    pub designated_paths: f64,
    pub shared_with_pedestrian: f64,
    pub shared_with_cars: f64,
    /// Segments without classified infrastructure
    pub other: f64,
}

impl Default for CategoryFactors {
    fn default() -> Self {
        Self {
            designated_paths: 0.2,
            shared_with_pedestrian: 0.4,
            shared_with_cars: 0.75,
            other: 1.0,
        }
    }
}

impl CategoryFactors {
    pub fn factor(&self, category: EdgeCategory) -> f64 {
        match category {
            EdgeCategory::DesignatedPaths => self.designated_paths,
            EdgeCategory::SharedWithPedestrian => self.shared_with_pedestrian,
            EdgeCategory::SharedWithCars => self.shared_with_cars,
            EdgeCategory::NoInfrastructure | EdgeCategory::ParkingConnector => self.other,
        }
    }
}

/// Complete scoring policy handed to the graph builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Raw `surface` tag value to bucket
    pub surface_classes: HashMap<String, SurfaceClass>,
    pub surface_factors: SurfaceFactors,
    pub category_factors: CategoryFactors,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let buckets: [(SurfaceClass, &[&str]); 4] = [
            (SurfaceClass::Asphalt, &["asphalt"]),
            (SurfaceClass::Compacted, &["compacted"]),
            (
                SurfaceClass::LooseAndRough,
                &[
                    "fine_gravel",
                    "gravel",
                    "cobblestone",
                    "hardpack",
                    "hardwood",
                    "pebblestone",
                    "sett",
                    "unpaved",
                    "dirt",
                    "dirt/sand",
                    "earth",
                    "ground",
                    "metal",
                    "sand",
                    "soil",
                    "stepping_stones",
                    "wood",
                ],
            ),
            (
                SurfaceClass::Paved,
                &[
                    "asphalt:lanes",
                    "concrete",
                    "concrete:plates",
                    "paving_stones",
                ],
            ),
        ];

        let surface_classes = buckets
            .iter()
            .flat_map(|(class, tags)| tags.iter().map(move |tag| ((*tag).to_string(), *class)))
            .collect();

        Self {
            surface_classes,
            surface_factors: SurfaceFactors::default(),
            category_factors: CategoryFactors::default(),
        }
    }
}

impl ScoringConfig {
    pub fn surface_class(&self, surface: Option<&str>) -> Option<SurfaceClass> {
        surface.and_then(|tag| self.surface_classes.get(tag).copied())
    }

    /// Convex blend of plain distance and risk-scaled distance.
    pub fn edge_weight(
        &self,
        raw_distance: Meters,
        category: EdgeCategory,
        surface: Option<SurfaceClass>,
        alpha: f64,
    ) -> f64 {
        let scaled = raw_distance
            * self.surface_factors.factor(surface)
            * self.category_factors.factor(category);
        (1.0 - alpha) * raw_distance + alpha * scaled
    }

    /// All factors must be finite and non-negative so edge weights are too.
    pub fn validate(&self) -> Result<(), Error> {
        let s = &self.surface_factors;
        let c = &self.category_factors;
        let factors = [
            ("surface_factors.asphalt", s.asphalt),
            ("surface_factors.compacted", s.compacted),
            ("surface_factors.loose_and_rough", s.loose_and_rough),
            ("surface_factors.paved", s.paved),
            ("surface_factors.unknown", s.unknown),
            ("category_factors.designated_paths", c.designated_paths),
            ("category_factors.shared_with_pedestrian", c.shared_with_pedestrian),
            ("category_factors.shared_with_cars", c.shared_with_cars),
            ("category_factors.other", c.other),
        ];

        match factors
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(Error::InvalidConfiguration(format!(
                "{name} must be a non-negative number, got {value}"
            ))),
            None => Ok(()),
        }
    }
}
