//! Already-deserialized input feature records

use geo::Coord;
use serde_json::{Map, Value as JsonValue};

use crate::model::EdgeCategory;

pub const SHARED_WITH_CARS_TAG: &str = "shared with cars";
pub const DESIGNATED_PATHS_TAG: &str = "designated paths";
pub const SHARED_WITH_PEDESTRIAN_TAG: &str = "shared with pedestrian";
pub const SURFACE_TAG: &str = "surface";

/// Tags of a line feature relevant for scoring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureProperties {
    pub shared_with_cars: bool,
    pub designated_paths: bool,
    pub shared_with_pedestrian: bool,
    pub surface: Option<String>,
}

impl FeatureProperties {
    pub fn from_json(properties: &Map<String, JsonValue>) -> Self {
        let flag = |tag: &str| properties.get(tag).is_some_and(is_truthy);
        Self {
            shared_with_cars: flag(SHARED_WITH_CARS_TAG),
            designated_paths: flag(DESIGNATED_PATHS_TAG),
            shared_with_pedestrian: flag(SHARED_WITH_PEDESTRIAN_TAG),
            surface: properties
                .get(SURFACE_TAG)
                .and_then(JsonValue::as_str)
                .map(str::to_owned),
        }
    }

    /// Category with precedence cars > designated > pedestrian > none
    pub fn category(&self) -> EdgeCategory {
        if self.shared_with_cars {
            EdgeCategory::SharedWithCars
        } else if self.designated_paths {
            EdgeCategory::DesignatedPaths
        } else if self.shared_with_pedestrian {
            EdgeCategory::SharedWithPedestrian
        } else {
            EdgeCategory::NoInfrastructure
        }
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(flag) => *flag,
        JsonValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        JsonValue::String(text) => {
            let text = text.trim();
            !text.is_empty()
                && !text.eq_ignore_ascii_case("no")
                && !text.eq_ignore_ascii_case("false")
                && text != "0"
        }
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(map) => !map.is_empty(),
    }
}

/// Polyline of the network, x = longitude, y = latitude
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature {
    pub coordinates: Vec<Coord<f64>>,
    pub properties: FeatureProperties,
}

impl LineFeature {
    pub fn new(coordinates: Vec<Coord<f64>>, properties: FeatureProperties) -> Self {
        Self {
            coordinates,
            properties,
        }
    }
}

/// Point of interest, e.g. a bicycle parking location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointFeature {
    pub coordinate: Coord<f64>,
}
