use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::{Map, Value as JsonValue, json};

use super::Itinerary;
use crate::{Error, RoutingGraph, routing::NetworkPath};

impl Itinerary {
    /// Bike leg, walk leg and parking location as a `GeoJSON` `FeatureCollection`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeoJson`] if a feature cannot be assembled.
    pub fn to_geojson(&self, graph: &RoutingGraph) -> Result<FeatureCollection, Error> {
        let mut features = vec![leg_feature(
            graph,
            &self.bike_leg,
            "bike",
            self.bike_time.as_secs_f64() / 60.0,
        )?];

        if let Some(walk) = &self.walk_leg {
            features.push(leg_feature(
                graph,
                walk,
                "walk",
                self.walk_time.as_secs_f64() / 60.0,
            )?);
        }

        let parking = graph
            .node(self.parking)
            .ok_or(Error::UnknownNode(self.parking))?;
        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeoJsonValue::from(&parking.geometry())),
            "properties": {
                "leg_type": "parking",
                "total_distance_km": self.total_distance_km(),
                "total_duration_min": self.total_time.as_secs_f64() / 60.0,
            }
        });
        features.push(Feature::from_json_value(value).map_err(|e| Error::GeoJson(e.to_string()))?);

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, graph: &RoutingGraph) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(graph)?).map_err(|e| Error::GeoJson(e.to_string()))
    }
}

fn leg_feature(
    graph: &RoutingGraph,
    path: &NetworkPath,
    leg_type: &str,
    duration_min: f64,
) -> Result<Feature, Error> {
    let geometry = if path.nodes.len() < 2 {
        let source = path
            .source()
            .ok_or_else(|| Error::GeoJson(format!("{leg_type} leg has no nodes")))?;
        let node = graph.node(source).ok_or(Error::UnknownNode(source))?;
        Geometry::new(GeoJsonValue::from(&node.geometry()))
    } else {
        Geometry::new(GeoJsonValue::from(&path.line_string(graph)))
    };

    let categories: Map<String, JsonValue> = path
        .category_breakdown(graph)
        .into_iter()
        .map(|(category, metres)| (category.as_str().to_string(), json!(metres / 1000.0)))
        .collect();

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_type": leg_type,
            "distance_km": path.distance_km(),
            "duration_min": duration_min,
            "categories_km": categories,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJson(e.to_string()))
}
