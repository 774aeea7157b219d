use geo::Coord;
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use log::debug;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use serde_json::{Map, Value as JsonValue, json};
use veloroute_core::prelude::*;

/// Single-leg safety-weighted route
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: NetworkPath,
    pub distance_km: f64,
}

impl Route {
    fn new(path: NetworkPath) -> Self {
        let distance_km = path.distance_km();
        Self { path, distance_km }
    }

    /// Route as a `GeoJSON` line feature with the distance per edge category.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeoJson`] if the feature cannot be assembled.
    pub fn to_geojson(&self, graph: &RoutingGraph) -> Result<Feature, Error> {
        let categories: Map<String, JsonValue> = self
            .path
            .category_breakdown(graph)
            .into_iter()
            .map(|(category, metres)| (category.to_string(), json!(metres / 1000.0)))
            .collect();

        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeoJsonValue::from(&self.path.line_string(graph))),
            "properties": {
                "distance_km": self.distance_km,
                "cost": self.path.cost,
                "categories_km": categories,
            }
        });
        Feature::from_json_value(value).map_err(|e| Error::GeoJson(e.to_string()))
    }
}

/// Parses GeoJSON text into line and point features.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if the text is not a GeoJSON feature
/// collection or holds an unconvertible geometry.
pub fn parse_features(geojson: &str) -> Result<FeatureSet, Error> {
    let collection = geojson
        .parse::<geojson::GeoJson>()
        .and_then(geojson::FeatureCollection::try_from)
        .map_err(|e| Error::InvalidData(e.to_string()))?;
    features_from_geojson(&collection)
}

/// Builds a graph with the default scoring and automatic projection.
///
/// # Errors
///
/// See [`veloroute_core::build_graph`].
pub fn build_graph(features: &[LineFeature], alpha: f64) -> Result<RoutingGraph, Error> {
    veloroute_core::build_graph(features, &NetworkConfig::with_alpha(alpha))
}

/// Nearest node to `point` and its distance in metres.
///
/// # Errors
///
/// Returns an error if `point` cannot be projected.
pub fn resolve_nearest(
    graph: &RoutingGraph,
    point: Coord<f64>,
) -> Result<(NodeIndex, Meters), Error> {
    graph.resolve_nearest(point)
}

/// Safety-weighted route between the nodes nearest to `start` and `end`.
///
/// Returns `Ok(None)` when the two nodes are not connected.
///
/// # Errors
///
/// Returns an error if a point cannot be resolved.
pub fn route(
    graph: &RoutingGraph,
    start: Coord<f64>,
    end: Coord<f64>,
) -> Result<Option<Route>, Error> {
    let (from, _) = graph.resolve_nearest(start)?;
    let (to, _) = graph.resolve_nearest(end)?;

    match shortest_path(graph, from, to, WeightKind::Safety) {
        Ok(path) => Ok(Some(Route::new(path))),
        Err(Error::NoPathFound { from, to }) => {
            debug!("No route between {from} and {to}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Routes from one start to many ends in parallel, results in `ends` order.
///
/// # Errors
///
/// Returns an error if `start` cannot be resolved; failures for single ends
/// are reported in their own slot.
pub fn route_one_to_many(
    graph: &RoutingGraph,
    start: Coord<f64>,
    ends: &[Coord<f64>],
) -> Result<Vec<Result<Option<Route>, Error>>, Error> {
    // Fail once for a bad start instead of once per end
    graph.resolve_nearest(start)?;

    let routes: Vec<_> = ends
        .par_iter()
        .map(|&end| route(graph, start, end))
        .collect();
    Ok(routes)
}

/// Copy of `graph` with the given parking locations.
///
/// # Errors
///
/// See [`veloroute_core::augment_with_parking`].
pub fn augment_with_parking(
    graph: &RoutingGraph,
    parking_points: &[Coord<f64>],
) -> Result<RoutingGraph, Error> {
    veloroute_core::augment_with_parking(graph, parking_points)
}

/// Best bike-then-walk itinerary at the given speeds (km/h).
///
/// # Errors
///
/// See [`veloroute_core::optimize_multimodal`].
pub fn optimize_multimodal(
    graph: &RoutingGraph,
    start: Coord<f64>,
    end: Coord<f64>,
    bike_kmh: f64,
    walk_kmh: f64,
) -> Result<Itinerary, Error> {
    veloroute_core::optimize_multimodal(graph, start, end, &TravelSpeeds::new(bike_kmh, walk_kmh))
}
