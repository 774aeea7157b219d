//! Conversion of parsed GeoJSON into feature records

use geo::{Coord, Geometry as GeoGeometry, LineString};
use geojson::FeatureCollection;
use log::debug;

use crate::{
    Error,
    model::{FeatureProperties, LineFeature, PointFeature},
};

/// Line and point features of one or more collections, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    pub lines: Vec<LineFeature>,
    pub points: Vec<PointFeature>,
}

impl FeatureSet {
    /// Appends another set, keeping order.
    pub fn merge(&mut self, other: FeatureSet) {
        self.lines.extend(other.lines);
        self.points.extend(other.points);
    }

    pub fn point_coordinates(&self) -> Vec<Coord<f64>> {
        self.points.iter().map(|point| point.coordinate).collect()
    }
}

/// Splits a feature collection into line and point records.
///
/// `LineString` and `MultiLineString` parts become lines, `Point` and
/// `MultiPoint` members become points. Features without geometry and other
/// geometry types are ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if a geometry cannot be converted.
pub fn features_from_geojson(collection: &FeatureCollection) -> Result<FeatureSet, Error> {
    let mut set = FeatureSet::default();
    let mut ignored = 0usize;

    for feature in &collection.features {
        let Some(geometry) = &feature.geometry else {
            ignored += 1;
            continue;
        };
        let geometry = GeoGeometry::<f64>::try_from(&geometry.value)
            .map_err(|e| Error::InvalidData(format!("unsupported geometry: {e}")))?;
        let properties = feature
            .properties
            .as_ref()
            .map(FeatureProperties::from_json)
            .unwrap_or_default();

        match geometry {
            GeoGeometry::LineString(line) => set.lines.push(to_line(line, properties)),
            GeoGeometry::MultiLineString(lines) => set.lines.extend(
                lines
                    .into_iter()
                    .map(|line| to_line(line, properties.clone())),
            ),
            GeoGeometry::Point(point) => set.points.push(PointFeature {
                coordinate: point.0,
            }),
            GeoGeometry::MultiPoint(points) => set.points.extend(
                points
                    .into_iter()
                    .map(|point| PointFeature {
                        coordinate: point.0,
                    }),
            ),
            _ => ignored += 1,
        }
    }

    debug!(
        "Read {} line and {} point features ({} ignored)",
        set.lines.len(),
        set.points.len(),
        ignored
    );
    Ok(set)
}

fn to_line(line: LineString<f64>, properties: FeatureProperties) -> LineFeature {
    LineFeature::new(line.0, properties)
}
