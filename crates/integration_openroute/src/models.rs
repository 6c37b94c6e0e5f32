//! Raw openrouteservice response types and their normalisation
//!
//! Both the directions and the geocoding endpoints answer with a GeoJSON
//! `FeatureCollection`. Only the fields the application reads are modelled.

use domain::{Coordinate, Instruction, RouteResult, meters_to_km, seconds_to_minutes};
use serde::Deserialize;

use crate::error::OpenRouteError;

/// Convert a GeoJSON position (`[longitude, latitude, ...]`) to a domain coordinate
///
/// This is the only place where provider order is turned into the
/// `(latitude, longitude)` order used everywhere else. Extra elements such
/// as elevation are ignored.
///
/// # Errors
///
/// Returns `OpenRouteError::ParseError` if the position has fewer than two
/// elements or lies outside the valid coordinate ranges.
pub fn coordinate_from_position(position: &[f64]) -> Result<Coordinate, OpenRouteError> {
    let [longitude, latitude, ..] = position else {
        return Err(OpenRouteError::ParseError(format!(
            "position needs longitude and latitude, got {position:?}"
        )));
    };
    Coordinate::new(*latitude, *longitude).map_err(|e| OpenRouteError::ParseError(e.to_string()))
}

/// Format a coordinate as the `longitude,latitude` pair the directions endpoint expects
pub(crate) fn lon_lat_param(coordinate: &Coordinate) -> String {
    format!("{},{}", coordinate.longitude(), coordinate.latitude())
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "G: Deserialize<'de>, P: Deserialize<'de> + Default"))]
pub(crate) struct FeatureCollection<G, P> {
    #[serde(default = "Vec::new")]
    pub features: Vec<Feature<G, P>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature<G, P> {
    pub geometry: Geometry<G>,
    #[serde(default)]
    pub properties: P,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry<G> {
    pub coordinates: G,
}

/// `LineString` positions
pub(crate) type LineString = Vec<Vec<f64>>;

/// `Point` position
pub(crate) type Point = Vec<f64>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RouteProperties {
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Route totals; the provider omits fields that are zero
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Summary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Segment {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Step {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlaceProperties {
    pub label: Option<String>,
}

pub(crate) type DirectionsResponse = FeatureCollection<LineString, RouteProperties>;
pub(crate) type GeocodeResponse = FeatureCollection<Point, PlaceProperties>;

/// Turn a route feature into a display-ready result
///
/// Positions are reordered, meters become kilometers, seconds become
/// minutes, and the first segment's steps become instructions.
pub(crate) fn normalize_route(
    feature: Feature<LineString, RouteProperties>,
) -> Result<RouteResult, OpenRouteError> {
    let path = feature
        .geometry
        .coordinates
        .iter()
        .map(|position| coordinate_from_position(position))
        .collect::<Result<Vec<_>, _>>()?;

    let RouteProperties { summary, segments } = feature.properties;

    let instructions = segments
        .into_iter()
        .next()
        .map(|segment| {
            segment
                .steps
                .into_iter()
                .map(|step| Instruction::new(step.instruction, meters_to_km(step.distance)))
                .collect()
        })
        .unwrap_or_default();

    Ok(RouteResult::new(
        path,
        meters_to_km(summary.distance),
        seconds_to_minutes(summary.duration),
        instructions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_is_reordered() {
        let c = coordinate_from_position(&[4.88, 52.37]).unwrap();
        assert!((c.latitude() - 52.37).abs() < f64::EPSILON);
        assert!((c.longitude() - 4.88).abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_with_elevation() {
        let c = coordinate_from_position(&[4.88, 52.37, 3.5]).unwrap();
        assert!((c.latitude() - 52.37).abs() < f64::EPSILON);
    }

    #[test]
    fn test_short_position_rejected() {
        assert!(matches!(
            coordinate_from_position(&[4.88]),
            Err(OpenRouteError::ParseError(_))
        ));
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        // latitude 120 after reordering
        assert!(coordinate_from_position(&[4.0, 120.0]).is_err());
    }

    #[test]
    fn test_lon_lat_param() {
        let c = Coordinate::new(52.37, 4.88).unwrap();
        assert_eq!(lon_lat_param(&c), "4.88,52.37");
    }

    #[test]
    fn test_normalize_route() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": [[4.88, 52.37], [4.47, 51.92]] },
                "properties": {
                    "summary": { "distance": 12345.0, "duration": 5400.0 },
                    "segments": [{
                        "distance": 12345.0,
                        "duration": 5400.0,
                        "steps": [
                            { "distance": 245.3, "duration": 40.1, "type": 11, "instruction": "Head south on Damrak", "name": "Damrak", "way_points": [0, 4] },
                            { "distance": 0.0, "duration": 0.0, "type": 10, "instruction": "Arrive at your destination", "name": "-", "way_points": [120, 120] }
                        ]
                    }]
                }
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let feature = response.features.into_iter().next().unwrap();
        let route = normalize_route(feature).unwrap();

        assert_eq!(route.path.len(), 2);
        assert_eq!(route.path[0].to_lat_lon(), [52.37, 4.88]);
        assert_eq!(route.path[1].to_lat_lon(), [51.92, 4.47]);
        assert!((route.distance_km - 12.345).abs() < 1e-9);
        assert_eq!(route.duration_minutes, 90);
        assert_eq!(route.instructions.len(), 2);
        assert_eq!(route.instructions[0].text, "Head south on Damrak");
        assert!((route.instructions[0].distance_km - 0.2453).abs() < 1e-9);
        assert_eq!(route.instructions[1].text, "Arrive at your destination");
    }

    #[test]
    fn test_missing_summary_fields_default_to_zero() {
        let json = r#"{
            "features": [{
                "geometry": { "coordinates": [[4.88, 52.37], [4.88, 52.37]] },
                "properties": { "summary": {} }
            }]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let route = normalize_route(response.features.into_iter().next().unwrap()).unwrap();
        assert!(route.distance_km.abs() < f64::EPSILON);
        assert_eq!(route.duration_minutes, 0);
        assert!(route.instructions.is_empty());
    }

    #[test]
    fn test_geocode_response_parsing() {
        let json = r#"{
            "features": [{
                "geometry": { "type": "Point", "coordinates": [4.8833205, 52.3733747] },
                "properties": { "label": "Amsterdam, NH, Netherlands", "confidence": 1 }
            }]
        }"#;
        let response: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.features.len(), 1);
        assert_eq!(
            response.features[0].properties.label.as_deref(),
            Some("Amsterdam, NH, Netherlands")
        );
    }

    #[test]
    fn test_empty_feature_collection() {
        let response: GeocodeResponse = serde_json::from_str(r#"{ "features": [] }"#).unwrap();
        assert!(response.features.is_empty());

        let response: DirectionsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.features.is_empty());
    }

    proptest! {
        #[test]
        fn every_position_is_swapped(
            points in prop::collection::vec((-180.0f64..=180.0f64, -90.0f64..=90.0f64), 1..40)
        ) {
            let geometry: LineString = points.iter().map(|(lon, lat)| vec![*lon, *lat]).collect();
            let feature = Feature {
                geometry: Geometry { coordinates: geometry },
                properties: RouteProperties::default(),
            };
            let route = normalize_route(feature).unwrap();

            prop_assert_eq!(route.path.len(), points.len());
            for (c, (lon, lat)) in route.path.iter().zip(&points) {
                prop_assert_eq!(c.to_lat_lon(), [*lat, *lon]);
            }
        }
    }
}
