//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - openrouteservice adapter error mapping against a mock server
//! - The full route workflow from endpoint selection to map scene
//! - Configuration file loading

use std::sync::Arc;

use application::{
    ApplicationError, GeocodingPort, MapScene, MapSettings, PlannerConfig, RoutePlanner,
    RoutingPort, WaypointInput,
};
use domain::{Coordinate, Endpoint, RouteErrorKind, TravelMode};
use integration_openroute::OpenRouteConfig;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use infrastructure::{AppConfig, LogFormat, OpenRouteAdapter, StaticLocationAdapter};

fn amsterdam() -> Coordinate {
    Coordinate::new(52.373_374_7, 4.883_320_5).unwrap()
}

fn rotterdam() -> Coordinate {
    Coordinate::new(51.920_223, 4.474_991_9).unwrap()
}

fn adapter_for(server: &MockServer) -> Arc<OpenRouteAdapter> {
    Arc::new(OpenRouteAdapter::new(&OpenRouteConfig::for_testing(&server.uri())).unwrap())
}

const fn route_json() -> &'static str {
    r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[4.88, 52.37], [4.47, 51.92]] },
            "properties": {
                "summary": { "distance": 49500.0, "duration": 2460.0 },
                "segments": [{
                    "steps": [
                        { "distance": 1200.0, "instruction": "Head west on Prins Hendrikkade" },
                        { "distance": 48300.0, "instruction": "Continue straight onto A4" },
                        { "distance": 0.0, "instruction": "Arrive at Coolsingel" }
                    ]
                }]
            }
        }]
    }"#
}

fn place_json(lon: f64, lat: f64, label: &str) -> String {
    format!(
        r#"{{
            "type": "FeatureCollection",
            "features": [{{
                "type": "Feature",
                "geometry": {{ "type": "Point", "coordinates": [{lon}, {lat}] }},
                "properties": {{ "label": "{label}" }}
            }}]
        }}"#
    )
}

const fn empty_collection() -> &'static str {
    r#"{ "type": "FeatureCollection", "features": [] }"#
}

// ============================================================================
// Adapter Tests
// ============================================================================

mod adapter_tests {
    use super::*;

    #[tokio::test]
    async fn server_error_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/directions/driving-car"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = adapter_for(&server)
            .compute_route(amsterdam(), rotterdam(), TravelMode::Driving)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Network(_)));
    }

    #[tokio::test]
    async fn empty_route_is_route_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/directions/driving-car"))
            .respond_with(ResponseTemplate::new(200).set_body_string(empty_collection()))
            .mount(&server)
            .await;

        let err = adapter_for(&server)
            .compute_route(amsterdam(), rotterdam(), TravelMode::Driving)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::RouteNotFound(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/directions/driving-car"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = adapter_for(&server)
            .compute_route(amsterdam(), rotterdam(), TravelMode::Driving)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Provider(_)));
    }

    #[tokio::test]
    async fn blank_place_name_is_invalid_input() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(empty_collection()))
            .expect(0)
            .mount(&server)
            .await;

        let err = adapter_for(&server).resolve_place("  ").await.unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn unknown_place_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(empty_collection()))
            .mount(&server)
            .await;

        let err = adapter_for(&server)
            .resolve_place("Atlantis")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_label_is_empty_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_string(empty_collection()))
            .mount(&server)
            .await;

        let label = adapter_for(&server)
            .resolve_label(Coordinate::new(0.0, -30.0).unwrap())
            .await
            .unwrap();

        assert!(label.is_empty());
    }

    #[tokio::test]
    async fn label_comes_from_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/reverse"))
            .and(query_param("point.lat", "52.3733747"))
            .and(query_param("point.lon", "4.8833205"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(place_json(4.883_320_5, 52.373_374_7, "Dam, Amsterdam")),
            )
            .mount(&server)
            .await;

        let label = adapter_for(&server)
            .resolve_label(amsterdam())
            .await
            .unwrap();

        assert_eq!(label, "Dam, Amsterdam");
    }
}

// ============================================================================
// Route Workflow Tests
// ============================================================================

mod workflow_tests {
    use super::*;

    fn planner_for(server: &MockServer) -> RoutePlanner {
        let adapter = adapter_for(server);
        RoutePlanner::new(adapter.clone(), adapter, PlannerConfig::default())
            .with_location(Arc::new(StaticLocationAdapter::new(Some(amsterdam()))))
    }

    async fn mount_reverse(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/geocode/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_string(empty_collection()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn amsterdam_to_rotterdam_by_car() {
        let server = MockServer::start().await;
        mount_reverse(&server).await;
        Mock::given(method("GET"))
            .and(path("/geocode/search"))
            .and(query_param("text", "Rotterdam"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(place_json(4.474_991_9, 51.920_223, "Rotterdam, ZH, Netherlands")),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/directions/driving-car"))
            .and(query_param("start", "4.8833205,52.3733747"))
            .and(query_param("end", "4.4749919,51.920223"))
            .and(header("authorization", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(route_json()))
            .expect(1)
            .mount(&server)
            .await;

        let planner = planner_for(&server);
        planner
            .set_endpoint(Endpoint::Start, WaypointInput::DeviceLocation)
            .await
            .unwrap();
        planner
            .set_endpoint(Endpoint::End, WaypointInput::PlaceName("Rotterdam".to_string()))
            .await
            .unwrap();

        let route = planner.compute_route().await.unwrap();
        assert_eq!(route.distance_label(), "49.50 km");
        assert_eq!(route.duration_label(), "41 min");

        let scene = MapScene::from_session(&planner.snapshot(), &MapSettings::default());
        assert_eq!(scene.polyline, vec![[52.37, 4.88], [51.92, 4.47]]);
        assert_eq!(scene.markers[1].label, "Rotterdam");
        let panel = scene.panel.unwrap();
        assert_eq!(panel.distance, "49.50 km");
        assert_eq!(panel.duration, "41 min");
        assert_eq!(panel.instructions.len(), 3);
    }

    #[tokio::test]
    async fn provider_failure_is_recorded_for_retry() {
        let server = MockServer::start().await;
        mount_reverse(&server).await;
        Mock::given(method("GET"))
            .and(path("/v2/directions/cycling-regular"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let planner = planner_for(&server);
        planner.set_mode(TravelMode::Cycling);
        planner
            .set_endpoint(Endpoint::Start, WaypointInput::Coordinate(amsterdam()))
            .await
            .unwrap();
        planner
            .set_endpoint(Endpoint::End, WaypointInput::Coordinate(rotterdam()))
            .await
            .unwrap();

        assert!(planner.compute_route().await.is_err());

        let session = planner.snapshot();
        assert_eq!(session.failure().map(|f| f.kind), Some(RouteErrorKind::Network));
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn unset_endpoint_makes_no_request() {
        let server = MockServer::start().await;
        mount_reverse(&server).await;
        Mock::given(method("GET"))
            .and(path("/v2/directions/driving-car"))
            .respond_with(ResponseTemplate::new(200).set_body_string(route_json()))
            .expect(0)
            .mount(&server)
            .await;

        let planner = planner_for(&server);
        planner
            .set_endpoint(Endpoint::Start, WaypointInput::Coordinate(amsterdam()))
            .await
            .unwrap();

        let err = planner.compute_route().await.unwrap_err();
        assert_eq!(err, ApplicationError::MissingEndpoint(Endpoint::End));
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod config_tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
default_mode = "walking"
log_format = "json"

[openroute]
api_key = "file-key"
timeout_secs = 7

[map]
zoom = 11

[location]
fixed = {{ latitude = 52.09, longitude = 5.12 }}
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.default_mode, TravelMode::Walking);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.openroute.timeout_secs, 7);
        assert_eq!(config.openroute.to_openroute_config().api_key, "file-key");
        assert_eq!(config.openroute.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.map.zoom, 11);
        assert_eq!(
            config.location.fixed.and_then(|f| f.to_coordinate()),
            Some(Coordinate::new(52.09, 5.12).unwrap())
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_explicit_file_fails() {
        let result = AppConfig::load(Some(std::path::Path::new("/nonexistent/mapviewer.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn api_key_is_never_serialized() {
        let config = AppConfig::default().with_api_key("super-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
    }
}
