//! MapViewer CLI
//!
//! Terminal host for the route workflow: picks endpoints, requests a route
//! and renders the result as a text panel or as a JSON map scene.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{
    ApplicationError, GeocodingPort, MapScene, MarkerKind, RoutePlanner, WaypointInput,
    locate_within,
};
use clap::{Parser, Subcommand};
use domain::{Coordinate, Endpoint, TravelMode};
use infrastructure::{AppConfig, OpenRouteAdapter, StaticLocationAdapter, init_logging};
use tracing::debug;

/// MapViewer CLI
#[derive(Parser)]
#[command(name = "mapviewer-cli")]
#[command(author, version, about = "Route planning on OpenStreetMap data", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./mapviewer.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// openrouteservice API key
    #[arg(long, env = "ORS_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a route between two places
    ///
    /// Each endpoint is `here` (the host location), `lat,lon`, or a place name.
    /// Example: mapviewer-cli route --from "52.3733747,4.8833205" --to Rotterdam
    Route {
        /// Start location
        #[arg(long, allow_hyphen_values = true)]
        from: String,

        /// End location
        #[arg(long, allow_hyphen_values = true)]
        to: String,

        /// Travel mode (driving, cycling, walking)
        #[arg(short, long, default_value = "driving")]
        mode: TravelMode,

        /// Print the map scene as JSON instead of a text panel
        #[arg(long)]
        json: bool,
    },

    /// Look up the coordinates of a place
    Geocode {
        /// Place name or address
        text: String,
    },

    /// Look up the label of a coordinate
    Reverse {
        /// Latitude (-90 to 90)
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude (-180 to 180)
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Show the host location
    Locate,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the provider adapter, failing early on a missing credential
fn provider(config: &AppConfig) -> anyhow::Result<Arc<OpenRouteAdapter>> {
    config.validate().context("Invalid configuration")?;
    let adapter = OpenRouteAdapter::new(&config.openroute.to_openroute_config())?;
    Ok(Arc::new(adapter))
}

fn location_source(config: &AppConfig) -> Arc<StaticLocationAdapter> {
    let position = config
        .location
        .fixed
        .and_then(|fixed| fixed.to_coordinate());
    Arc::new(StaticLocationAdapter::new(position))
}

/// Resolve the host location within the configured timeout
async fn locate(config: &AppConfig) -> Result<Coordinate, ApplicationError> {
    locate_within(&*location_source(config), config.location.timeout_secs).await
}

/// Render the text panel for a scene
fn render_text(scene: &MapScene) -> String {
    let mut lines = Vec::new();

    let mode = scene.mode.label();
    lines.push(format!("🗺️  Route ({mode})"));
    for marker in &scene.markers {
        let name = match marker.kind {
            MarkerKind::Start => "Start",
            MarkerKind::End => "End",
        };
        lines.push(format!("   {name:<5} {}", marker.label));
    }

    if let Some(panel) = &scene.panel {
        lines.push(format!("📏 Distance: {}", panel.distance));
        lines.push(format!("⏱️  Duration: {}", panel.duration));
        if !panel.instructions.is_empty() {
            lines.push(String::new());
            lines.push("🧭 Instructions:".to_string());
            for (i, step) in panel.instructions.iter().enumerate() {
                lines.push(format!("   {:>2}. {} ({})", i + 1, step.text, step.distance));
            }
        }
    }

    if let Some(notification) = &scene.notification {
        lines.push(format!("⚠️  {notification}"));
    }

    lines.join("\n")
}

async fn run_route(
    config: &AppConfig,
    from: &str,
    to: &str,
    mode: TravelMode,
    json: bool,
) -> anyhow::Result<()> {
    let adapter = provider(config)?;
    let planner = RoutePlanner::new(adapter.clone(), adapter, config.planner_config())
        .with_location(location_source(config));

    planner.set_mode(mode);
    planner
        .set_endpoint(Endpoint::Start, WaypointInput::interpret(from))
        .await
        .with_context(|| format!("Could not use '{from}' as start"))?;
    planner
        .set_endpoint(Endpoint::End, WaypointInput::interpret(to))
        .await
        .with_context(|| format!("Could not use '{to}' as end"))?;

    let outcome = planner.compute_route().await;
    let scene = MapScene::from_session(&planner.snapshot(), &config.map.to_map_settings());
    debug!(markers = scene.markers.len(), points = scene.polyline.len(), "Scene assembled");

    if json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
    } else {
        println!("{}", render_text(&scene));
    }

    outcome.map(|_| ()).context("Route request failed")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(api_key) = cli.api_key {
        config = config.with_api_key(api_key);
    }

    // Set up logging based on verbosity
    init_logging(log_filter_from_verbosity(cli.verbose), config.log_format)?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Route {
            from,
            to,
            mode,
            json,
        } => run_route(&config, &from, &to, mode, json).await?,

        Commands::Geocode { text } => {
            let coordinate = provider(&config)?.resolve_place(&text).await?;
            println!("📍 {text}: {coordinate}");
        },

        Commands::Reverse {
            latitude,
            longitude,
        } => {
            let coordinate = Coordinate::new(latitude, longitude)?;
            let label = provider(&config)?.resolve_label(coordinate).await?;
            println!("{label}");
        },

        Commands::Locate => {
            let coordinate = locate(&config).await?;
            println!("📍 {coordinate}");
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::{LocationPort, MapSettings, Marker, PanelInstruction, RoutePanel};

    fn scene() -> MapScene {
        let mut scene =
            MapScene::from_session(&domain::RouteSession::default(), &MapSettings::default());
        scene.markers = vec![
            Marker {
                kind: MarkerKind::Start,
                position: [52.37, 4.88],
                label: "Amsterdam".to_string(),
            },
            Marker {
                kind: MarkerKind::End,
                position: [51.92, 4.47],
                label: "Rotterdam".to_string(),
            },
        ];
        scene
    }

    #[test]
    fn log_filter_verbosity_zero() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), "info");
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), "debug");
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn verbose_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["mapviewer-cli", "geocode", "-vv", "Rotterdam"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Geocode { text } if text == "Rotterdam"));
    }

    #[test]
    fn render_route_panel() {
        let mut scene = scene();
        scene.panel = Some(RoutePanel {
            distance: "49.50 km".to_string(),
            duration: "41 min".to_string(),
            instructions: vec![PanelInstruction {
                text: "Head west on Prins Hendrikkade".to_string(),
                distance: "1.20 km".to_string(),
            }],
        });

        let text = render_text(&scene);
        assert!(text.contains("Route (Car)"));
        assert!(text.contains("Start Amsterdam"));
        assert!(text.contains("End   Rotterdam"));
        assert!(text.contains("Distance: 49.50 km"));
        assert!(text.contains("Duration: 41 min"));
        assert!(text.contains(" 1. Head west on Prins Hendrikkade (1.20 km)"));
    }

    #[test]
    fn render_notification() {
        let mut scene = scene();
        scene.notification = Some("Network error: HTTP 503".to_string());

        let text = render_text(&scene);
        assert!(text.contains("Network error: HTTP 503"));
        assert!(!text.contains("Distance"));
    }

    #[test]
    fn missing_api_key_is_reported() {
        let err = provider(&AppConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("openroute.api_key"));
    }

    #[tokio::test]
    async fn unconfigured_location_source_is_empty() {
        let source = location_source(&AppConfig::default());
        assert!(source.resolve_device_location().await.is_err());
    }

    #[tokio::test]
    async fn locate_without_fixed_position_is_unavailable() {
        let err = locate(&AppConfig::default()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::LocationUnavailable(_)));
    }

    #[tokio::test]
    async fn fixed_location_is_reported() {
        let mut config = AppConfig::default();
        config.location.fixed = Some(Coordinate::amsterdam().into());

        let source = location_source(&config);
        assert_eq!(
            source.resolve_device_location().await.unwrap(),
            Coordinate::amsterdam()
        );
        assert_eq!(locate(&config).await.unwrap(), Coordinate::amsterdam());
    }
}
