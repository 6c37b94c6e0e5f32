//! Map scene assembly
//!
//! Builds the display payload handed to the map renderer from a route
//! session snapshot. Every coordinate in the scene is `[lat, lon]`.

use domain::{Coordinate, RouteSession, RouteStatus, TravelMode, Waypoint};
use serde::{Deserialize, Serialize};

/// Default tile layer URL template
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Default tile layer attribution
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Default zoom level when no route is shown
pub const DEFAULT_ZOOM: u8 = 13;

/// Base map settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Tile URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub tile_url: String,
    /// Attribution shown on the map
    pub attribution: String,
    /// Center when nothing is selected
    pub center: Coordinate,
    /// Zoom when nothing is selected
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            center: Coordinate::amsterdam(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Which endpoint a marker stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Route origin
    Start,
    /// Route destination
    End,
}

/// A marker on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Start or end
    pub kind: MarkerKind,
    /// Position as `[lat, lon]`
    pub position: [f64; 2],
    /// Popup text
    pub label: String,
}

impl Marker {
    fn from_waypoint(kind: MarkerKind, waypoint: &Waypoint) -> Self {
        Self {
            kind,
            position: waypoint.coordinate.to_lat_lon(),
            label: waypoint.display_name(),
        }
    }
}

/// Route summary panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePanel {
    /// e.g. `"49.50 km"`
    pub distance: String,
    /// e.g. `"41 min"`
    pub duration: String,
    /// Instruction lines with their distance labels
    pub instructions: Vec<PanelInstruction>,
}

/// One line of the instructions list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelInstruction {
    /// Instruction text
    pub text: String,
    /// e.g. `"0.50 km"`
    pub distance: String,
}

/// Everything the map renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapScene {
    /// Tile layer URL template
    pub tile_url: String,
    /// Tile layer attribution
    pub attribution: String,
    /// Initial view center as `[lat, lon]`
    pub center: [f64; 2],
    /// Initial zoom
    pub zoom: u8,
    /// Selected travel mode
    pub mode: TravelMode,
    /// Start and end markers that are set
    pub markers: Vec<Marker>,
    /// Route polyline as `[lat, lon]` pairs, empty without a route
    pub polyline: Vec<[f64; 2]>,
    /// Viewport to fit, as `[[south, west], [north, east]]`
    pub fit_bounds: Option<[[f64; 2]; 2]>,
    /// Whether the calculate control should be disabled
    pub pending: bool,
    /// Summary panel when a route is shown
    pub panel: Option<RoutePanel>,
    /// Notification for the last failed request
    pub notification: Option<String>,
}

impl MapScene {
    /// Assemble a scene from a session snapshot
    #[must_use]
    pub fn from_session(session: &RouteSession, settings: &MapSettings) -> Self {
        let markers: Vec<Marker> = [
            (MarkerKind::Start, session.start()),
            (MarkerKind::End, session.end()),
        ]
        .into_iter()
        .filter_map(|(kind, waypoint)| waypoint.map(|w| Marker::from_waypoint(kind, w)))
        .collect();

        let mut scene = Self {
            tile_url: settings.tile_url.clone(),
            attribution: settings.attribution.clone(),
            center: settings.center.to_lat_lon(),
            zoom: settings.zoom,
            mode: session.mode(),
            markers,
            polyline: Vec::new(),
            fit_bounds: None,
            pending: session.is_pending(),
            panel: None,
            notification: None,
        };

        match session.status() {
            RouteStatus::Success { result, .. } => {
                scene.polyline = result.path.iter().map(Coordinate::to_lat_lon).collect();
                if let Some(bounds) = result.bounds() {
                    scene.fit_bounds = Some(bounds.corners());
                    scene.center = bounds.center().to_lat_lon();
                }
                scene.panel = Some(RoutePanel {
                    distance: result.distance_label(),
                    duration: result.duration_label(),
                    instructions: result
                        .instructions
                        .iter()
                        .map(|step| PanelInstruction {
                            text: step.text.clone(),
                            distance: step.distance_label(),
                        })
                        .collect(),
                });
            },
            RouteStatus::Failed { failure, .. } => {
                scene.notification = Some(failure.message.clone());
            },
            RouteStatus::Idle | RouteStatus::Requesting { .. } => {},
        }

        scene
    }
}
