//! Application services - Use case implementations

mod map_scene;
mod route_planner;

pub use map_scene::{
    DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL, DEFAULT_ZOOM, MapScene, MapSettings, Marker,
    MarkerKind, PanelInstruction, RoutePanel,
};
pub use route_planner::{PlannerConfig, RoutePlanner, WaypointInput, locate_within};
