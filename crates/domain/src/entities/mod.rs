//! Domain entities - Route results and the route session

mod route;
mod route_session;
mod waypoint;

pub use route::{
    BoundingBox, Instruction, RouteResult, format_distance_km, format_duration_minutes,
    meters_to_km, seconds_to_minutes,
};
pub use route_session::{
    Rejection, RequestId, RouteErrorKind, RouteFailure, RouteRequest, RouteSession, RouteStatus,
    SessionEvent, Transition,
};
pub use waypoint::{Endpoint, Waypoint};
