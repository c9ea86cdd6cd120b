//! Nearest-facility locator.
//!
//! Reads the caller's position once, ranks the facility registry by
//! great-circle distance, and falls back to the registry's declared order
//! when no position can be obtained.

pub mod geo;
pub mod locate;
pub mod position;

pub use geo::{haversine_km, EARTH_RADIUS_KM};
pub use locate::{locate_nearest, LocateOutcome, RankedFacility};
pub use position::{
    FixedPosition, NoPositionCapability, PositionError, PositionReader, ReportedPosition,
};
