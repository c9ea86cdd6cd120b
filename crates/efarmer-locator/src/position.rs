//! One-shot position reading.
//!
//! Platform geolocation APIs are callback-driven; [`PositionReader`] exposes
//! them as a future that resolves exactly once with a position or a failure.

use std::future::Future;

use efarmer_core::Coordinates;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionError {
    #[error("location permission was denied")]
    PermissionDenied,

    #[error("location is unavailable")]
    Unavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("location is not supported on this device")]
    Unsupported,
}

impl PositionError {
    /// Map a caller-reported failure code onto a known kind.
    ///
    /// Accepts the snake_case names, the browser's `PERMISSION_DENIED` style
    /// constants, and their numeric codes. Any other code still reports a
    /// failed read, so it becomes `Unavailable`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "permission_denied" | "1" => Self::PermissionDenied,
            "timeout" | "3" => Self::Timeout,
            "unsupported" | "not_supported" => Self::Unsupported,
            _ => Self::Unavailable,
        }
    }
}

/// A single-resolution source of the caller's current position.
pub trait PositionReader {
    /// Read the current position once. Implementations must not retry.
    fn read_position(&self) -> impl Future<Output = Result<Coordinates, PositionError>> + Send;
}

/// Always resolves to the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl PositionReader for FixedPosition {
    async fn read_position(&self) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

/// The outcome of a position read performed by a remote caller, such as a
/// browser that ran its own geolocation prompt and forwarded the result.
#[derive(Debug, Clone, Copy)]
pub struct ReportedPosition(Result<Coordinates, PositionError>);

impl ReportedPosition {
    #[must_use]
    pub fn located(coordinates: Coordinates) -> Self {
        Self(Ok(coordinates))
    }

    #[must_use]
    pub fn failed(error: PositionError) -> Self {
        Self(Err(error))
    }

    /// Build from the loose fields a caller submits.
    ///
    /// An explicit failure wins over coordinates. A missing latitude or
    /// longitude without a reported failure counts as `Unavailable`.
    #[must_use]
    pub fn from_report(
        latitude: Option<f64>,
        longitude: Option<f64>,
        error: Option<PositionError>,
    ) -> Self {
        match (error, latitude, longitude) {
            (Some(err), _, _) => Self::failed(err),
            (None, Some(lat), Some(lng)) => Self::located(Coordinates::new(lat, lng)),
            _ => Self::failed(PositionError::Unavailable),
        }
    }
}

impl PositionReader for ReportedPosition {
    async fn read_position(&self) -> Result<Coordinates, PositionError> {
        self.0
    }
}

/// For hosts with no position capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPositionCapability;

impl PositionReader for NoPositionCapability {
    async fn read_position(&self) -> Result<Coordinates, PositionError> {
        Err(PositionError::Unsupported)
    }
}
