//! Ranking the registry against the caller's position.

use efarmer_core::{Facility, FacilityRegistry};
use serde::Serialize;

use crate::geo::haversine_km;
use crate::position::{PositionError, PositionReader};

/// A facility plus its distance from the caller.
///
/// `distance_km` is `None` only for fallback results, and is then omitted
/// from serialized output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacility {
    #[serde(flatten)]
    pub facility: Facility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocateOutcome {
    pub results: Vec<RankedFacility>,
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Rank `registry` by distance from the caller and keep the closest `limit`.
///
/// Reads the position exactly once through `reader`. If the read fails (or
/// yields out-of-range coordinates) the first `limit` registry entries are
/// returned in declared order with no distances, `used_fallback` set, and a
/// human-readable `error_message`. This function never fails.
///
/// A `limit` of zero is treated as one.
pub async fn locate_nearest<R>(
    registry: &FacilityRegistry,
    reader: &R,
    limit: usize,
) -> LocateOutcome
where
    R: PositionReader + Sync,
{
    let limit = limit.max(1);

    let position = match reader.read_position().await {
        Ok(pos) if pos.is_valid() => Ok(pos),
        Ok(pos) => {
            tracing::warn!(
                latitude = pos.latitude,
                longitude = pos.longitude,
                "position reader returned out-of-range coordinates"
            );
            Err(PositionError::Unavailable)
        }
        Err(e) => Err(e),
    };

    match position {
        Ok(here) => {
            let mut ranked: Vec<RankedFacility> = registry
                .iter()
                .map(|facility| RankedFacility {
                    distance_km: Some(haversine_km(here, facility.coordinates())),
                    facility: facility.clone(),
                })
                .collect();

            // `sort_by` is stable: equal distances keep registry order.
            ranked.sort_by(|a, b| {
                let a = a.distance_km.unwrap_or(f64::INFINITY);
                let b = b.distance_km.unwrap_or(f64::INFINITY);
                a.total_cmp(&b)
            });
            ranked.truncate(limit);

            tracing::debug!(
                results = ranked.len(),
                nearest = ranked.first().map(|r| r.facility.id.as_str()),
                "ranked facilities by distance"
            );

            LocateOutcome {
                results: ranked,
                used_fallback: false,
                error_message: None,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "position unavailable; returning default facility list");
            LocateOutcome {
                results: registry
                    .iter()
                    .take(limit)
                    .map(|facility| RankedFacility {
                        facility: facility.clone(),
                        distance_km: None,
                    })
                    .collect(),
                used_fallback: true,
                error_message: Some(fallback_message(e)),
            }
        }
    }
}

fn fallback_message(error: PositionError) -> String {
    format!("Could not get your location ({error}). Showing the default facility list instead.")
}

#[cfg(test)]
#[path = "locate_test.rs"]
mod tests;
