use std::sync::atomic::{AtomicUsize, Ordering};

use efarmer_core::{Coordinates, Facility, FacilityRegistry};

use super::*;
use crate::position::{FixedPosition, NoPositionCapability, ReportedPosition};

fn facility(id: &str, lat: f64, lng: f64) -> Facility {
    Facility {
        id: id.to_string(),
        name: format!("Facility {id}"),
        address: "Gulu District".to_string(),
        latitude: lat,
        longitude: lng,
        services: vec![],
    }
}

/// Declared order is deliberately not distance order from Gulu town.
fn gulu_registry() -> FacilityRegistry {
    FacilityRegistry::new(vec![
        facility("koro", 2.6167, 32.2000),
        facility("awach", 2.9167, 32.4167),
        facility("town", 2.7724, 32.2881),
        facility("lacor", 2.7668, 32.2341),
        facility("unyama", 2.6953, 32.3365),
    ])
    .expect("valid registry")
}

fn gulu_town() -> FixedPosition {
    FixedPosition(Coordinates::new(2.7730, 32.2890))
}

struct CountingReader {
    calls: AtomicUsize,
    result: Result<Coordinates, PositionError>,
}

impl CountingReader {
    fn new(result: Result<Coordinates, PositionError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            result,
        }
    }
}

impl PositionReader for CountingReader {
    async fn read_position(&self) -> Result<Coordinates, PositionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
    }
}

fn ids(outcome: &LocateOutcome) -> Vec<&str> {
    outcome
        .results
        .iter()
        .map(|r| r.facility.id.as_str())
        .collect()
}

#[tokio::test]
async fn ranks_nearest_first_and_truncates() {
    let outcome = locate_nearest(&gulu_registry(), &gulu_town(), 3).await;

    assert!(!outcome.used_fallback);
    assert!(outcome.error_message.is_none());
    assert_eq!(ids(&outcome), vec!["town", "lacor", "unyama"]);
}

#[tokio::test]
async fn success_results_are_sorted_non_decreasing_for_many_positions() {
    let registry = gulu_registry();
    let positions = [
        (2.7730, 32.2890),
        (0.0, 0.0),
        (-33.9, 18.4),
        (51.5, -0.12),
        (2.9, 32.4),
        (90.0, 180.0),
    ];

    for (lat, lng) in positions {
        for limit in 1..=7 {
            let reader = FixedPosition(Coordinates::new(lat, lng));
            let outcome = locate_nearest(&registry, &reader, limit).await;

            assert!(!outcome.used_fallback);
            assert_eq!(outcome.results.len(), limit.min(registry.len()));
            let distances: Vec<f64> = outcome
                .results
                .iter()
                .map(|r| r.distance_km.expect("success path has distances"))
                .collect();
            assert!(
                distances.windows(2).all(|w| w[0] <= w[1]),
                "not sorted for ({lat}, {lng}) limit {limit}: {distances:?}"
            );
        }
    }
}

#[tokio::test]
async fn equal_distances_keep_registry_order() {
    let registry = FacilityRegistry::new(vec![
        facility("east", 0.0, 1.0),
        facility("west", 0.0, -1.0),
        facility("north", 1.0, 0.0),
    ])
    .unwrap();
    let origin = FixedPosition(Coordinates::new(0.0, 0.0));

    let outcome = locate_nearest(&registry, &origin, 3).await;

    assert_eq!(ids(&outcome), vec!["east", "west", "north"]);
}

#[tokio::test]
async fn fallback_returns_declared_prefix_without_distances() {
    let registry = gulu_registry();
    let failures = [
        PositionError::PermissionDenied,
        PositionError::Unavailable,
        PositionError::Timeout,
        PositionError::Unsupported,
    ];

    for failure in failures {
        for limit in 1..=7 {
            let reader = ReportedPosition::failed(failure);
            let outcome = locate_nearest(&registry, &reader, limit).await;

            assert!(outcome.used_fallback);
            let expected: Vec<&str> = registry
                .iter()
                .take(limit)
                .map(|f| f.id.as_str())
                .collect();
            assert_eq!(ids(&outcome), expected);
            assert!(outcome.results.iter().all(|r| r.distance_km.is_none()));
            let message = outcome.error_message.as_deref().expect("fallback message");
            assert!(message.contains("default facility list"), "{message}");
        }
    }
}

#[tokio::test]
async fn missing_capability_uses_fallback() {
    let outcome = locate_nearest(&gulu_registry(), &NoPositionCapability, 2).await;
    assert!(outcome.used_fallback);
    assert_eq!(ids(&outcome), vec!["koro", "awach"]);
    assert!(outcome
        .error_message
        .as_deref()
        .is_some_and(|m| m.contains("not supported")));
}

#[tokio::test]
async fn out_of_range_position_uses_fallback() {
    let reader = FixedPosition(Coordinates::new(120.0, 32.0));
    let outcome = locate_nearest(&gulu_registry(), &reader, 3).await;
    assert!(outcome.used_fallback);
    assert!(outcome.results.iter().all(|r| r.distance_km.is_none()));
}

#[tokio::test]
async fn reads_position_exactly_once_on_success() {
    let reader = CountingReader::new(Ok(Coordinates::new(2.77, 32.29)));
    let _ = locate_nearest(&gulu_registry(), &reader, 3).await;
    assert_eq!(reader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reads_position_exactly_once_on_failure() {
    let reader = CountingReader::new(Err(PositionError::Timeout));
    let _ = locate_nearest(&gulu_registry(), &reader, 3).await;
    assert_eq!(reader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn zero_limit_is_treated_as_one() {
    let outcome = locate_nearest(&gulu_registry(), &gulu_town(), 0).await;
    assert_eq!(outcome.results.len(), 1);
}

#[tokio::test]
async fn overlapping_calls_both_resolve() {
    let registry = gulu_registry();
    let near = gulu_town();
    let denied = ReportedPosition::failed(PositionError::PermissionDenied);

    let (first, second) = tokio::join!(
        locate_nearest(&registry, &near, 3),
        locate_nearest(&registry, &denied, 3)
    );

    assert!(!first.used_fallback);
    assert!(second.used_fallback);
}

#[test]
fn fallback_results_omit_distance_when_serialized() {
    let outcome = LocateOutcome {
        results: vec![RankedFacility {
            facility: facility("town", 2.77, 32.29),
            distance_km: None,
        }],
        used_fallback: true,
        error_message: Some("no location".to_string()),
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["results"][0]["id"], "town");
    assert!(json["results"][0].get("distance_km").is_none());
    assert_eq!(json["used_fallback"], true);
}

#[test]
fn ranked_results_include_distance_when_serialized() {
    let ranked = RankedFacility {
        facility: facility("town", 2.77, 32.29),
        distance_km: Some(1.5),
    };
    let json = serde_json::to_value(&ranked).unwrap();
    assert_eq!(json["distance_km"], 1.5);
    assert_eq!(json["name"], "Facility town");
}
