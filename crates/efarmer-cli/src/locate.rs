use std::fmt::Write as _;

use efarmer_core::{Coordinates, Facility, FacilityRegistry};
use efarmer_locator::{locate_nearest, FixedPosition, LocateOutcome, NoPositionCapability};

pub(crate) async fn run_locate(
    registry: &FacilityRegistry,
    position: Option<(f64, f64)>,
    limit: usize,
) {
    eprintln!("Locating...");
    let outcome = match position {
        Some((lat, lng)) => {
            let reader = FixedPosition(Coordinates::new(lat, lng));
            locate_nearest(registry, &reader, limit).await
        }
        None => locate_nearest(registry, &NoPositionCapability, limit).await,
    };
    print!("{}", format_outcome(&outcome));
}

pub(crate) fn format_outcome(outcome: &LocateOutcome) -> String {
    let mut out = String::new();
    if let Some(message) = &outcome.error_message {
        let _ = writeln!(out, "{message}");
        let _ = writeln!(out);
    }
    for (i, ranked) in outcome.results.iter().enumerate() {
        let distance = ranked
            .distance_km
            .map(|d| format!(" ({d:.1} km)"))
            .unwrap_or_default();
        let _ = writeln!(out, "{}. {}{distance}", i + 1, ranked.facility.name);
        write_details(&mut out, &ranked.facility);
    }
    out
}

pub(crate) fn format_registry(registry: &FacilityRegistry) -> String {
    let mut out = String::new();
    for facility in registry {
        let _ = writeln!(out, "{} [{}]", facility.name, facility.id);
        write_details(&mut out, facility);
    }
    out
}

fn write_details(out: &mut String, facility: &Facility) {
    let _ = writeln!(out, "   {}", facility.address);
    if !facility.services.is_empty() {
        let _ = writeln!(out, "   services: {}", facility.services.join(", "));
    }
}
