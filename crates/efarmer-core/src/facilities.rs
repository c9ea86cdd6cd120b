use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A latitude/longitude pair in decimal degrees (WGS-84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside the WGS-84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A physical community resource with known coordinates and services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub services: Vec<String>,
}

impl Facility {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct FacilitiesFile {
    facilities: Vec<Facility>,
}

/// The fixed, validated set of known facilities, in declared order.
///
/// Always non-empty. There is no mutation API; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FacilityRegistry {
    facilities: Vec<Facility>,
}

impl FacilityRegistry {
    /// Validate and wrap a list of facilities.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the list is empty, an id is
    /// blank or duplicated, a name is blank, or coordinates are out of range.
    pub fn new(facilities: Vec<Facility>) -> Result<Self, ConfigError> {
        validate_facilities(&facilities)?;
        Ok(Self { facilities })
    }

    #[must_use]
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Facility> {
        self.facilities.iter()
    }
}

impl<'a> IntoIterator for &'a FacilityRegistry {
    type Item = &'a Facility;
    type IntoIter = std::slice::Iter<'a, Facility>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Load and validate the facility registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_facilities(path: &Path) -> Result<FacilityRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FacilitiesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_facilities(&content)
}

/// Parse and validate a facility registry from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_facilities(yaml: &str) -> Result<FacilityRegistry, ConfigError> {
    let file: FacilitiesFile = serde_yaml::from_str(yaml)?;
    FacilityRegistry::new(file.facilities)
}

fn validate_facilities(facilities: &[Facility]) -> Result<(), ConfigError> {
    if facilities.is_empty() {
        return Err(ConfigError::Validation(
            "facility registry must contain at least one facility".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();

    for facility in facilities {
        if facility.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "facility id must be non-empty".to_string(),
            ));
        }

        if facility.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "facility '{}' has an empty name",
                facility.id
            )));
        }

        if !facility.coordinates().is_valid() {
            return Err(ConfigError::Validation(format!(
                "facility '{}' has invalid coordinates ({}, {})",
                facility.id, facility.latitude, facility.longitude
            )));
        }

        if !seen_ids.insert(facility.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate facility id: '{}'",
                facility.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "facilities_test.rs"]
mod tests;
