//! Validated loader for the ICRP 103 factor dataset.
//!
//! The reference numbers live in `data/icrp103_factors.json`, embedded at
//! compile time and optionally overridden by a file path from configuration.
//! The loader rejects malformed or incomplete data with a descriptive fatal
//! error; the service never starts from a degraded dataset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::radiation::{Radiation, RADIATION_COUNT};
use super::tissue::{Tissue, REMAINDER_TISSUES, TISSUE_COUNT};

/// Embedded copy of the repository factor dataset.
const EMBEDDED_DATASET: &str = include_str!("../../../data/icrp103_factors.json");

/// Tolerance for the tissue-weight sum invariant.
pub const SUM_TOLERANCE: f64 = 1e-12;

/// Errors raised while loading or validating the factor dataset.
///
/// All of these are startup-fatal configuration errors, never per-request
/// errors.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Factor dataset could not be read from '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Factor dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("icrp_publication must be '103', got '{0}'")]
    WrongPublication(String),

    #[error("units['{field}'] must be '{expected}', got '{actual}'")]
    WrongUnit {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("tissue_weighting_factors must contain exactly 15 entries, got {0}")]
    TissueCount(usize),

    #[error("tissue_weighting_factors entry {position} must be '{expected}', got '{actual}' (canonical order is enforced)")]
    TissueOrder {
        position: usize,
        expected: &'static str,
        actual: String,
    },

    #[error("w_T for '{tissue}' must be > 0, got {value}")]
    NonPositiveTissueWeight { tissue: String, value: f64 },

    #[error("tissue weighting factors must sum to 1.0 within 1e-12, got {0}")]
    TissueSum(f64),

    #[error("radiation_weighting_factors.base has unknown kind '{0}'")]
    UnknownRadiationKind(String),

    #[error("radiation_weighting_factors.base lists '{0}' more than once")]
    DuplicateRadiationKind(String),

    #[error("radiation_weighting_factors.base is missing kind '{0}'")]
    MissingRadiationKind(&'static str),

    #[error("w_R for '{kind}' must be > 0, got {value}")]
    NonPositiveRadiationWeight { kind: String, value: f64 },

    #[error("remainder_tissues must contain exactly the 14 ICRP 103 remainder tissues")]
    RemainderMismatch,
}

/// Serialized form of the factor dataset.
///
/// Ordered tables are arrays of records rather than JSON objects so that
/// the canonical order survives serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorDataset {
    pub icrp_publication: String,
    pub version: String,
    pub units: Units,
    pub tissue_weighting_factors: Vec<TissueWeight>,
    pub remainder_tissues: Vec<String>,
    pub radiation_weighting_factors: RadiationWeights,
}

/// Unit labels carried by the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Units {
    #[serde(rename = "w_T")]
    pub w_t: String,
    #[serde(rename = "w_R")]
    pub w_r: String,
    pub energy: String,
}

/// One tissue weighting factor entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TissueWeight {
    pub tissue: String,
    #[serde(rename = "w_T")]
    pub w_t: f64,
}

/// The radiation weighting section: base table plus the neutron formula
/// description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiationWeights {
    pub base: Vec<RadiationWeight>,
    pub neutron: NeutronDefinition,
}

/// One base radiation weighting factor entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiationWeight {
    pub radiation: String,
    #[serde(rename = "w_R")]
    pub w_r: f64,
}

/// Human-readable description of the neutron piecewise formula.
///
/// Documentation only; the formula itself is evaluated in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeutronDefinition {
    pub description: String,
    pub pieces: Vec<NeutronPiece>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeutronPiece {
    pub range: String,
    pub expression: String,
}

impl FactorDataset {
    /// Parses and validates the dataset embedded in the binary.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(EMBEDDED_DATASET)
    }

    /// Parses and validates a dataset from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses and validates a dataset from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let dataset: FactorDataset = serde_json::from_str(raw)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Checks every dataset invariant.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.icrp_publication.trim() != "103" {
            return Err(DatasetError::WrongPublication(self.icrp_publication.clone()));
        }

        for (field, expected, actual) in [
            ("w_T", "dimensionless", &self.units.w_t),
            ("w_R", "dimensionless", &self.units.w_r),
            ("energy", "MeV", &self.units.energy),
        ] {
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(DatasetError::WrongUnit {
                    field,
                    expected,
                    actual: actual.clone(),
                });
            }
        }

        self.validate_tissues()?;
        self.validate_radiation()?;
        self.validate_remainder()
    }

    fn validate_tissues(&self) -> Result<(), DatasetError> {
        if self.tissue_weighting_factors.len() != TISSUE_COUNT {
            return Err(DatasetError::TissueCount(self.tissue_weighting_factors.len()));
        }

        // Order and content are enforced together to catch accidental
        // renames as well as shuffles.
        for (position, (entry, expected)) in self
            .tissue_weighting_factors
            .iter()
            .zip(Tissue::CANONICAL)
            .enumerate()
        {
            if entry.tissue != expected.as_str() {
                return Err(DatasetError::TissueOrder {
                    position,
                    expected: expected.as_str(),
                    actual: entry.tissue.clone(),
                });
            }
            if !(entry.w_t > 0.0) {
                return Err(DatasetError::NonPositiveTissueWeight {
                    tissue: entry.tissue.clone(),
                    value: entry.w_t,
                });
            }
        }

        let sum: f64 = self.tissue_weighting_factors.iter().map(|e| e.w_t).sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(DatasetError::TissueSum(sum));
        }
        Ok(())
    }

    fn validate_radiation(&self) -> Result<(), DatasetError> {
        let mut seen = [false; RADIATION_COUNT];
        for entry in &self.radiation_weighting_factors.base {
            let kind = Radiation::from_kind(&entry.radiation)
                .ok_or_else(|| DatasetError::UnknownRadiationKind(entry.radiation.clone()))?;
            if seen[kind.index()] {
                return Err(DatasetError::DuplicateRadiationKind(entry.radiation.clone()));
            }
            seen[kind.index()] = true;
            if !(entry.w_r > 0.0) {
                return Err(DatasetError::NonPositiveRadiationWeight {
                    kind: entry.radiation.clone(),
                    value: entry.w_r,
                });
            }
        }
        for kind in Radiation::BASE {
            if !seen[kind.index()] {
                return Err(DatasetError::MissingRadiationKind(kind.as_str()));
            }
        }
        Ok(())
    }

    fn validate_remainder(&self) -> Result<(), DatasetError> {
        let mut actual: Vec<&str> = self.remainder_tissues.iter().map(String::as_str).collect();
        actual.sort_unstable();
        let mut expected = REMAINDER_TISSUES;
        expected.sort_unstable();
        if actual != expected {
            return Err(DatasetError::RemainderMismatch);
        }
        Ok(())
    }
}
