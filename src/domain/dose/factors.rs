//! The process-lifetime factor table.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::dataset::{DatasetError, FactorDataset};
use super::error::DoseError;
use super::model::IrradiationEntry;
use super::radiation::{neutron_wr, Radiation, NEUTRON_KIND, RADIATION_COUNT};
use super::tissue::{Tissue, TissueCanonicalizer, TISSUE_COUNT};

/// Immutable ICRP 103 factor tables, constructed once at startup from a
/// validated dataset and shared read-only for the process lifetime.
///
/// Weights are stored as `Decimal` so the aggregation arithmetic never
/// leaves fixed-precision space; conversion to `f64` happens only in the
/// reporting accessors.
#[derive(Debug, Clone)]
pub struct FactorLibrary {
    tissue_weights: [Decimal; TISSUE_COUNT],
    base_weights: [Decimal; RADIATION_COUNT],
    remainder_tissues: Vec<String>,
    canonicalizer: TissueCanonicalizer,
}

impl FactorLibrary {
    /// Builds the library from the dataset embedded in the binary.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_dataset(&FactorDataset::embedded()?)
    }

    /// Builds the library from a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::from_dataset(&FactorDataset::from_path(path)?)
    }

    /// Builds the library from a parsed dataset, revalidating it first.
    pub fn from_dataset(dataset: &FactorDataset) -> Result<Self, DatasetError> {
        dataset.validate()?;

        // Validation has pinned the entry order to the canonical order.
        let mut tissue_weights = [Decimal::ZERO; TISSUE_COUNT];
        for (tissue, entry) in Tissue::CANONICAL.iter().zip(&dataset.tissue_weighting_factors) {
            tissue_weights[tissue.index()] =
                Decimal::from_f64(entry.w_t).ok_or(DatasetError::NonPositiveTissueWeight {
                    tissue: entry.tissue.clone(),
                    value: entry.w_t,
                })?;
        }

        let mut base_weights = [Decimal::ZERO; RADIATION_COUNT];
        for entry in &dataset.radiation_weighting_factors.base {
            let kind = Radiation::from_kind(&entry.radiation)
                .ok_or_else(|| DatasetError::UnknownRadiationKind(entry.radiation.clone()))?;
            base_weights[kind.index()] =
                Decimal::from_f64(entry.w_r).ok_or(DatasetError::NonPositiveRadiationWeight {
                    kind: entry.radiation.clone(),
                    value: entry.w_r,
                })?;
        }

        Ok(Self {
            tissue_weights,
            base_weights,
            remainder_tissues: dataset.remainder_tissues.clone(),
            canonicalizer: TissueCanonicalizer::new(&dataset.remainder_tissues),
        })
    }

    /// Tissue weighting factor w_T for a canonical tissue.
    pub fn w_t(&self, tissue: Tissue) -> Decimal {
        self.tissue_weights[tissue.index()]
    }

    /// Base radiation weighting factor w_R for a non-neutron kind.
    pub fn base_weight(&self, kind: Radiation) -> Decimal {
        self.base_weights[kind.index()]
    }

    /// Returns an independent copy of the tissue weighting factors,
    /// keyed by canonical name.
    pub fn tissue_weights(&self) -> BTreeMap<String, f64> {
        Tissue::CANONICAL
            .iter()
            .map(|t| (t.as_str().to_string(), self.w_t(*t).to_f64().unwrap_or(0.0)))
            .collect()
    }

    /// Returns an independent copy of the base radiation weighting
    /// factors. Neutron is not listed; its w_R depends on energy.
    pub fn base_radiation_weights(&self) -> BTreeMap<String, f64> {
        Radiation::BASE
            .iter()
            .map(|r| {
                (
                    r.as_str().to_string(),
                    self.base_weight(*r).to_f64().unwrap_or(0.0),
                )
            })
            .collect()
    }

    /// Returns a copy of the 14 remainder-tissue names.
    pub fn remainder_tissues(&self) -> Vec<String> {
        self.remainder_tissues.clone()
    }

    /// Normalizes a user-supplied tissue name to its canonical tissue.
    pub fn canonicalize(&self, name: &str) -> Result<Tissue, DoseError> {
        self.canonicalizer.resolve(name)
    }

    /// Determines the radiation weighting factor w_R for one entry.
    ///
    /// A positive `custom_wR` overrides all other logic, including kind
    /// handling. Neutron entries require an energy. Everything else
    /// resolves through the base table.
    pub fn resolve_weight(&self, entry: &IrradiationEntry) -> Result<Decimal, DoseError> {
        if let Some(custom) = entry.custom_wr {
            if !(custom > 0.0) {
                return Err(DoseError::invalid_parameter(
                    "custom_wR must be greater than zero.",
                ));
            }
            return Decimal::from_f64(custom).ok_or_else(|| {
                DoseError::invalid_parameter("custom_wR is outside the representable numeric range.")
            });
        }

        if entry.radiation == NEUTRON_KIND {
            let energy = entry
                .neutron_energy_mev
                .ok_or(DoseError::MissingNeutronEnergy)?;
            let wr = neutron_wr(energy)?;
            return Decimal::from_f64(wr).ok_or_else(|| {
                DoseError::invalid_parameter(
                    "neutron_energy_MeV is outside the representable numeric range.",
                )
            });
        }

        match Radiation::from_kind(&entry.radiation) {
            Some(kind) => Ok(self.base_weight(kind)),
            None => Err(DoseError::unknown_radiation_kind(
                &entry.radiation,
                Radiation::valid_kinds(),
            )),
        }
    }
}
