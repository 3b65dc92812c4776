//! Dose domain module.
//!
//! ICRP 103 factor tables and the dose-aggregation arithmetic.
//!
//! # Module Structure
//!
//! - `dataset` - Validated loader for the factor dataset
//! - `factors` - Process-lifetime factor table and weight resolution
//! - `tissue` - Canonical tissue names and alias canonicalization
//! - `radiation` - Radiation kinds and the neutron w_R formula
//! - `model` - Request/response value objects
//! - `aggregate` - Equivalent and effective dose computation
//! - `error` - Per-request computation errors

mod aggregate;
mod dataset;
mod error;
mod factors;
mod model;
mod radiation;
mod tissue;

pub use aggregate::{compute_effective_dose, compute_equivalent_dose};
pub use dataset::{DatasetError, FactorDataset, SUM_TOLERANCE};
pub use error::DoseError;
pub use factors::FactorLibrary;
pub use model::{
    DoseRequest, DoseResponse, EquivalentDoseResponse, IrradiationEntry, TissueContribution,
    TissueEquivalent,
};
pub use radiation::{neutron_wr, Radiation, NEUTRON_KIND};
pub use tissue::{Tissue, TissueCanonicalizer, REMAINDER_TISSUES};
