//! Radiation kinds and the energy-dependent neutron weighting factor.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DoseError;

/// Radiation kinds carrying a fixed base weighting factor.
///
/// Neutron is deliberately absent: its w_R depends on energy and is
/// computed by [`neutron_wr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Radiation {
    Photon,
    Electron,
    Muon,
    Proton,
    Pion,
    Alpha,
    HeavyIon,
}

/// Number of base radiation kinds.
pub const RADIATION_COUNT: usize = 7;

/// Radiation kind string handled outside the base table.
pub const NEUTRON_KIND: &str = "neutron";

impl Radiation {
    /// All base kinds in dataset order.
    pub const BASE: [Radiation; RADIATION_COUNT] = [
        Radiation::Photon,
        Radiation::Electron,
        Radiation::Muon,
        Radiation::Proton,
        Radiation::Pion,
        Radiation::Alpha,
        Radiation::HeavyIon,
    ];

    /// Returns the canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Radiation::Photon => "photon",
            Radiation::Electron => "electron",
            Radiation::Muon => "muon",
            Radiation::Proton => "proton",
            Radiation::Pion => "pion",
            Radiation::Alpha => "alpha",
            Radiation::HeavyIon => "heavy_ion",
        }
    }

    /// Looks up a base kind by its exact canonical name.
    pub fn from_kind(name: &str) -> Option<Radiation> {
        Radiation::BASE.iter().copied().find(|r| r.as_str() == name)
    }

    /// Position in the dataset order, for indexing the weight table.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// All accepted kind strings, including "neutron", for error messages.
    pub fn valid_kinds() -> impl Iterator<Item = &'static str> {
        Radiation::BASE
            .iter()
            .map(|r| r.as_str())
            .chain(std::iter::once(NEUTRON_KIND))
    }
}

impl fmt::Display for Radiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the neutron radiation weighting factor w_R for an energy in
/// MeV, per the ICRP Publication 103 piecewise definition.
///
/// With E in MeV and natural logarithms:
///
/// - E < 1:        w_R = 2.5 + 18.2 * exp(-(ln E)^2 / 6)
/// - 1 <= E <= 50: w_R = 5.0 + 17.0 * exp(-(ln E)^2 / 6)
/// - 50 < E:       w_R = 2.5 + 3.25 * exp(-(ln(0.04 E))^2 / 6)
///
/// Both boundary energies evaluate on the middle branch. Note the
/// shifted argument in the high-energy branch.
pub fn neutron_wr(energy_mev: f64) -> Result<f64, DoseError> {
    if !energy_mev.is_finite() || energy_mev <= 0.0 {
        return Err(DoseError::invalid_parameter(
            "Neutron energy must be greater than zero in MeV.",
        ));
    }

    let ln_e = energy_mev.ln();
    let wr = if energy_mev < 1.0 {
        2.5 + 18.2 * (-(ln_e * ln_e) / 6.0).exp()
    } else if energy_mev <= 50.0 {
        5.0 + 17.0 * (-(ln_e * ln_e) / 6.0).exp()
    } else {
        let ln_shifted = (0.04 * energy_mev).ln();
        2.5 + 3.25 * (-(ln_shifted * ln_shifted) / 6.0).exp()
    };
    Ok(wr)
}
