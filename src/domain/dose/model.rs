//! Request and response value objects for dose computations.
//!
//! Field names follow the wire contract: absorbed dose in gray
//! (`absorbed_dose_Gy`), equivalent and effective dose in sievert
//! (`H_T_Sv`, `effective_dose_Sv`), neutron energy in MeV.

use serde::{Deserialize, Serialize};

use super::tissue::Tissue;

/// Single irradiation record for one tissue and one radiation type.
///
/// The radiation kind stays an open string here: a `custom_wR` override
/// takes precedence over all kind handling, even for kinds the base
/// table does not know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrradiationEntry {
    /// ICRP 103 tissue name or alias, e.g. "lung" or "red_bone_marrow".
    pub tissue: String,
    /// Particle or photon category, e.g. "photon" or "neutron".
    pub radiation: String,
    /// Absorbed dose in gray for this tissue and radiation.
    #[serde(rename = "absorbed_dose_Gy")]
    pub absorbed_dose_gy: f64,
    /// Neutron energy in MeV. Required when radiation is "neutron" and no
    /// override is given.
    #[serde(rename = "neutron_energy_MeV", default, skip_serializing_if = "Option::is_none")]
    pub neutron_energy_mev: Option<f64>,
    /// Optional override for the radiation weighting factor w_R.
    #[serde(rename = "custom_wR", default, skip_serializing_if = "Option::is_none")]
    pub custom_wr: Option<f64>,
}

impl IrradiationEntry {
    /// Convenience constructor for the common tissue/radiation/dose case.
    pub fn new(
        tissue: impl Into<String>,
        radiation: impl Into<String>,
        absorbed_dose_gy: f64,
    ) -> Self {
        Self {
            tissue: tissue.into(),
            radiation: radiation.into(),
            absorbed_dose_gy,
            neutron_energy_mev: None,
            custom_wr: None,
        }
    }

    /// Sets the neutron energy in MeV.
    pub fn with_neutron_energy(mut self, energy_mev: f64) -> Self {
        self.neutron_energy_mev = Some(energy_mev);
        self
    }

    /// Sets the w_R override.
    pub fn with_custom_wr(mut self, custom_wr: f64) -> Self {
        self.custom_wr = Some(custom_wr);
        self
    }
}

/// Batch of irradiation entries forming one dose computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseRequest {
    pub irradiation: Vec<IrradiationEntry>,
}

/// Contribution of a single tissue to the total effective dose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TissueContribution {
    /// Canonical tissue name.
    pub tissue: Tissue,
    /// Tissue weighting factor from ICRP 103.
    #[serde(rename = "w_T")]
    pub w_t: f64,
    /// Equivalent dose to the tissue in sievert.
    #[serde(rename = "H_T_Sv")]
    pub h_t_sv: f64,
    /// w_T * H_T contribution to the effective dose.
    #[serde(rename = "contribution_to_E_Sv")]
    pub contribution_to_e_sv: f64,
}

/// Full result payload for an effective dose computation.
///
/// Rows are sorted by descending contribution; exact ties keep the order
/// in which the tissues first appeared in the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseResponse {
    pub by_tissue: Vec<TissueContribution>,
    #[serde(rename = "effective_dose_Sv")]
    pub effective_dose_sv: f64,
}

/// Equivalent dose for a single tissue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TissueEquivalent {
    pub tissue: Tissue,
    #[serde(rename = "H_T_Sv")]
    pub h_t_sv: f64,
}

/// Result payload for an equivalent dose computation, sorted by
/// descending H_T.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalentDoseResponse {
    pub by_tissue: Vec<TissueEquivalent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_deserializes_with_wire_field_names() {
        let json = r#"{
            "tissue": "lung",
            "radiation": "neutron",
            "absorbed_dose_Gy": 0.01,
            "neutron_energy_MeV": 2.0
        }"#;
        let entry: IrradiationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.tissue, "lung");
        assert_eq!(entry.radiation, "neutron");
        assert_eq!(entry.absorbed_dose_gy, 0.01);
        assert_eq!(entry.neutron_energy_mev, Some(2.0));
        assert!(entry.custom_wr.is_none());
    }

    #[test]
    fn entry_serializes_without_absent_optionals() {
        let entry = IrradiationEntry::new("colon", "photon", 0.002);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("absorbed_dose_Gy"));
        assert!(!json.contains("neutron_energy_MeV"));
        assert!(!json.contains("custom_wR"));
    }

    #[test]
    fn contribution_serializes_with_wire_field_names() {
        let row = TissueContribution {
            tissue: Tissue::Lung,
            w_t: 0.12,
            h_t_sv: 0.01,
            contribution_to_e_sv: 0.0012,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["tissue"], "lung");
        assert_eq!(json["w_T"], 0.12);
        assert_eq!(json["H_T_Sv"], 0.01);
        assert_eq!(json["contribution_to_E_Sv"], 0.0012);
    }

    #[test]
    fn dose_response_round_trips() {
        let response = DoseResponse {
            by_tissue: vec![TissueContribution {
                tissue: Tissue::Gonads,
                w_t: 0.08,
                h_t_sv: 0.01,
                contribution_to_e_sv: 0.0008,
            }],
            effective_dose_sv: 0.0008,
        };
        let json = serde_json::to_string(&response).unwrap();
        let back: DoseResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.by_tissue[0].tissue, Tissue::Gonads);
        assert_eq!(back.effective_dose_sv, 0.0008);
    }
}
