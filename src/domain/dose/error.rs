//! Error types for dose computation.

use thiserror::Error;

/// Errors raised while validating and aggregating a dose computation.
///
/// Every variant is a client-input problem; the HTTP layer maps all of
/// them to a 400 response. Startup validation failures live in
/// [`super::dataset::DatasetError`] instead and are fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DoseError {
    /// Tissue name has no canonical mapping.
    #[error("Unknown tissue '{name}'. Allowed tissues include: [{allowed}]")]
    UnknownTissue { name: String, allowed: String },

    /// Radiation kind is absent from the base table and is not "neutron".
    #[error("Unknown radiation kind '{kind}'. Valid kinds: [{allowed}]")]
    UnknownRadiationKind { kind: String, allowed: String },

    /// Neutron entry without energy when no override is given.
    #[error("neutron_energy_MeV is required for neutron radiation when custom_wR is not provided.")]
    MissingNeutronEnergy,

    /// A numeric field outside its physically meaningful range.
    #[error("{message}")]
    InvalidParameter { message: String },

    /// Empty entry batch.
    #[error("At least one irradiation entry is required.")]
    EmptyRequest,
}

impl DoseError {
    /// Creates an unknown-tissue error enumerating the valid names.
    pub fn unknown_tissue(
        name: impl Into<String>,
        allowed: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        DoseError::UnknownTissue {
            name: name.into(),
            allowed: join_sorted(allowed),
        }
    }

    /// Creates an unknown-radiation-kind error enumerating the valid kinds.
    pub fn unknown_radiation_kind(
        kind: impl Into<String>,
        allowed: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        DoseError::UnknownRadiationKind {
            kind: kind.into(),
            allowed: join_sorted(allowed),
        }
    }

    /// Creates an invalid-parameter error with the given message.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        DoseError::InvalidParameter {
            message: message.into(),
        }
    }
}

fn join_sorted(values: impl IntoIterator<Item = &'static str>) -> String {
    let mut values: Vec<&'static str> = values.into_iter().collect();
    values.sort_unstable();
    values.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tissue_lists_allowed_names_sorted() {
        let err = DoseError::unknown_tissue("spine", ["lung", "colon", "breast"]);
        assert_eq!(
            format!("{}", err),
            "Unknown tissue 'spine'. Allowed tissues include: [breast, colon, lung]"
        );
    }

    #[test]
    fn unknown_radiation_kind_lists_valid_kinds() {
        let err = DoseError::unknown_radiation_kind("tachyon", ["photon", "alpha"]);
        assert_eq!(
            format!("{}", err),
            "Unknown radiation kind 'tachyon'. Valid kinds: [alpha, photon]"
        );
    }

    #[test]
    fn missing_neutron_energy_names_both_fields() {
        let msg = format!("{}", DoseError::MissingNeutronEnergy);
        assert!(msg.contains("neutron_energy_MeV"));
        assert!(msg.contains("custom_wR"));
    }

    #[test]
    fn empty_request_message() {
        assert_eq!(
            format!("{}", DoseError::EmptyRequest),
            "At least one irradiation entry is required."
        );
    }
}
