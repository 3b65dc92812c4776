//! Canonical ICRP 103 tissue names and the tissue-name canonicalizer.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DoseError;

/// The 15 tissues carrying an ICRP 103 tissue weighting factor.
///
/// Variants are declared in the canonical fixed order of the factor
/// dataset, so `tissue as usize` indexes the weight tables directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tissue {
    RedBoneMarrow,
    Colon,
    Lung,
    Stomach,
    Breast,
    RemainderTissues,
    Gonads,
    Bladder,
    Oesophagus,
    Liver,
    Thyroid,
    BoneSurface,
    Brain,
    SalivaryGlands,
    Skin,
}

/// Number of canonical tissues.
pub const TISSUE_COUNT: usize = 15;

/// The 14 tissues that roll up into the `remainder_tissues` bucket.
///
/// Used for dataset validation and alias resolution only; the bucket
/// itself carries the weighting factor.
pub const REMAINDER_TISSUES: [&str; 14] = [
    "adrenals",
    "extrathoracic_region",
    "gall_bladder",
    "heart",
    "kidneys",
    "lymphatic_nodes",
    "muscle",
    "oral_mucosa",
    "pancreas",
    "prostate_or_uterus_cervix",
    "small_intestine",
    "spleen",
    "thymus",
    "tonsils",
];

impl Tissue {
    /// All canonical tissues in canonical dataset order.
    pub const CANONICAL: [Tissue; TISSUE_COUNT] = [
        Tissue::RedBoneMarrow,
        Tissue::Colon,
        Tissue::Lung,
        Tissue::Stomach,
        Tissue::Breast,
        Tissue::RemainderTissues,
        Tissue::Gonads,
        Tissue::Bladder,
        Tissue::Oesophagus,
        Tissue::Liver,
        Tissue::Thyroid,
        Tissue::BoneSurface,
        Tissue::Brain,
        Tissue::SalivaryGlands,
        Tissue::Skin,
    ];

    /// Returns the canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Tissue::RedBoneMarrow => "red_bone_marrow",
            Tissue::Colon => "colon",
            Tissue::Lung => "lung",
            Tissue::Stomach => "stomach",
            Tissue::Breast => "breast",
            Tissue::RemainderTissues => "remainder_tissues",
            Tissue::Gonads => "gonads",
            Tissue::Bladder => "bladder",
            Tissue::Oesophagus => "oesophagus",
            Tissue::Liver => "liver",
            Tissue::Thyroid => "thyroid",
            Tissue::BoneSurface => "bone_surface",
            Tissue::Brain => "brain",
            Tissue::SalivaryGlands => "salivary_glands",
            Tissue::Skin => "skin",
        }
    }

    /// Looks up a tissue by its exact canonical name.
    pub fn from_canonical(name: &str) -> Option<Tissue> {
        Tissue::CANONICAL.iter().copied().find(|t| t.as_str() == name)
    }

    /// Position in the canonical order, for indexing the weight tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// All canonical names, for error messages.
    pub fn canonical_names() -> impl Iterator<Item = &'static str> {
        Tissue::CANONICAL.iter().map(|t| t.as_str())
    }
}

impl fmt::Display for Tissue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps user-supplied tissue names onto canonical [`Tissue`] values.
///
/// The alias table is precomputed once at factor-table construction:
/// friendly synonyms, the space form of every canonical name, and every
/// remainder tissue (both name forms) mapping to the remainder bucket.
#[derive(Debug, Clone)]
pub struct TissueCanonicalizer {
    aliases: HashMap<String, Tissue>,
}

impl TissueCanonicalizer {
    /// Builds the alias table from the validated remainder-tissue list.
    pub fn new(remainder_tissues: &[String]) -> Self {
        let mut aliases: HashMap<String, Tissue> = HashMap::new();

        for (alias, tissue) in [
            ("rbm", Tissue::RedBoneMarrow),
            ("red bone marrow", Tissue::RedBoneMarrow),
            ("bone marrow", Tissue::RedBoneMarrow),
            // common spelling variant
            ("esophagus", Tissue::Oesophagus),
            ("salivary glands", Tissue::SalivaryGlands),
            ("bone surface", Tissue::BoneSurface),
            ("remainder", Tissue::RemainderTissues),
            ("remainder tissues", Tissue::RemainderTissues),
        ] {
            aliases.insert(alias.to_string(), tissue);
        }

        for tissue in Tissue::CANONICAL {
            aliases.insert(tissue.as_str().replace('_', " "), tissue);
        }

        for name in remainder_tissues {
            aliases.insert(name.clone(), Tissue::RemainderTissues);
            aliases.insert(name.replace('_', " "), Tissue::RemainderTissues);
        }

        Self { aliases }
    }

    /// Normalizes a user-supplied tissue name to its canonical tissue.
    ///
    /// Attempts, in order: exact canonical hit, underscore-normalized
    /// form, alias table on the space form. Fails with
    /// [`DoseError::UnknownTissue`] when nothing matches.
    pub fn resolve(&self, name: &str) -> Result<Tissue, DoseError> {
        if let Some(tissue) = Tissue::from_canonical(name) {
            return Ok(tissue);
        }

        let spaced = name
            .trim()
            .to_lowercase()
            .replace('-', " ")
            .replace("  ", " ");
        let underscored = spaced.replace(' ', "_");

        if let Some(tissue) = Tissue::from_canonical(&underscored) {
            return Ok(tissue);
        }
        if let Some(tissue) = self.aliases.get(&spaced) {
            return Ok(*tissue);
        }

        Err(DoseError::unknown_tissue(name, Tissue::canonical_names()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicalizer() -> TissueCanonicalizer {
        let remainder: Vec<String> = REMAINDER_TISSUES.iter().map(|s| s.to_string()).collect();
        TissueCanonicalizer::new(&remainder)
    }

    #[test]
    fn serde_names_match_canonical_names() {
        for tissue in Tissue::CANONICAL {
            let json = serde_json::to_string(&tissue).unwrap();
            assert_eq!(json, format!("\"{}\"", tissue.as_str()));
        }
    }

    #[test]
    fn exact_canonical_names_resolve_to_themselves() {
        let c = canonicalizer();
        for tissue in Tissue::CANONICAL {
            assert_eq!(c.resolve(tissue.as_str()).unwrap(), tissue);
        }
    }

    #[test]
    fn case_and_separator_variants_resolve() {
        let c = canonicalizer();
        assert_eq!(c.resolve("Lung").unwrap(), Tissue::Lung);
        assert_eq!(c.resolve("  Red Bone Marrow ").unwrap(), Tissue::RedBoneMarrow);
        assert_eq!(c.resolve("bone-surface").unwrap(), Tissue::BoneSurface);
        assert_eq!(c.resolve("SALIVARY_GLANDS").unwrap(), Tissue::SalivaryGlands);
    }

    #[test]
    fn friendly_aliases_resolve() {
        let c = canonicalizer();
        assert_eq!(c.resolve("rbm").unwrap(), Tissue::RedBoneMarrow);
        assert_eq!(c.resolve("bone marrow").unwrap(), Tissue::RedBoneMarrow);
        assert_eq!(c.resolve("esophagus").unwrap(), Tissue::Oesophagus);
        assert_eq!(c.resolve("remainder").unwrap(), Tissue::RemainderTissues);
    }

    #[test]
    fn every_remainder_tissue_rolls_up_into_the_bucket() {
        let c = canonicalizer();
        for name in REMAINDER_TISSUES {
            assert_eq!(c.resolve(name).unwrap(), Tissue::RemainderTissues);
            let spaced = name.replace('_', " ");
            assert_eq!(c.resolve(&spaced).unwrap(), Tissue::RemainderTissues);
        }
    }

    #[test]
    fn unknown_tissue_fails_with_allowed_names() {
        let c = canonicalizer();
        let err = c.resolve("femur").unwrap_err();
        match err {
            DoseError::UnknownTissue { ref name, ref allowed } => {
                assert_eq!(name, "femur");
                assert!(allowed.contains("red_bone_marrow"));
                assert!(allowed.contains("skin"));
            }
            other => panic!("Expected UnknownTissue, got {:?}", other),
        }
    }

    #[test]
    fn canonical_order_matches_enum_discriminants() {
        for (position, tissue) in Tissue::CANONICAL.iter().enumerate() {
            assert_eq!(tissue.index(), position);
        }
    }
}
