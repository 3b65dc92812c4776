//! Dose aggregation: per-tissue equivalent dose H_T and effective dose E.
//!
//! All accumulation runs on `Decimal` so that entries spanning many
//! orders of magnitude sum without compounding binary rounding error;
//! values become `f64` only at the response boundary.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::error::DoseError;
use super::factors::FactorLibrary;
use super::model::{
    DoseRequest, DoseResponse, EquivalentDoseResponse, TissueContribution, TissueEquivalent,
};
use super::tissue::Tissue;

/// Computes by-tissue H_T and the total effective dose E.
///
/// H_T = sum over radiations of w_R * D, per tissue;
/// E = sum over tissues of w_T * H_T.
///
/// Rows are sorted by descending contribution; exact ties keep the order
/// in which the tissues first appeared in the request.
pub fn compute_effective_dose(
    factors: &FactorLibrary,
    request: &DoseRequest,
) -> Result<DoseResponse, DoseError> {
    let sums = accumulate_equivalent_doses(factors, request)?;

    let mut rows: Vec<(Tissue, Decimal, Decimal, Decimal)> = Vec::with_capacity(sums.len());
    let mut total = Decimal::ZERO;
    for (tissue, h_t) in sums {
        let w_t = factors.w_t(tissue);
        let contribution = w_t * h_t;
        total += contribution;
        rows.push((tissue, w_t, h_t, contribution));
    }

    // Stable sort: ties keep first-appearance order.
    rows.sort_by(|a, b| b.3.cmp(&a.3));

    let by_tissue = rows
        .into_iter()
        .map(|(tissue, w_t, h_t, contribution)| TissueContribution {
            tissue,
            w_t: report(w_t),
            h_t_sv: report(h_t),
            contribution_to_e_sv: report(contribution),
        })
        .collect();

    Ok(DoseResponse {
        by_tissue,
        effective_dose_sv: report(total),
    })
}

/// Computes by-tissue equivalent dose H_T without the w_T weighting,
/// sorted by descending H_T.
pub fn compute_equivalent_dose(
    factors: &FactorLibrary,
    request: &DoseRequest,
) -> Result<EquivalentDoseResponse, DoseError> {
    let mut sums = accumulate_equivalent_doses(factors, request)?;
    sums.sort_by(|a, b| b.1.cmp(&a.1));

    let by_tissue = sums
        .into_iter()
        .map(|(tissue, h_t)| TissueEquivalent {
            tissue,
            h_t_sv: report(h_t),
        })
        .collect();

    Ok(EquivalentDoseResponse { by_tissue })
}

/// Validates every entry and accumulates w_R * D into per-tissue sums.
///
/// Errors are detected eagerly: any invalid entry fails the whole
/// request before a partial result can form. The returned pairs keep the
/// first-appearance order of the tissues.
fn accumulate_equivalent_doses(
    factors: &FactorLibrary,
    request: &DoseRequest,
) -> Result<Vec<(Tissue, Decimal)>, DoseError> {
    if request.irradiation.is_empty() {
        return Err(DoseError::EmptyRequest);
    }

    let mut sums: Vec<(Tissue, Decimal)> = Vec::new();
    for entry in &request.irradiation {
        if !(entry.absorbed_dose_gy > 0.0) {
            return Err(DoseError::invalid_parameter(
                "absorbed_dose_Gy must be greater than zero.",
            ));
        }
        let tissue = factors.canonicalize(&entry.tissue)?;
        let w_r = factors.resolve_weight(entry)?;
        let dose = Decimal::from_f64(entry.absorbed_dose_gy).ok_or_else(|| {
            DoseError::invalid_parameter(
                "absorbed_dose_Gy is outside the representable numeric range.",
            )
        })?;

        let amount = w_r * dose;
        match sums.iter_mut().find(|(t, _)| *t == tissue) {
            Some((_, sum)) => *sum += amount,
            None => sums.push((tissue, amount)),
        }
    }
    Ok(sums)
}

fn report(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dose::model::IrradiationEntry;
    use crate::domain::dose::radiation::neutron_wr;
    use once_cell::sync::Lazy;
    use proptest::prelude::*;

    static LIBRARY: Lazy<FactorLibrary> =
        Lazy::new(|| FactorLibrary::embedded().expect("embedded dataset must validate"));

    fn request(entries: Vec<IrradiationEntry>) -> DoseRequest {
        DoseRequest {
            irradiation: entries,
        }
    }

    #[test]
    fn single_lung_photon_entry_yields_one_sievert() {
        // H_lung = 1/0.12 Sv, E = 0.12 * H_lung = 1.0 Sv.
        let req = request(vec![IrradiationEntry::new("lung", "photon", 1.0 / 0.12)]);
        let resp = compute_effective_dose(&LIBRARY, &req).unwrap();
        assert!((resp.effective_dose_sv - 1.0).abs() < 1e-9);
        assert_eq!(resp.by_tissue.len(), 1);
        assert_eq!(resp.by_tissue[0].tissue, Tissue::Lung);
    }

    #[test]
    fn mixed_radiations_accumulate_per_tissue() {
        let req = request(vec![
            IrradiationEntry::new("colon", "photon", 0.002),
            IrradiationEntry::new("colon", "proton", 0.001),
            IrradiationEntry::new("gonads", "alpha", 0.0005),
        ]);
        let resp = compute_effective_dose(&LIBRARY, &req).unwrap();

        // Colon: H = 1*0.002 + 2*0.001 = 0.004 Sv, contribution 0.00048 Sv.
        // Gonads: H = 20*0.0005 = 0.01 Sv, contribution 0.0008 Sv.
        let colon = resp
            .by_tissue
            .iter()
            .find(|r| r.tissue == Tissue::Colon)
            .unwrap();
        let gonads = resp
            .by_tissue
            .iter()
            .find(|r| r.tissue == Tissue::Gonads)
            .unwrap();
        assert!((colon.h_t_sv - 0.004).abs() < 1e-15);
        assert!((colon.contribution_to_e_sv - 0.00048).abs() < 1e-15);
        assert!((gonads.h_t_sv - 0.01).abs() < 1e-15);
        assert!((gonads.contribution_to_e_sv - 0.0008).abs() < 1e-15);
        assert!((resp.effective_dose_sv - 0.00128).abs() < 1e-15);

        // Gonads contribute more, so they sort first.
        assert_eq!(resp.by_tissue[0].tissue, Tissue::Gonads);
        assert_eq!(resp.by_tissue[1].tissue, Tissue::Colon);
    }

    #[test]
    fn aliases_accumulate_into_the_same_tissue() {
        let req = request(vec![
            IrradiationEntry::new("Red Bone Marrow", "photon", 0.001),
            IrradiationEntry::new("rbm", "photon", 0.001),
            IrradiationEntry::new("bone marrow", "photon", 0.001),
        ]);
        let resp = compute_effective_dose(&LIBRARY, &req).unwrap();
        assert_eq!(resp.by_tissue.len(), 1);
        assert_eq!(resp.by_tissue[0].tissue, Tissue::RedBoneMarrow);
        assert!((resp.by_tissue[0].h_t_sv - 0.003).abs() < 1e-15);
    }

    #[test]
    fn remainder_names_accumulate_into_the_bucket() {
        let req = request(vec![
            IrradiationEntry::new("pancreas", "photon", 0.001),
            IrradiationEntry::new("spleen", "photon", 0.002),
        ]);
        let resp = compute_effective_dose(&LIBRARY, &req).unwrap();
        assert_eq!(resp.by_tissue.len(), 1);
        assert_eq!(resp.by_tissue[0].tissue, Tissue::RemainderTissues);
        assert!((resp.by_tissue[0].h_t_sv - 0.003).abs() < 1e-15);
    }

    #[test]
    fn neutron_entries_use_the_energy_dependent_weight() {
        let req = request(vec![IrradiationEntry::new("colon", "neutron", 0.001)
            .with_neutron_energy(2.0)]);
        let resp = compute_effective_dose(&LIBRARY, &req).unwrap();
        let expected_h = neutron_wr(2.0).unwrap() * 0.001;
        assert!((resp.by_tissue[0].h_t_sv - expected_h).abs() < 1e-12);
    }

    #[test]
    fn custom_wr_is_used_exactly() {
        let req = request(vec![
            IrradiationEntry::new("gonads", "alpha", 0.0005).with_custom_wr(10.0)
        ]);
        let resp = compute_effective_dose(&LIBRARY, &req).unwrap();
        assert!((resp.by_tissue[0].h_t_sv - 0.005).abs() < 1e-15);
        assert!((resp.effective_dose_sv - 0.0004).abs() < 1e-15);
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err = compute_effective_dose(&LIBRARY, &request(vec![])).unwrap_err();
        assert_eq!(err, DoseError::EmptyRequest);
    }

    #[test]
    fn non_positive_dose_is_rejected() {
        for dose in [0.0, -0.5] {
            let req = request(vec![IrradiationEntry::new("lung", "photon", dose)]);
            let err = compute_effective_dose(&LIBRARY, &req).unwrap_err();
            assert_eq!(
                format!("{}", err),
                "absorbed_dose_Gy must be greater than zero."
            );
        }
    }

    #[test]
    fn unknown_tissue_fails_the_whole_request() {
        let req = request(vec![
            IrradiationEntry::new("lung", "photon", 0.001),
            IrradiationEntry::new("not_a_tissue", "photon", 0.001),
        ]);
        assert!(matches!(
            compute_effective_dose(&LIBRARY, &req),
            Err(DoseError::UnknownTissue { .. })
        ));
    }

    #[test]
    fn exact_ties_keep_first_appearance_order() {
        // Same w_T (0.04) and identical doses: contributions tie exactly.
        let req = request(vec![
            IrradiationEntry::new("thyroid", "photon", 0.001),
            IrradiationEntry::new("liver", "photon", 0.001),
            IrradiationEntry::new("bladder", "photon", 0.001),
        ]);
        let resp = compute_effective_dose(&LIBRARY, &req).unwrap();
        let order: Vec<Tissue> = resp.by_tissue.iter().map(|r| r.tissue).collect();
        assert_eq!(order, vec![Tissue::Thyroid, Tissue::Liver, Tissue::Bladder]);
    }

    #[test]
    fn equivalent_dose_skips_the_tissue_weighting() {
        let req = request(vec![
            IrradiationEntry::new("colon", "photon", 0.002),
            IrradiationEntry::new("gonads", "alpha", 0.0005),
        ]);
        let resp = compute_equivalent_dose(&LIBRARY, &req).unwrap();
        // Sorted by H_T: gonads 0.01 Sv first, colon 0.002 Sv second.
        assert_eq!(resp.by_tissue[0].tissue, Tissue::Gonads);
        assert!((resp.by_tissue[0].h_t_sv - 0.01).abs() < 1e-15);
        assert_eq!(resp.by_tissue[1].tissue, Tissue::Colon);
        assert!((resp.by_tissue[1].h_t_sv - 0.002).abs() < 1e-15);
    }

    #[test]
    fn equivalent_dose_rejects_empty_batches_too() {
        let err = compute_equivalent_dose(&LIBRARY, &request(vec![])).unwrap_err();
        assert_eq!(err, DoseError::EmptyRequest);
    }

    proptest! {
        /// Decimal accumulation makes the total independent of entry order.
        #[test]
        fn effective_dose_is_permutation_invariant(
            doses in proptest::collection::vec(1e-6f64..1.0, 1..12)
        ) {
            let tissues = ["lung", "colon", "stomach", "breast"];
            let kinds = ["photon", "proton", "alpha"];
            let entries: Vec<IrradiationEntry> = doses
                .iter()
                .enumerate()
                .map(|(i, dose)| {
                    IrradiationEntry::new(tissues[i % tissues.len()], kinds[i % kinds.len()], *dose)
                })
                .collect();

            let forward = compute_effective_dose(&LIBRARY, &request(entries.clone())).unwrap();
            let mut reversed_entries = entries;
            reversed_entries.reverse();
            let reversed = compute_effective_dose(&LIBRARY, &request(reversed_entries)).unwrap();

            prop_assert_eq!(forward.effective_dose_sv, reversed.effective_dose_sv);
        }
    }
}
