//! HTTP handlers for dose endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::domain::dose::{
    compute_effective_dose, compute_equivalent_dose, neutron_wr, DoseError, DoseRequest,
    DoseResponse, EquivalentDoseResponse, FactorLibrary,
};

use super::dto::{ErrorResponse, HealthResponse, NeutronWrRequest, NeutronWrResponse};

/// Shared application state for dose endpoints.
///
/// The factor library is read-only after startup, so a plain `Arc` is
/// all the sharing the handlers need.
#[derive(Clone)]
pub struct DoseAppState {
    pub factors: Arc<FactorLibrary>,
}

impl DoseAppState {
    pub fn new(factors: FactorLibrary) -> Self {
        Self {
            factors: Arc::new(factors),
        }
    }
}

/// Simple health check to confirm the API is alive.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// Return ICRP 103 tissue weighting factors (w_T).
///
/// GET /v1/factors/tissue
pub async fn tissue_factors(State(state): State<DoseAppState>) -> Json<BTreeMap<String, f64>> {
    Json(state.factors.tissue_weights())
}

/// Return base radiation weighting factors (w_R) for non-neutron kinds.
///
/// Neutron values depend on energy; see POST /v1/dose/convert/neutron-wr.
///
/// GET /v1/factors/radiation
pub async fn radiation_factors(State(state): State<DoseAppState>) -> Json<BTreeMap<String, f64>> {
    Json(state.factors.base_radiation_weights())
}

/// Compute the neutron radiation weighting factor from an energy in MeV.
///
/// POST /v1/dose/convert/neutron-wr
pub async fn convert_neutron_wr(
    Json(request): Json<NeutronWrRequest>,
) -> Result<Json<NeutronWrResponse>, DoseApiError> {
    let w_r = neutron_wr(request.energy_mev)?;
    Ok(Json(NeutronWrResponse { w_r }))
}

/// Compute equivalent doses H_T and the total effective dose E.
///
/// POST /v1/dose/effective
pub async fn effective_dose(
    State(state): State<DoseAppState>,
    Json(request): Json<DoseRequest>,
) -> Result<Json<DoseResponse>, DoseApiError> {
    let response = compute_effective_dose(&state.factors, &request)?;
    Ok(Json(response))
}

/// Compute by-tissue equivalent doses H_T without the tissue weighting.
///
/// POST /v1/dose/equivalent
pub async fn equivalent_dose(
    State(state): State<DoseAppState>,
    Json(request): Json<DoseRequest>,
) -> Result<Json<EquivalentDoseResponse>, DoseApiError> {
    let response = compute_equivalent_dose(&state.factors, &request)?;
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts dose computation errors to HTTP responses.
///
/// Every computation error is a client-input problem and maps to 400;
/// nothing in the hot path can fail on the server side.
pub struct DoseApiError(DoseError);

impl From<DoseError> for DoseApiError {
    fn from(err: DoseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DoseApiError {
    fn into_response(self) -> axum::response::Response {
        let error_code = match &self.0 {
            DoseError::UnknownTissue { .. } => "UNKNOWN_TISSUE",
            DoseError::UnknownRadiationKind { .. } => "UNKNOWN_RADIATION_KIND",
            DoseError::MissingNeutronEnergy => "MISSING_PARAMETER",
            DoseError::InvalidParameter { .. } => "INVALID_PARAMETER",
            DoseError::EmptyRequest => "INVALID_REQUEST",
        };
        let body = ErrorResponse::new(error_code, self.0.to_string());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dose_errors_map_to_bad_request_with_stable_codes() {
        let cases = [
            (DoseError::EmptyRequest, "INVALID_REQUEST"),
            (DoseError::MissingNeutronEnergy, "MISSING_PARAMETER"),
            (
                DoseError::invalid_parameter("custom_wR must be greater than zero."),
                "INVALID_PARAMETER",
            ),
            (
                DoseError::unknown_tissue("spine", ["lung"]),
                "UNKNOWN_TISSUE",
            ),
            (
                DoseError::unknown_radiation_kind("tachyon", ["photon"]),
                "UNKNOWN_RADIATION_KIND",
            ),
        ];
        for (err, expected_code) in cases {
            let response = DoseApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", expected_code);
        }
    }

    #[test]
    fn app_state_shares_one_factor_library() {
        let state = DoseAppState::new(FactorLibrary::embedded().unwrap());
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.factors, &clone.factors));
    }
}
