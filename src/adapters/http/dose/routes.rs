//! Axum router configuration for dose endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    convert_neutron_wr, effective_dose, equivalent_dose, health, radiation_factors,
    tissue_factors, DoseAppState,
};

/// Create the factor table router.
///
/// # Routes
/// - `GET /tissue` - ICRP 103 tissue weighting factors (w_T)
/// - `GET /radiation` - base radiation weighting factors (w_R), no neutron
pub fn factor_routes() -> Router<DoseAppState> {
    Router::new()
        .route("/tissue", get(tissue_factors))
        .route("/radiation", get(radiation_factors))
}

/// Create the dose computation router.
///
/// # Routes
/// - `POST /effective` - equivalent doses H_T plus total effective dose E
/// - `POST /equivalent` - equivalent doses H_T only
/// - `POST /convert/neutron-wr` - neutron w_R from energy in MeV
pub fn dose_routes() -> Router<DoseAppState> {
    Router::new()
        .route("/effective", post(effective_dose))
        .route("/equivalent", post(equivalent_dose))
        .route("/convert/neutron-wr", post(convert_neutron_wr))
}

/// Create the complete API router.
///
/// # Example
///
/// ```ignore
/// use radiation_dose_api::adapters::http::{dose_router, DoseAppState};
/// use radiation_dose_api::domain::dose::FactorLibrary;
///
/// let state = DoseAppState::new(FactorLibrary::embedded()?);
/// let app = dose_router().with_state(state);
/// ```
pub fn dose_router() -> Router<DoseAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/v1/factors", factor_routes())
        .nest("/v1/dose", dose_routes())
}
