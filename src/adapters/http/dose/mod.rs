//! Dose HTTP module: DTOs, handlers, and routes.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, NeutronWrRequest, NeutronWrResponse};
pub use handlers::{DoseApiError, DoseAppState};
pub use routes::{dose_router, dose_routes, factor_routes};
