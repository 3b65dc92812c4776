//! Data transfer objects for dose HTTP endpoints.
//!
//! The dose request/response bodies themselves are the domain value
//! objects in `domain::dose::model`; only the endpoint-specific shapes
//! live here.

use serde::{Deserialize, Serialize};

/// Request to convert a neutron energy into a weighting factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeutronWrRequest {
    /// Neutron energy in MeV
    #[serde(rename = "energy_MeV")]
    pub energy_mev: f64,
}

/// Response carrying the computed neutron weighting factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeutronWrResponse {
    #[serde(rename = "w_R")]
    pub w_r: f64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Uniform error payload for computation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutron_wr_request_uses_wire_field_name() {
        let req: NeutronWrRequest = serde_json::from_str(r#"{"energy_MeV": 2.0}"#).unwrap();
        assert_eq!(req.energy_mev, 2.0);
    }

    #[test]
    fn neutron_wr_response_serializes_wire_field_name() {
        let json = serde_json::to_value(NeutronWrResponse { w_r: 22.0 }).unwrap();
        assert_eq!(json["w_R"], 22.0);
    }

    #[test]
    fn health_response_reports_ok() {
        let json = serde_json::to_value(HealthResponse::ok()).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn error_response_carries_code_and_message() {
        let resp = ErrorResponse::new("INVALID_PARAMETER", "custom_wR must be greater than zero.");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error_code"], "INVALID_PARAMETER");
        assert_eq!(json["message"], "custom_wR must be greater than zero.");
    }
}
