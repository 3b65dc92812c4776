//! Adapters - Implementations at the system boundary.
//!
//! - `http` - REST API exposure of the dose domain

pub mod http;

pub use http::{dose_router, DoseAppState};
