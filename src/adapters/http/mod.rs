//! HTTP adapters - REST API implementations.

pub mod dose;

// Re-export key types for convenience
pub use dose::dose_router;
pub use dose::DoseAppState;
