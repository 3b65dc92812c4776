//! Domain layer containing the dose computation logic and domain types.
//!
//! # Module Organization
//!
//! - `dose` - ICRP 103 factor tables, tissue/radiation resolution, and
//!   the equivalent/effective dose aggregation

pub mod dose;
