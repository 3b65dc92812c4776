//! Radiation Dose API - ICRP 103 effective dose computation service.
//!
//! This crate computes equivalent dose H_T and effective dose E from
//! per-tissue, per-radiation absorbed-dose entries, and exposes the
//! reference factor tables over a small HTTP surface.

pub mod adapters;
pub mod config;
pub mod domain;
