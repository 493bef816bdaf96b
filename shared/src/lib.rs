//! Shared types and models for the planting advisor
//!
//! This crate contains the suitability evaluator and progress tracker shared
//! between the backend and the browser (via WASM). It performs no I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
