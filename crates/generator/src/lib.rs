//! `resolver-ops-generator` library crate.
//!
//! Re-exports the configuration and pipeline for integration testing. The
//! binary entrypoint lives in `main.rs`.

pub mod config;
pub mod pipeline;

pub use config::GeneratorConfig;
pub use pipeline::{generate, GenerateReport, Verification};
