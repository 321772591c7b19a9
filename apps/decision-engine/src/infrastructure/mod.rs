//! Infrastructure Layer
//!
//! Adapters implementing the application ports, plus process telemetry.

pub mod audit;
pub mod macro_sources;
pub mod persistence;
pub mod portfolio;
pub mod telemetry;
