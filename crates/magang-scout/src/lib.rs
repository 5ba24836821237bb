//! Internship vacancy search: region-aware filters, upstream clients, and admission scoring.

pub mod config;
pub mod error;
pub mod filters;
pub mod listings;
pub mod regions;
pub mod telemetry;
pub mod upstream;
