//! FaceTrigger Common Utilities
//!
//! Shared infrastructure for all FaceTrigger crates:
//! - Error types and result aliases
//! - Tracing/logging initialization
//! - Configuration loading (detector thresholds, paired policy, logging)

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
