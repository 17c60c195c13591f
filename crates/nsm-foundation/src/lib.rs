//! Foundation Layer - Core types, error handling, and configuration
//!
//! This crate provides the foundational building blocks for nsmigrate:
//! - Core data structures (application sides, canonical identities, rules)
//! - Error types shared across the workspace
//! - Configuration loading and logging initialization

pub mod config;
pub mod error;
pub mod logging;
pub mod model;

// Re-export commonly used types for convenience
pub use error::{MigrateError, MigrateResult};
pub use model::{ApplicationSide, CanonicalIdentity, FileMoveIntent, LegacyPrefixRule};
