//! Collaborator contracts for the migration engine
//!
//! The engine never parses source text, never walks a real AST, and never
//! touches the filesystem (beyond its own sidecar artifact). Everything it
//! needs from the host lives behind the narrow traits defined here:
//!
//! - [`SourceUnit`]: one parsed file, queryable and mutable in place
//! - [`FileMover`]: accepts planned file relocations
//! - [`ReferenceRenamer`]: rewrites reference occurrences for a rename map
//!
//! Hosts wrap their parser of choice in these traits; the test-support crate
//! provides in-memory implementations.

pub mod collaborators;
pub mod source_unit;

// Re-exports
pub use collaborators::{FileMover, ReferenceRenamer};
pub use source_unit::{ClassMethodInfo, ImportStmt, SourceUnit, StaticSelfCall};
