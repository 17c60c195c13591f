//! The migration core: identifier resolution and cross-file rename
//! coordination for legacy flat-MVC source trees.
//!
//! Given a tree following the unnamespaced prefix+suffix convention, the
//! engine derives a canonical namespaced identity and file location for
//! every class-like symbol, then performs a coordinated repository-wide
//! rename in two strictly sequential stages:
//!
//! 1. **Declaration stage** ([`DeclarationRewritePass`]): renames
//!    declaration sites, injects namespaces, plans file moves, and records
//!    every rename in the side-partitioned [`RenameMapStore`].
//! 2. **Reference stage** ([`ReferenceRewritePass`]): rewrites all remaining
//!    reference occurrences using the completed map.
//!
//! Parsing, physical file moves, and occurrence substitution are host
//! concerns behind the `nsm-ast-api` traits.

pub mod declaration_pass;
pub mod engine;
pub mod map_store;
pub mod name_derivation;
pub mod path_classifier;
pub mod reference_pass;
pub mod relocation;

pub use declaration_pass::DeclarationRewritePass;
pub use engine::{MigrationEngine, MigrationReport};
pub use map_store::{RenameMapStore, CLASSMAP_FILE_NAME};
pub use name_derivation::{derive_canonical_name, NamingFamily};
pub use path_classifier::{application_side, extension_root_folder};
pub use reference_pass::ReferenceRewritePass;
pub use relocation::plan_move;
