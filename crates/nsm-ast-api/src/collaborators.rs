//! Filesystem and reference-renaming collaborators

use crate::source_unit::SourceUnit;
use nsm_foundation::model::FileMoveIntent;
use std::collections::BTreeMap;

/// Accepts planned file relocations.
///
/// The host is solely responsible for the physical read/move/write; the
/// engine only hands over intents.
pub trait FileMover {
    fn move_file(&mut self, intent: FileMoveIntent);
}

/// Rewrites reference occurrences during the second pass.
///
/// The matching strategy (textual vs. type-resolved) is the host's concern;
/// the engine supplies the completed legacy → canonical map for the file's
/// side.
pub trait ReferenceRenamer {
    /// Rewrite every occurrence of a mapped legacy name in `unit`.
    /// Returns the number of rewritten occurrences.
    fn rename_occurrences(
        &self,
        unit: &mut dyn SourceUnit,
        map: &BTreeMap<String, String>,
    ) -> usize;
}
