//! Second-pass rewriting of references left behind by the first pass.
//!
//! Works purely from the completed rename map: for every file, look up the
//! partition matching the file's side and hand the map to the reference
//! renaming collaborator. The pass itself never derives names.

use crate::map_store::RenameMapStore;
use crate::path_classifier::application_side;
use nsm_ast_api::{ReferenceRenamer, SourceUnit};
use tracing::debug;

/// Drives the second traversal over one file at a time.
pub struct ReferenceRewritePass<'a> {
    store: &'a RenameMapStore,
    renamer: &'a dyn ReferenceRenamer,
    prefer_imports: bool,
}

impl<'a> ReferenceRewritePass<'a> {
    pub fn new(
        store: &'a RenameMapStore,
        renamer: &'a dyn ReferenceRenamer,
        prefer_imports: bool,
    ) -> Self {
        Self {
            store,
            renamer,
            prefer_imports,
        }
    }

    /// Rewrite one file's legacy references. Returns how many were
    /// rewritten.
    ///
    /// The lookup is scoped to the partition for the file's side, so a
    /// site file never picks up an administrator rename of the same
    /// legacy name.
    pub fn run(&self, unit: &mut dyn SourceUnit) -> usize {
        let side = application_side(unit.path());
        let map = self.store.map_for(side);
        if map.is_empty() {
            return 0;
        }

        let rewritten = self.renamer.rename_occurrences(unit, map);
        if rewritten > 0 {
            debug!(path = %unit.path(), side = %side, rewritten, "rewrote legacy references");
        }

        // Imports of a renamed class point at a name that no longer
        // exists; aliased imports are left for the author to resolve.
        if self.prefer_imports {
            for import in unit.imports() {
                if import.alias.is_none() && map.contains_key(&import.name) {
                    unit.remove_import(&import.name);
                }
            }
        }

        rewritten
    }
}
