//! Two-stage migration driver.
//!
//! The engine owns the settings and the rename map store and sequences the
//! two passes: the declaration stage must run to completion over the whole
//! source tree (and its map must be checkpointed) before the reference
//! stage starts, because reference rewriting can only trust a complete map.

use crate::declaration_pass::DeclarationRewritePass;
use crate::map_store::RenameMapStore;
use crate::reference_pass::ReferenceRewritePass;
use nsm_ast_api::{FileMover, ReferenceRenamer, SourceUnit};
use nsm_foundation::config::MigrationSettings;
use nsm_foundation::error::MigrateResult;
use serde::Serialize;
use tracing::info;

/// Counters summarizing one full migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    /// Files changed by the declaration stage
    pub changed_files: usize,
    /// References rewritten by the reference stage
    pub rewritten_references: usize,
    /// Total rename map entries after the run
    pub map_entries: usize,
}

/// Sequences the declaration and reference stages over a set of files.
pub struct MigrationEngine {
    settings: MigrationSettings,
    store: RenameMapStore,
}

impl MigrationEngine {
    /// Create an engine, loading any rename map persisted by a prior run
    /// from the configured sidecar directory.
    pub fn new(settings: MigrationSettings) -> Self {
        let store = RenameMapStore::new(&settings.classmap_dir);
        Self { settings, store }
    }

    /// The rename map accumulated so far.
    pub fn store(&self) -> &RenameMapStore {
        &self.store
    }

    /// Run the declaration stage over every file, then checkpoint the
    /// rename map. Returns the number of changed files.
    ///
    /// Stops at the first file that fails; entries recorded up to that
    /// point are still checkpointed, since the files they describe have
    /// already been rewritten.
    pub fn run_declaration_stage(
        &mut self,
        units: &mut [&mut dyn SourceUnit],
        mover: &mut dyn FileMover,
    ) -> MigrateResult<usize> {
        let mut outcome = Ok(0);

        {
            let mut pass = DeclarationRewritePass::new(&self.settings.rules, &mut self.store);
            let mut changed_files = 0;
            for unit in units.iter_mut() {
                match pass.run(&mut **unit, mover) {
                    Ok(true) => changed_files += 1,
                    Ok(false) => {}
                    Err(err) => {
                        outcome = Err(err);
                        break;
                    }
                }
            }
            if outcome.is_ok() {
                outcome = Ok(changed_files);
            }
        }

        self.store.save()?;

        let changed_files = outcome?;
        info!(
            changed_files,
            map_entries = self.store.len(),
            "declaration stage complete"
        );
        Ok(changed_files)
    }

    /// Run the reference stage over every file. Returns the number of
    /// rewritten references.
    pub fn run_reference_stage(
        &self,
        units: &mut [&mut dyn SourceUnit],
        renamer: &dyn ReferenceRenamer,
    ) -> usize {
        let pass = ReferenceRewritePass::new(&self.store, renamer, self.settings.prefer_imports);

        let mut rewritten_references = 0;
        for unit in units.iter_mut() {
            rewritten_references += pass.run(&mut **unit);
        }

        info!(rewritten_references, "reference stage complete");
        rewritten_references
    }

    /// Run both stages back to back over the same set of files.
    pub fn run(
        &mut self,
        units: &mut [&mut dyn SourceUnit],
        mover: &mut dyn FileMover,
        renamer: &dyn ReferenceRenamer,
    ) -> MigrateResult<MigrationReport> {
        let changed_files = self.run_declaration_stage(units, mover)?;
        let rewritten_references = self.run_reference_stage(units, renamer);

        Ok(MigrationReport {
            changed_files,
            rewritten_references,
            map_entries: self.store.len(),
        })
    }
}
