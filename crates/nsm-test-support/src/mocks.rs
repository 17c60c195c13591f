//! Mock implementations of the host collaborator traits

use mockall::mock;
use nsm_ast_api::{FileMover, ReferenceRenamer, SourceUnit};
use nsm_foundation::model::FileMoveIntent;
use std::collections::BTreeMap;

mock! {
    pub FileMover {}

    impl FileMover for FileMover {
        fn move_file(&mut self, intent: FileMoveIntent);
    }
}

mock! {
    pub ReferenceRenamer {}

    impl ReferenceRenamer for ReferenceRenamer {
        fn rename_occurrences(
            &self,
            unit: &mut dyn SourceUnit,
            map: &BTreeMap<String, String>,
        ) -> usize;
    }
}

/// Create a mock file mover for testing
pub fn mock_file_mover() -> MockFileMover {
    MockFileMover::new()
}

/// Create a mock reference renamer for testing
pub fn mock_reference_renamer() -> MockReferenceRenamer {
    MockReferenceRenamer::new()
}
