//! Test support: in-memory fakes, mocks, and fixture helpers for the
//! migration engine's tests.

pub mod fakes;
pub mod helpers;
pub mod mocks;

pub use fakes::{
    method, static_call, ClassDecl, InMemorySourceUnit, MapReferenceRenamer, RecordingFileMover,
};
pub use helpers::{create_test_settings, temp_workspace, write_classmap};
pub use mocks::{MockFileMover, MockReferenceRenamer};
