//! Configuration-merge engine for Angular workspace manifests.
//!
//! Responsibilities:
//! - Read/mutate/write `package.json` and `angular.json` as whole documents.
//! - Expose the additive/subtractive transform operations used by the rule
//!   chains: dev-dependency and script upserts, removals, the dependency
//!   section move, the test-runner rewrite, and guarded file create/delete.
//!
//! Every operation is a self-contained read-modify-write against the virtual
//! tree: the manifest is parsed once, edited as a value, and written back in a
//! single overwrite. Reapplying an operation with identical inputs stages no
//! change at all.

mod error;
mod files;
mod manifest;
mod workspace;

pub use error::{EngineError, EngineResult};
pub use files::{create_file_if_not_exists, delete_file_if_exists, CreateOutcome};
pub use manifest::{
    add_dev_dependencies, add_scripts, move_dependency_to_dev_dependencies,
    remove_dev_dependencies, PackageManifest, PACKAGE_MANIFEST_PATH,
};
pub use workspace::{
    configure_test_runner, WorkspaceManifest, DEFAULT_TS_CONFIG, UNIT_TEST_BUILDER,
    WORKSPACE_MANIFEST_PATH,
};
