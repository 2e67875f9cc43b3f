//! Error types for the merge engine.
//!
//! Two kinds are fatal to a rule chain: a manifest that cannot be read at all
//! (the tool is not running inside a workspace) and a target project missing
//! from `angular.json`. Everything else the engine resolves internally.

use camino::Utf8PathBuf;
use ngsetup_tree::TreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A required manifest file could not be read (exit code 2).
    #[error("manifest not found: {path}")]
    MissingManifest { path: Utf8PathBuf },

    /// The named project does not exist in the workspace manifest (exit code 2).
    #[error("project \"{project}\" not found in {path}")]
    ProjectNotFound {
        project: String,
        path: Utf8PathBuf,
    },

    /// A manifest exists but is not valid JSON (exit code 1).
    #[error("parse {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A staging-tree operation failed (exit code 1).
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl EngineError {
    /// True for workspace-precondition violations that must abort the whole
    /// rule chain (exit code 2).
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            EngineError::MissingManifest { .. } | EngineError::ProjectNotFound { .. }
        )
    }

    /// Recommended process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_precondition() { 2 } else { 1 }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
