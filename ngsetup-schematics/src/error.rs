use ngsetup_engine::EngineError;
use thiserror::Error;

/// Failures that abort a schematic run before or during the rule chain.
#[derive(Debug, Error)]
pub enum SchematicError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The tree does not look like an Angular workspace.
    #[error("workspace validation failed: {}", errors.join("; "))]
    InvalidWorkspace { errors: Vec<String> },

    /// No `--project` was given and the workspace does not have exactly one.
    #[error("cannot pick a default project: the workspace defines {count} projects, pass --project")]
    AmbiguousProject { count: usize },
}

impl SchematicError {
    /// Recommended process exit code: 2 for workspace-precondition failures,
    /// 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            SchematicError::Engine(e) => e.exit_code(),
            SchematicError::InvalidWorkspace { .. } | SchematicError::AmbiguousProject { .. } => 2,
        }
    }
}
