//! Workspace preflight checks and project selection.

use crate::error::SchematicError;
use ngsetup_engine::{
    EngineError, PackageManifest, WorkspaceManifest, PACKAGE_MANIFEST_PATH,
    WORKSPACE_MANIFEST_PATH,
};
use ngsetup_tree::VirtualTree;
use tracing::error;

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check that the tree looks like an Angular workspace: both manifests exist
/// and `@angular/core` is declared. All violations are reported together.
pub fn validate_workspace(tree: &VirtualTree) -> ValidationReport {
    let mut errors = Vec::new();

    if !tree.exists(PACKAGE_MANIFEST_PATH) {
        errors.push(format!(
            "{PACKAGE_MANIFEST_PATH} not found; run this inside an Angular workspace"
        ));
    }
    if !tree.exists(WORKSPACE_MANIFEST_PATH) {
        errors.push(format!(
            "{WORKSPACE_MANIFEST_PATH} not found; run this inside an Angular workspace"
        ));
    }

    if let Ok(manifest) = PackageManifest::read(tree) {
        let angular_core = manifest
            .dependency("@angular/core")
            .or_else(|| manifest.dev_dependency("@angular/core"));
        if angular_core.is_none() {
            errors.push("this does not appear to be an Angular project".to_string());
        }
    }

    for message in &errors {
        error!("{message}");
    }

    ValidationReport { errors }
}

/// Resolve the target project: an explicitly requested name must exist; with
/// no request, a workspace with exactly one project selects it implicitly.
pub fn resolve_project(
    tree: &VirtualTree,
    requested: Option<&str>,
) -> Result<String, SchematicError> {
    let workspace = WorkspaceManifest::read(tree)?;

    if let Some(name) = requested {
        if !workspace.has_project(name) {
            return Err(EngineError::ProjectNotFound {
                project: name.to_string(),
                path: WORKSPACE_MANIFEST_PATH.into(),
            }
            .into());
        }
        return Ok(name.to_string());
    }

    let names = workspace.project_names();
    match names.as_slice() {
        [only] => Ok((*only).to_string()),
        _ => Err(SchematicError::AmbiguousProject { count: names.len() }),
    }
}
