//! `angular.json` as a whole-document value plus the test-runner rewrite.

use crate::error::{EngineError, EngineResult};
use camino::Utf8PathBuf;
use ngsetup_tree::VirtualTree;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

pub const WORKSPACE_MANIFEST_PATH: &str = "angular.json";

/// Builder id written into a rewritten test target.
pub const UNIT_TEST_BUILDER: &str = "@angular/build:unit-test";

/// Fallback when the previous test target carried no `tsConfig`.
pub const DEFAULT_TS_CONFIG: &str = "tsconfig.spec.json";

/// Parsed `angular.json` document.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceManifest {
    doc: Map<String, Value>,
}

impl WorkspaceManifest {
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            doc: serde_json::from_str(contents)?,
        })
    }

    pub fn read(tree: &VirtualTree) -> EngineResult<Self> {
        let contents =
            tree.read(WORKSPACE_MANIFEST_PATH)
                .map_err(|_| EngineError::MissingManifest {
                    path: Utf8PathBuf::from(WORKSPACE_MANIFEST_PATH),
                })?;
        Self::parse(&contents).map_err(|source| EngineError::Parse {
            path: Utf8PathBuf::from(WORKSPACE_MANIFEST_PATH),
            source,
        })
    }

    pub fn write(&self, tree: &mut VirtualTree) -> EngineResult<()> {
        let mut out = serde_json::to_string_pretty(&Value::Object(self.doc.clone()))
            .expect("manifest serializes");
        out.push('\n');
        tree.overwrite(WORKSPACE_MANIFEST_PATH, out)?;
        debug!("updated {WORKSPACE_MANIFEST_PATH}");
        Ok(())
    }

    fn projects(&self) -> Option<&Map<String, Value>> {
        self.doc.get("projects").and_then(Value::as_object)
    }

    pub fn has_project(&self, name: &str) -> bool {
        self.projects().is_some_and(|p| p.contains_key(name))
    }

    pub fn project_names(&self) -> Vec<&str> {
        self.projects()
            .map(|p| p.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The project's `architect.test` target, when it is an object.
    pub fn test_target(&self, project: &str) -> Option<&Map<String, Value>> {
        self.projects()?
            .get(project)?
            .as_object()?
            .get("architect")?
            .as_object()?
            .get("test")?
            .as_object()
    }

    fn test_target_mut(&mut self, project: &str) -> Option<&mut Map<String, Value>> {
        self.doc
            .get_mut("projects")?
            .as_object_mut()?
            .get_mut(project)?
            .as_object_mut()?
            .get_mut("architect")?
            .as_object_mut()?
            .get_mut("test")?
            .as_object_mut()
    }

    /// Replace the project's test target wholesale, carrying over a
    /// previously configured `tsConfig`. Returns whether the document changed;
    /// a project without a test target changes nothing.
    pub fn set_unit_test_runner(&mut self, project: &str, runner: &str) -> bool {
        let build_target = format!("{project}::development");
        let Some(target) = self.test_target_mut(project) else {
            debug!("project \"{project}\" has no test target, skipping runner rewrite");
            return false;
        };

        // The one piece of cross-field carry-over: a user-configured tsConfig
        // must survive the wholesale replacement.
        let ts_config = target
            .get("options")
            .and_then(Value::as_object)
            .and_then(|options| options.get("tsConfig"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TS_CONFIG)
            .to_string();

        let next = json!({
            "builder": UNIT_TEST_BUILDER,
            "options": {
                "tsConfig": ts_config,
                "runner": runner,
                "buildTarget": build_target,
            },
        });
        let Value::Object(next) = next else {
            unreachable!("literal is an object")
        };

        if *target == next {
            return false;
        }
        *target = next;
        true
    }
}

/// Point the project's unit-test target at `runner`, preserving `tsConfig`.
/// Fails with `ProjectNotFound` when the project is missing; a project
/// without a test target is skipped without error.
pub fn configure_test_runner(
    tree: &mut VirtualTree,
    project: &str,
    runner: &str,
) -> EngineResult<()> {
    let mut workspace = WorkspaceManifest::read(tree)?;
    if !workspace.has_project(project) {
        return Err(EngineError::ProjectNotFound {
            project: project.to_string(),
            path: Utf8PathBuf::from(WORKSPACE_MANIFEST_PATH),
        });
    }
    if workspace.set_unit_test_runner(project, runner) {
        info!("configured {runner} test runner for project \"{project}\"");
        workspace.write(tree)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn karma_workspace() -> WorkspaceManifest {
        WorkspaceManifest::parse(
            r#"{
  "projects": {
    "app": {
      "architect": {
        "build": { "builder": "@angular/build:application" },
        "test": {
          "builder": "@angular-devkit/build-angular:karma",
          "options": { "tsConfig": "custom.json", "polyfills": ["zone.js"] }
        }
      }
    }
  }
}"#,
        )
        .unwrap()
    }

    #[test]
    fn rewrite_preserves_ts_config_and_replaces_the_rest() {
        let mut workspace = karma_workspace();
        assert!(workspace.set_unit_test_runner("app", "vitest"));

        let target = workspace.test_target("app").unwrap();
        assert_eq!(
            target.get("builder").and_then(Value::as_str),
            Some(UNIT_TEST_BUILDER)
        );
        let options = target.get("options").unwrap().as_object().unwrap();
        assert_eq!(options.get("tsConfig").and_then(Value::as_str), Some("custom.json"));
        assert_eq!(options.get("runner").and_then(Value::as_str), Some("vitest"));
        assert_eq!(
            options.get("buildTarget").and_then(Value::as_str),
            Some("app::development")
        );
        // Wholesale replacement: stale option keys do not survive.
        assert!(options.get("polyfills").is_none());
    }

    #[test]
    fn rewrite_is_idempotent() {
        let mut workspace = karma_workspace();
        assert!(workspace.set_unit_test_runner("app", "vitest"));
        assert!(!workspace.set_unit_test_runner("app", "vitest"));
    }

    #[test]
    fn missing_test_target_changes_nothing() {
        let mut workspace =
            WorkspaceManifest::parse(r#"{"projects":{"lib":{"architect":{}}}}"#).unwrap();
        assert!(!workspace.set_unit_test_runner("lib", "vitest"));
    }

    #[test]
    fn other_projects_are_untouched() {
        let mut workspace = WorkspaceManifest::parse(
            r#"{
  "projects": {
    "app": { "architect": { "test": { "builder": "karma", "options": {} } } },
    "docs": { "architect": { "test": { "builder": "karma", "options": {} } } }
  }
}"#,
        )
        .unwrap();
        workspace.set_unit_test_runner("app", "vitest");

        let docs = workspace.test_target("docs").unwrap();
        assert_eq!(docs.get("builder").and_then(Value::as_str), Some("karma"));
    }
}
