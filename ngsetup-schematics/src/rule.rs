//! The transform-rule abstraction and the chain runner.

use crate::package_manager::PackageManager;
use ngsetup_engine::EngineResult;
use ngsetup_tree::VirtualTree;
use std::fmt;
use tracing::debug;

/// One discrete, idempotent transform against the tree.
pub trait Rule {
    fn name(&self) -> &'static str;

    fn apply(&self, tree: &mut VirtualTree, ctx: &mut SchematicContext) -> EngineResult<()>;
}

/// Work the run cannot do itself and hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalTask {
    /// Install the staged dependency changes.
    InstallPackages { manager: PackageManager },

    /// Delegate to another schematic collection (e.g. the ESLint setup).
    RunExternalSchematic {
        collection: String,
        schematic: String,
        project: String,
    },
}

impl fmt::Display for ExternalTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalTask::InstallPackages { manager } => {
                write!(f, "run `{}`", manager.install_command())
            }
            ExternalTask::RunExternalSchematic {
                collection,
                schematic,
                project,
            } => write!(
                f,
                "run `ng generate {collection}:{schematic} --project {project}`"
            ),
        }
    }
}

/// Carried through the chain; collects external tasks and nothing else.
#[derive(Debug, Default)]
pub struct SchematicContext {
    tasks: Vec<ExternalTask>,
}

impl SchematicContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task(&mut self, task: ExternalTask) {
        if !self.tasks.contains(&task) {
            self.tasks.push(task);
        }
    }

    pub fn tasks(&self) -> &[ExternalTask] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<ExternalTask> {
        self.tasks
    }
}

/// Apply rules strictly in order; the first fatal error aborts the chain.
pub fn run_chain(
    rules: &[Box<dyn Rule>],
    tree: &mut VirtualTree,
    ctx: &mut SchematicContext,
) -> EngineResult<()> {
    for rule in rules {
        debug!(rule = rule.name(), "applying");
        rule.apply(tree, ctx)?;
    }
    Ok(())
}
