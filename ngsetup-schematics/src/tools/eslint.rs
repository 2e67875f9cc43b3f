//! ESLint is externally delegated: the run only schedules the
//! `@angular-eslint` setup for the caller.

use crate::rule::{ExternalTask, Rule, SchematicContext};
use ngsetup_engine::EngineResult;
use ngsetup_tree::VirtualTree;

pub const ESLINT_COLLECTION: &str = "@angular-eslint/schematics";

pub struct AddEslint {
    pub project: String,
}

impl Rule for AddEslint {
    fn name(&self) -> &'static str {
        "add-eslint"
    }

    fn apply(&self, _tree: &mut VirtualTree, ctx: &mut SchematicContext) -> EngineResult<()> {
        ctx.add_task(ExternalTask::RunExternalSchematic {
            collection: ESLINT_COLLECTION.to_string(),
            schematic: "ng-add".to_string(),
            project: self.project.clone(),
        });
        Ok(())
    }
}
