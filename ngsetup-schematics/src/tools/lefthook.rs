//! Lefthook: git-hook config, devDependency, prepare script.

use crate::rule::{Rule, SchematicContext};
use ngsetup_engine::{add_dev_dependencies, add_scripts, create_file_if_not_exists, EngineResult};
use ngsetup_tree::VirtualTree;

pub const LEFTHOOK_CONFIG_PATH: &str = "lefthook.yml";

pub const LEFTHOOK_CONFIG: &str = "pre-commit:
  parallel: true
  commands:
    lint:
      glob: \"*.{js,ts,jsx,tsx,json,css,scss,html}\"
      run: npx eslint {staged_files} --fix
      stage_fixed: true
    format:
      glob: \"*.{js,ts,jsx,tsx,json,css,scss,html,md}\"
      run: npx prettier --write {staged_files}
      stage_fixed: true

pre-push:
  commands:
    test:
      run: npm test
    build:
      run: npm run build
";

pub struct AddLefthookConfig;

impl Rule for AddLefthookConfig {
    fn name(&self) -> &'static str {
        "add-lefthook-config"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        create_file_if_not_exists(tree, LEFTHOOK_CONFIG_PATH, LEFTHOOK_CONFIG, false)?;
        Ok(())
    }
}

pub struct AddLefthookDependencies {
    pub version: String,
}

impl Rule for AddLefthookDependencies {
    fn name(&self) -> &'static str {
        "add-lefthook-dependencies"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        add_dev_dependencies(tree, &[("lefthook", &self.version)])?;
        add_scripts(tree, &[("prepare", "lefthook install")])
    }
}
