//! Prettier: config files, devDependency, format scripts.

use crate::rule::{Rule, SchematicContext};
use ngsetup_engine::{add_dev_dependencies, add_scripts, create_file_if_not_exists, EngineResult};
use ngsetup_tree::VirtualTree;

pub const PRETTIER_CONFIG_PATH: &str = ".prettierrc.json";
pub const PRETTIER_IGNORE_PATH: &str = ".prettierignore";

const PRETTIER_CONFIG: &str = r#"{
  "semi": true,
  "trailingComma": "es5",
  "singleQuote": true,
  "printWidth": 100,
  "tabWidth": 2,
  "useTabs": false,
  "arrowParens": "always",
  "endOfLine": "lf"
}
"#;

const PRETTIER_IGNORE: &str = "node_modules
dist
coverage
.angular
build
*.min.js
*.min.css
package-lock.json
yarn.lock
pnpm-lock.yaml
";

/// Copy the shipped Prettier config and ignore file; existing files are left
/// alone with a warning.
pub struct AddPrettierConfig;

impl Rule for AddPrettierConfig {
    fn name(&self) -> &'static str {
        "add-prettier-config"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        create_file_if_not_exists(tree, PRETTIER_CONFIG_PATH, PRETTIER_CONFIG, false)?;
        create_file_if_not_exists(tree, PRETTIER_IGNORE_PATH, PRETTIER_IGNORE, false)?;
        Ok(())
    }
}

pub struct AddPrettierDependencies {
    pub version: String,
}

impl Rule for AddPrettierDependencies {
    fn name(&self) -> &'static str {
        "add-prettier-dependencies"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        add_dev_dependencies(tree, &[("prettier", &self.version)])?;
        add_scripts(
            tree,
            &[
                ("format", "prettier --write ."),
                ("format:check", "prettier --check ."),
            ],
        )
    }
}
