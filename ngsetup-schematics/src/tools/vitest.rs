//! Vitest: test-target rewrite, Karma removal, dependencies.

use crate::rule::{Rule, SchematicContext};
use ngsetup_engine::{
    add_dev_dependencies, configure_test_runner, delete_file_if_exists,
    remove_dev_dependencies, EngineResult,
};
use ngsetup_tree::VirtualTree;

pub const KARMA_CONFIG_PATH: &str = "karma.conf.js";

/// The default test stack a generated workspace carries.
pub const KARMA_PACKAGES: &[&str] = &[
    "karma",
    "karma-chrome-launcher",
    "karma-coverage",
    "karma-jasmine",
    "karma-jasmine-html-reporter",
    "jasmine-core",
    "@types/jasmine",
];

/// Point the project's test target at the vitest runner.
pub struct ConfigureVitest {
    pub project: String,
}

impl Rule for ConfigureVitest {
    fn name(&self) -> &'static str {
        "configure-vitest"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        configure_test_runner(tree, &self.project, "vitest")
    }
}

pub struct RemoveKarmaConfig;

impl Rule for RemoveKarmaConfig {
    fn name(&self) -> &'static str {
        "remove-karma-config"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        delete_file_if_exists(tree, KARMA_CONFIG_PATH);
        Ok(())
    }
}

pub struct AddVitestDependencies {
    pub vitest_version: String,
    pub jsdom_version: String,
}

impl Rule for AddVitestDependencies {
    fn name(&self) -> &'static str {
        "add-vitest-dependencies"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        add_dev_dependencies(
            tree,
            &[
                ("vitest", &self.vitest_version),
                ("jsdom", &self.jsdom_version),
            ],
        )
    }
}

pub struct RemoveKarmaDependencies;

impl Rule for RemoveKarmaDependencies {
    fn name(&self) -> &'static str {
        "remove-karma-dependencies"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        remove_dev_dependencies(tree, KARMA_PACKAGES)
    }
}
