//! Composition of tool rules into the two entry points.

use crate::error::SchematicError;
use crate::options::SchematicOptions;
use crate::package_manager::PackageManager;
use crate::rule::{run_chain, ExternalTask, Rule, SchematicContext};
use crate::tools::eslint::AddEslint;
use crate::tools::lefthook::{AddLefthookConfig, AddLefthookDependencies};
use crate::tools::prettier::{AddPrettierConfig, AddPrettierDependencies};
use crate::tools::vitest::{
    AddVitestDependencies, ConfigureVitest, RemoveKarmaConfig, RemoveKarmaDependencies,
};
use crate::validate::validate_workspace;
use crate::versions::VersionResolver;
use ngsetup_engine::{move_dependency_to_dev_dependencies, EngineResult};
use ngsetup_tree::VirtualTree;
use tracing::info;

/// Tooling packages that belong in `devDependencies`; anything that ended up
/// in `dependencies` gets moved.
const TOOLING_PACKAGES: &[&str] = &["prettier", "lefthook", "vitest", "jsdom"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schematic {
    /// Full installation: tool rules, dependency normalization, install task.
    Add,
    /// Tool rules only; the caller manages installation.
    Setup,
}

impl Schematic {
    pub fn name(self) -> &'static str {
        match self {
            Schematic::Add => "add",
            Schematic::Setup => "setup",
        }
    }
}

/// The outcome of a completed run: the resolved project and the external
/// tasks the caller still has to carry out.
#[derive(Debug)]
pub struct SchematicRun {
    pub project: String,
    pub tasks: Vec<ExternalTask>,
}

struct NormalizeToolingDependencies;

impl Rule for NormalizeToolingDependencies {
    fn name(&self) -> &'static str {
        "normalize-tooling-dependencies"
    }

    fn apply(&self, tree: &mut VirtualTree, _ctx: &mut SchematicContext) -> EngineResult<()> {
        for package in TOOLING_PACKAGES {
            move_dependency_to_dev_dependencies(tree, package)?;
        }
        Ok(())
    }
}

/// Build the ordered rule list for one run.
pub fn build_rules(
    schematic: Schematic,
    options: &SchematicOptions,
    versions: &VersionResolver,
) -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();

    if options.eslint {
        info!("adding ESLint (delegated)");
        rules.push(Box::new(AddEslint {
            project: options.project.clone(),
        }));
    }

    if options.prettier {
        info!("adding Prettier");
        rules.push(Box::new(AddPrettierConfig));
        rules.push(Box::new(AddPrettierDependencies {
            version: versions.resolve("prettier").to_string(),
        }));
    }

    if options.lefthook {
        info!("adding Lefthook");
        rules.push(Box::new(AddLefthookConfig));
        rules.push(Box::new(AddLefthookDependencies {
            version: versions.resolve("lefthook").to_string(),
        }));
    }

    if options.vitest {
        info!("configuring Vitest");
        rules.push(Box::new(ConfigureVitest {
            project: options.project.clone(),
        }));
        rules.push(Box::new(RemoveKarmaConfig));
        rules.push(Box::new(AddVitestDependencies {
            vitest_version: versions.resolve("vitest").to_string(),
            jsdom_version: versions.resolve("jsdom").to_string(),
        }));
        rules.push(Box::new(RemoveKarmaDependencies));
    }

    if schematic == Schematic::Add {
        rules.push(Box::new(NormalizeToolingDependencies));
    }

    rules
}

/// Validate the workspace, then apply the chain against the tree. The tree is
/// only staged; committing is the caller's decision.
pub fn run_schematic(
    schematic: Schematic,
    tree: &mut VirtualTree,
    options: &SchematicOptions,
    versions: &VersionResolver,
) -> Result<SchematicRun, SchematicError> {
    let report = validate_workspace(tree);
    if !report.is_valid() {
        return Err(SchematicError::InvalidWorkspace {
            errors: report.errors,
        });
    }

    info!(
        project = %options.project,
        "running {} schematic",
        schematic.name()
    );

    let rules = build_rules(schematic, options, versions);
    let mut ctx = SchematicContext::new();
    run_chain(&rules, tree, &mut ctx)?;

    if schematic == Schematic::Add {
        ctx.add_task(ExternalTask::InstallPackages {
            manager: PackageManager::detect(tree),
        });
    }

    Ok(SchematicRun {
        project: options.project.clone(),
        tasks: ctx.into_tasks(),
    })
}
