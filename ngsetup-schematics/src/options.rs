/// Per-run options, resolved by the caller before the chain is built.
#[derive(Debug, Clone)]
pub struct SchematicOptions {
    /// Target project in `angular.json`.
    pub project: String,

    pub eslint: bool,
    pub prettier: bool,
    pub lefthook: bool,
    pub vitest: bool,
}

impl SchematicOptions {
    /// All tools enabled for `project`.
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            eslint: true,
            prettier: true,
            lefthook: true,
            vitest: true,
        }
    }
}
