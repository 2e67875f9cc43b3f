//! Guarded file creation and deletion against the staging tree.

use crate::error::EngineResult;
use camino::Utf8Path;
use ngsetup_tree::VirtualTree;
use tracing::{info, warn};

/// What `create_file_if_not_exists` did. A skip is a warning-level signal to
/// the caller, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Overwritten,
    SkippedExisting,
}

impl CreateOutcome {
    pub fn was_written(self) -> bool {
        !matches!(self, CreateOutcome::SkippedExisting)
    }
}

/// Create `path` unless it exists; with `overwrite` the content is replaced
/// unconditionally, without it an existing file is left alone.
pub fn create_file_if_not_exists(
    tree: &mut VirtualTree,
    path: impl AsRef<Utf8Path>,
    content: &str,
    overwrite: bool,
) -> EngineResult<CreateOutcome> {
    let path = path.as_ref();
    if tree.exists(path) {
        if overwrite {
            tree.overwrite(path, content)?;
            info!("overwrote {path}");
            Ok(CreateOutcome::Overwritten)
        } else {
            warn!("{path} already exists, skipping creation");
            Ok(CreateOutcome::SkippedExisting)
        }
    } else {
        tree.create(path, content)?;
        info!("created {path}");
        Ok(CreateOutcome::Created)
    }
}

/// Delete `path` if present; a missing file is a no-op, never a failure.
/// Returns whether a deletion was staged.
pub fn delete_file_if_exists(tree: &mut VirtualTree, path: impl AsRef<Utf8Path>) -> bool {
    let path = path.as_ref();
    if !tree.exists(path) {
        return false;
    }
    // Existence was just checked, so the staged delete cannot fail.
    if tree.delete(path).is_ok() {
        info!("deleted {path}");
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_skips_existing_without_overwrite() {
        let mut tree = VirtualTree::in_memory();
        tree.create(".prettierrc.json", "{}\n").unwrap();

        let outcome = create_file_if_not_exists(&mut tree, ".prettierrc.json", "{\"semi\":true}\n", false)
            .unwrap();
        assert_eq!(outcome, CreateOutcome::SkippedExisting);
        assert!(!outcome.was_written());
        assert_eq!(tree.read(".prettierrc.json").unwrap(), "{}\n");
    }

    #[test]
    fn create_replaces_existing_with_overwrite() {
        let mut tree = VirtualTree::in_memory();
        tree.create(".prettierrc.json", "{}\n").unwrap();

        let outcome = create_file_if_not_exists(&mut tree, ".prettierrc.json", "{\"semi\":true}\n", true)
            .unwrap();
        assert_eq!(outcome, CreateOutcome::Overwritten);
        assert_eq!(tree.read(".prettierrc.json").unwrap(), "{\"semi\":true}\n");
    }

    #[test]
    fn delete_missing_file_is_a_noop() {
        let mut tree = VirtualTree::in_memory();
        assert!(!delete_file_if_exists(&mut tree, "karma.conf.js"));
    }
}
