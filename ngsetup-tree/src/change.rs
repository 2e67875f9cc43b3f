//! Change records produced by [`VirtualTree::changes`](crate::VirtualTree::changes)
//! and [`VirtualTree::commit`](crate::VirtualTree::commit).

use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::Created => "created",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

/// One file-level edit, with content digests for auditing.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: Utf8PathBuf,
    pub kind: ChangeKind,
    pub before_sha256: Option<String>,
    pub after_sha256: Option<String>,
}

impl FileChange {
    /// Compare baseline and staged content. `None` when nothing changed.
    pub(crate) fn compare(
        path: &Utf8Path,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Option<Self> {
        let kind = match (before, after) {
            (None, Some(_)) => ChangeKind::Created,
            (Some(b), Some(a)) if b != a => ChangeKind::Modified,
            (Some(_), None) => ChangeKind::Deleted,
            _ => return None,
        };
        Some(Self {
            path: path.to_path_buf(),
            kind,
            before_sha256: before.map(sha256_hex),
            after_sha256: after.map(sha256_hex),
        })
    }
}

/// All edits from one run, in path order.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub changes: Vec<FileChange>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }

    /// Short human-readable summary, e.g. `3 created, 2 modified, 1 deleted`.
    pub fn summary(&self) -> String {
        format!(
            "{} created, {} modified, {} deleted",
            self.count(ChangeKind::Created),
            self.count(ChangeKind::Modified),
            self.count(ChangeKind::Deleted),
        )
    }
}

fn sha256_hex(contents: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents.as_bytes());
    hex::encode(hasher.finalize())
}
