//! Virtual file tree for ngsetup runs.
//!
//! Responsibilities:
//! - Stage creates/overwrites/deletes in memory on top of an optional disk root.
//! - Commit staged edits to disk, writing only files that actually changed.
//! - Render a unified-diff preview of the staged state.
//!
//! One run owns one tree; transforms borrow it sequentially. Nothing touches
//! disk until [`VirtualTree::commit`].

mod change;
mod diff;

pub use change::{ChangeKind, ChangeSet, FileChange};

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("file not found in tree: {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("file already exists in tree: {path}")]
    AlreadyExists { path: Utf8PathBuf },

    #[error("tree has no disk root to commit to")]
    NoRoot,

    #[error("{path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Debug, Clone)]
enum Node {
    Written(String),
    Deleted,
}

/// In-memory staging area over a project root.
///
/// Reads fall through to disk for paths that have not been staged; writes and
/// deletes are staged until [`commit`](VirtualTree::commit). A tree built with
/// [`in_memory`](VirtualTree::in_memory) has no disk backing at all.
#[derive(Debug, Clone)]
pub struct VirtualTree {
    root: Option<Utf8PathBuf>,
    staged: BTreeMap<Utf8PathBuf, Node>,
}

impl VirtualTree {
    /// A tree with no disk backing. Reads see only staged content.
    pub fn in_memory() -> Self {
        Self {
            root: None,
            staged: BTreeMap::new(),
        }
    }

    /// A tree backed by the directory at `root`.
    pub fn at(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            staged: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> Option<&Utf8Path> {
        self.root.as_deref()
    }

    fn abs(&self, rel: &Utf8Path) -> Option<Utf8PathBuf> {
        self.root.as_ref().map(|r| r.join(rel))
    }

    /// Content currently on disk for `path`, ignoring staged edits.
    /// `Ok(None)` when there is no backing root or the file does not exist.
    fn baseline(&self, path: &Utf8Path) -> TreeResult<Option<String>> {
        let Some(abs) = self.abs(path) else {
            return Ok(None);
        };
        match fs::read_to_string(&abs) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TreeError::Io {
                path: abs,
                source: e,
            }),
        }
    }

    pub fn exists(&self, path: impl AsRef<Utf8Path>) -> bool {
        let path = path.as_ref();
        match self.staged.get(path) {
            Some(Node::Written(_)) => true,
            Some(Node::Deleted) => false,
            None => self
                .abs(path)
                .map(|abs| abs.is_file())
                .unwrap_or(false),
        }
    }

    pub fn read(&self, path: impl AsRef<Utf8Path>) -> TreeResult<String> {
        let path = path.as_ref();
        match self.staged.get(path) {
            Some(Node::Written(contents)) => Ok(contents.clone()),
            Some(Node::Deleted) => Err(TreeError::NotFound {
                path: path.to_path_buf(),
            }),
            None => self.baseline(path)?.ok_or_else(|| TreeError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Stage a new file. Fails if the path already exists (staged or on disk).
    pub fn create(
        &mut self,
        path: impl AsRef<Utf8Path>,
        content: impl Into<String>,
    ) -> TreeResult<()> {
        let path = path.as_ref();
        if self.exists(path) {
            return Err(TreeError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        self.staged
            .insert(path.to_path_buf(), Node::Written(content.into()));
        Ok(())
    }

    /// Stage new content for an existing file.
    pub fn overwrite(
        &mut self,
        path: impl AsRef<Utf8Path>,
        content: impl Into<String>,
    ) -> TreeResult<()> {
        let path = path.as_ref();
        if !self.exists(path) {
            return Err(TreeError::NotFound {
                path: path.to_path_buf(),
            });
        }
        self.staged
            .insert(path.to_path_buf(), Node::Written(content.into()));
        Ok(())
    }

    /// Stage a deletion of an existing file.
    pub fn delete(&mut self, path: impl AsRef<Utf8Path>) -> TreeResult<()> {
        let path = path.as_ref();
        if !self.exists(path) {
            return Err(TreeError::NotFound {
                path: path.to_path_buf(),
            });
        }
        self.staged.insert(path.to_path_buf(), Node::Deleted);
        Ok(())
    }

    /// Staged edits that would change the backing state, as change records.
    ///
    /// Staged content identical to the baseline is not a change; re-running an
    /// idempotent transform chain yields an empty set.
    pub fn changes(&self) -> TreeResult<ChangeSet> {
        let mut changes = Vec::new();
        for (path, node) in &self.staged {
            let before = self.baseline(path)?;
            let after = match node {
                Node::Written(contents) => Some(contents.as_str()),
                Node::Deleted => None,
            };
            if let Some(record) = FileChange::compare(path, before.as_deref(), after) {
                changes.push(record);
            }
        }
        Ok(ChangeSet { changes })
    }

    /// Write staged edits to disk. Only changed files are touched; parent
    /// directories are created as needed. Returns the applied change records.
    pub fn commit(&self) -> TreeResult<ChangeSet> {
        if self.root.is_none() {
            return Err(TreeError::NoRoot);
        }

        let set = self.changes()?;
        for record in &set.changes {
            let abs = self.abs(&record.path).expect("commit requires a root");
            match record.kind {
                ChangeKind::Created | ChangeKind::Modified => {
                    if let Some(parent) = abs.parent() {
                        fs::create_dir_all(parent).map_err(|e| TreeError::Io {
                            path: parent.to_path_buf(),
                            source: e,
                        })?;
                    }
                    let contents = match self.staged.get(&record.path) {
                        Some(Node::Written(contents)) => contents,
                        _ => unreachable!("change record without staged content"),
                    };
                    fs::write(&abs, contents).map_err(|e| TreeError::Io {
                        path: abs.clone(),
                        source: e,
                    })?;
                }
                ChangeKind::Deleted => {
                    fs::remove_file(&abs).map_err(|e| TreeError::Io {
                        path: abs.clone(),
                        source: e,
                    })?;
                }
            }
            debug!(path = %record.path, kind = %record.kind, "committed");
        }
        Ok(set)
    }

    /// Unified diff of staged edits against the baseline.
    pub fn diff(&self) -> TreeResult<String> {
        let mut before = BTreeMap::new();
        let mut after = BTreeMap::new();
        for (path, node) in &self.staged {
            before.insert(path.clone(), self.baseline(path)?.unwrap_or_default());
            after.insert(
                path.clone(),
                match node {
                    Node::Written(contents) => contents.clone(),
                    Node::Deleted => String::new(),
                },
            );
        }
        Ok(diff::render_patch(&before, &after))
    }
}
