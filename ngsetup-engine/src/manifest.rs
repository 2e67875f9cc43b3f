//! `package.json` as a whole-document value plus the transform operations on
//! it.
//!
//! The document is kept as a raw JSON object so unrecognized fields survive a
//! rewrite untouched, and key order is preserved for readable diffs. The
//! recognized sections (`scripts`, `dependencies`, `devDependencies`) are
//! name→string mappings created lazily on first insert.

use crate::error::{EngineError, EngineResult};
use camino::Utf8PathBuf;
use ngsetup_tree::VirtualTree;
use serde_json::{Map, Value};
use tracing::{debug, info};

pub const PACKAGE_MANIFEST_PATH: &str = "package.json";

const SCRIPTS: &str = "scripts";
const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";

/// Parsed `package.json` document.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    doc: Map<String, Value>,
}

impl PackageManifest {
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            doc: serde_json::from_str(contents)?,
        })
    }

    /// Read the manifest from the tree. Any failure to produce the file's
    /// contents is a `MissingManifest` precondition violation.
    pub fn read(tree: &VirtualTree) -> EngineResult<Self> {
        let contents =
            tree.read(PACKAGE_MANIFEST_PATH)
                .map_err(|_| EngineError::MissingManifest {
                    path: Utf8PathBuf::from(PACKAGE_MANIFEST_PATH),
                })?;
        Self::parse(&contents).map_err(|source| EngineError::Parse {
            path: Utf8PathBuf::from(PACKAGE_MANIFEST_PATH),
            source,
        })
    }

    /// Write the manifest back in one overwrite: 2-space indentation, trailing
    /// newline.
    pub fn write(&self, tree: &mut VirtualTree) -> EngineResult<()> {
        tree.overwrite(PACKAGE_MANIFEST_PATH, self.to_pretty_string())?;
        debug!("updated {PACKAGE_MANIFEST_PATH}");
        Ok(())
    }

    pub fn to_pretty_string(&self) -> String {
        let mut out = serde_json::to_string_pretty(&Value::Object(self.doc.clone()))
            .expect("manifest serializes");
        out.push('\n');
        out
    }

    pub fn name(&self) -> Option<&str> {
        self.doc.get("name").and_then(Value::as_str)
    }

    fn section(&self, key: &str) -> Option<&Map<String, Value>> {
        self.doc.get(key).and_then(Value::as_object)
    }

    fn section_mut(&mut self, key: &str) -> &mut Map<String, Value> {
        let entry = self
            .doc
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        entry.as_object_mut().expect("section is an object")
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.section(SCRIPTS)?.get(name)?.as_str()
    }

    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.section(DEPENDENCIES)?.get(name)?.as_str()
    }

    pub fn dev_dependency(&self, name: &str) -> Option<&str> {
        self.section(DEV_DEPENDENCIES)?.get(name)?.as_str()
    }

    /// Upsert into `devDependencies`. Returns whether the document changed.
    pub fn set_dev_dependency(&mut self, name: &str, version: &str) -> bool {
        upsert(self.section_mut(DEV_DEPENDENCIES), name, version)
    }

    /// Remove from `devDependencies`. Absent names (or an absent section) are
    /// a no-op. Returns whether the document changed.
    pub fn remove_dev_dependency(&mut self, name: &str) -> bool {
        match self.doc.get_mut(DEV_DEPENDENCIES).and_then(Value::as_object_mut) {
            Some(deps) => deps.shift_remove(name).is_some(),
            None => false,
        }
    }

    /// Upsert into `scripts`, last-writer-wins. Returns whether the document
    /// changed.
    pub fn set_script(&mut self, name: &str, command: &str) -> bool {
        upsert(self.section_mut(SCRIPTS), name, command)
    }

    /// Move an entry from `dependencies` to `devDependencies`. Absent entries
    /// (already-moved state) are a no-op. Returns whether the document changed.
    pub fn move_dependency_to_dev(&mut self, name: &str) -> bool {
        let Some(version) = self
            .doc
            .get_mut(DEPENDENCIES)
            .and_then(Value::as_object_mut)
            .and_then(|deps| deps.shift_remove(name))
        else {
            return false;
        };
        self.section_mut(DEV_DEPENDENCIES)
            .insert(name.to_string(), version);
        true
    }
}

fn upsert(section: &mut Map<String, Value>, name: &str, value: &str) -> bool {
    if section.get(name).and_then(Value::as_str) == Some(value) {
        return false;
    }
    section.insert(name.to_string(), Value::String(value.to_string()));
    true
}

/// Upsert each (name, version) pair into `devDependencies`, creating the
/// section if absent. Never touches `dependencies`.
pub fn add_dev_dependencies(tree: &mut VirtualTree, entries: &[(&str, &str)]) -> EngineResult<()> {
    let mut manifest = PackageManifest::read(tree)?;
    let mut changed = false;
    for (name, version) in entries {
        if manifest.set_dev_dependency(name, version) {
            info!("added {name}@{version} to devDependencies");
            changed = true;
        }
    }
    if changed {
        manifest.write(tree)?;
    }
    Ok(())
}

/// Remove each named package from `devDependencies`. Names not present are
/// silently ignored.
pub fn remove_dev_dependencies(tree: &mut VirtualTree, names: &[&str]) -> EngineResult<()> {
    let mut manifest = PackageManifest::read(tree)?;
    let mut changed = false;
    for name in names {
        if manifest.remove_dev_dependency(name) {
            info!("removed {name} from devDependencies");
            changed = true;
        }
    }
    if changed {
        manifest.write(tree)?;
    }
    Ok(())
}

/// Upsert each (name, command) pair into `scripts`, overwriting any prior
/// command under that name.
pub fn add_scripts(tree: &mut VirtualTree, entries: &[(&str, &str)]) -> EngineResult<()> {
    let mut manifest = PackageManifest::read(tree)?;
    let mut changed = false;
    for (name, command) in entries {
        if manifest.set_script(name, command) {
            info!("added script: {name}");
            changed = true;
        }
    }
    if changed {
        manifest.write(tree)?;
    }
    Ok(())
}

/// Move a package from `dependencies` to `devDependencies` if it is present
/// there; the already-moved state is a valid no-op.
pub fn move_dependency_to_dev_dependencies(tree: &mut VirtualTree, name: &str) -> EngineResult<()> {
    let mut manifest = PackageManifest::read(tree)?;
    if manifest.move_dependency_to_dev(name) {
        info!("moved {name} to devDependencies");
        manifest.write(tree)?;
    }
    Ok(())
}
