//! Lockfile-based package manager detection.

use ngsetup_tree::VirtualTree;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Probe the tree's lockfiles; npm wins when none (or several) match.
    pub fn detect(tree: &VirtualTree) -> Self {
        let detected = if tree.exists("pnpm-lock.yaml") {
            PackageManager::Pnpm
        } else if tree.exists("yarn.lock") {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        };
        debug!("detected package manager: {detected}");
        detected
    }

    pub fn name(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    pub fn install_command(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm install",
            PackageManager::Yarn => "yarn install",
            PackageManager::Pnpm => "pnpm install",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_lockfile() {
        let mut tree = VirtualTree::in_memory();
        assert_eq!(PackageManager::detect(&tree), PackageManager::Npm);

        tree.create("yarn.lock", "# yarn lockfile v1\n").unwrap();
        assert_eq!(PackageManager::detect(&tree), PackageManager::Yarn);

        // pnpm's lockfile takes precedence when both are present.
        tree.create("pnpm-lock.yaml", "lockfileVersion: 6.0\n").unwrap();
        assert_eq!(PackageManager::detect(&tree), PackageManager::Pnpm);
    }

    #[test]
    fn npm_lockfile_detects_npm() {
        let mut tree = VirtualTree::in_memory();
        tree.create("package-lock.json", "{\"lockfileVersion\":3}\n")
            .unwrap();
        assert_eq!(PackageManager::detect(&tree), PackageManager::Npm);
    }
}
