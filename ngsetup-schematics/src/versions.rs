//! Version resolution for the tooling packages a run installs.
//!
//! Built as a plain value and passed into chain construction: pins from the
//! config file win over the shipped table, and unknown packages fall back to
//! `latest`.

use std::collections::BTreeMap;

/// The tooling versions this release ships with.
const BUILTIN_VERSIONS: &[(&str, &str)] = &[
    ("prettier", "^3.6.2"),
    ("lefthook", "^1.13.4"),
    ("vitest", "^3.2.4"),
    ("jsdom", "^26.1.0"),
];

pub const FALLBACK_VERSION: &str = "latest";

#[derive(Debug, Clone, Default)]
pub struct VersionResolver {
    pins: BTreeMap<String, String>,
}

impl VersionResolver {
    /// Only the shipped version table.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Shipped table overridden by caller-supplied pins.
    pub fn with_pins(pins: BTreeMap<String, String>) -> Self {
        Self { pins }
    }

    pub fn resolve(&self, package: &str) -> &str {
        if let Some(pinned) = self.pins.get(package) {
            return pinned;
        }
        BUILTIN_VERSIONS
            .iter()
            .find(|(name, _)| *name == package)
            .map(|(_, version)| *version)
            .unwrap_or(FALLBACK_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_win_over_the_builtin_table() {
        let mut pins = BTreeMap::new();
        pins.insert("prettier".to_string(), "3.5.0".to_string());
        let resolver = VersionResolver::with_pins(pins);

        assert_eq!(resolver.resolve("prettier"), "3.5.0");
        assert_eq!(resolver.resolve("lefthook"), "^1.13.4");
    }

    #[test]
    fn unknown_packages_fall_back_to_latest() {
        assert_eq!(VersionResolver::builtin().resolve("left-pad"), "latest");
    }
}
