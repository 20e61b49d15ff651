//! The ordered list of modules that make up a bundle
//!
//! Order is the de facto dependency order. Nothing checks that a module only
//! references names declared by modules listed before it.

use std::path::PathBuf;

use serde::Deserialize;

/// One input module: where it lives and how its banner describes it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Human label printed in the module banner
    pub label: String,
}

impl ModuleEntry {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    /// Path as it appears in banners and in the header manifest.
    ///
    /// Always uses forward slashes so the generated file does not depend on
    /// the platform it was built on.
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }
}

/// Built-in concatenation order
const DEFAULT_MODULES: &[(&str, &str)] = &[
    ("js/constants.js", "Constants and Configuration"),
    ("js/protocol.js", "Protocol Utilities"),
    ("js/state-manager.js", "State Manager"),
    ("js/ble-manager.js", "BLE Manager"),
    ("js/file-manager.js", "File Manager"),
    ("js/protocol-parser.js", "Protocol Parser"),
    ("js/edit-modal.js", "Edit Modal Manager"),
    ("app-modular.js", "Main Application"),
];

/// Returns the built-in module list
pub fn default_modules() -> Vec<ModuleEntry> {
    DEFAULT_MODULES
        .iter()
        .map(|(path, label)| ModuleEntry::new(*path, *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_modules_order() {
        let modules = default_modules();
        assert_eq!(modules.len(), 8);
        assert_eq!(modules[0].display_path(), "js/constants.js");
        assert_eq!(modules[7].display_path(), "app-modular.js");
        assert_eq!(modules[7].label, "Main Application");
    }

    #[test]
    fn test_display_path_normalizes_separators() {
        let entry = ModuleEntry::new(r"js\protocol.js", "Protocol Utilities");
        assert_eq!(entry.display_path(), "js/protocol.js");
    }
}
