//! Configuration loading
//!
//! Built-in defaults reproduce the hand-maintained module list, output file
//! and helper text, so running with no config at all is the normal case.
//! Files are layered in this order, later ones overriding earlier keys:
//!
//! 1. `esflat/esflat.toml` in the user's config directory
//! 2. `esflat.toml` in the project root
//! 3. a file named explicitly on the command line
//!
//! Discovered files are optional; an explicitly named one must exist.

use std::{
    fs,
    path::{Path, PathBuf},
};

use etcetera::BaseStrategy;
use log::{debug, info};
use serde::Deserialize;

use crate::{
    assembler::HeaderSpec,
    error::{BundleError, BundleResult},
    helper::HelperSpec,
    module_list::{ModuleEntry, default_modules},
};

pub const CONFIG_FILE_NAME: &str = "esflat.toml";
const DEFAULT_OUTPUT: &str = "app-bundled.js";

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Modules in concatenation order
    pub modules: Vec<ModuleEntry>,
    /// Output file, relative to the project root
    pub output: PathBuf,
    pub helper: HelperSpec,
    pub header: HeaderSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modules: default_modules(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            helper: HelperSpec::default(),
            header: HeaderSpec::default(),
        }
    }
}

/// On-disk shape of a config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    modules: Option<Vec<ModuleEntry>>,
    output: Option<PathBuf>,
    helper: Option<HelperSpec>,
    header: Option<HeaderSpec>,
}

/// A config file location and whether its absence is an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub required: bool,
}

impl Config {
    /// Resolve configuration for a project rooted at `project_root`
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> BundleResult<Self> {
        Self::load_from_sources(&config_sources(project_root, explicit))
    }

    /// Layer the given sources over the built-in defaults
    pub fn load_from_sources(sources: &[ConfigSource]) -> BundleResult<Self> {
        let mut config = Self::default();
        for source in sources {
            if !source.required && !source.path.is_file() {
                debug!("No config file at {}", source.path.display());
                continue;
            }
            debug!("Loading config from {}", source.path.display());
            let changed = config.merge(read_config_file(&source.path)?);
            if changed && !source.required {
                info!(
                    "Discovered config {} overrides the built-in module list or output settings",
                    source.path.display()
                );
            }
        }
        config.validate(sources.last().map(|s| s.path.as_path()))?;
        Ok(config)
    }

    /// Apply the keys present in `file`; returns whether anything changed
    fn merge(&mut self, file: ConfigFile) -> bool {
        let before = self.clone();
        if let Some(modules) = file.modules {
            self.modules = modules;
        }
        if let Some(output) = file.output {
            self.output = output;
        }
        if let Some(helper) = file.helper {
            self.helper = helper;
        }
        if let Some(header) = file.header {
            self.header = header;
        }
        *self != before
    }

    fn validate(&self, origin: Option<&Path>) -> BundleResult<()> {
        let origin = origin.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));
        if self.modules.is_empty() {
            return Err(BundleError::Config {
                path: origin.to_path_buf(),
                message: "module list is empty".to_owned(),
            });
        }
        if self.helper.declaration.is_empty() {
            return Err(BundleError::Config {
                path: origin.to_path_buf(),
                message: "shared helper declaration is empty".to_owned(),
            });
        }
        Ok(())
    }
}

/// Config file locations, lowest precedence first
pub fn config_sources(project_root: &Path, explicit: Option<&Path>) -> Vec<ConfigSource> {
    let mut sources = Vec::with_capacity(3);

    match etcetera::choose_base_strategy() {
        Ok(strategy) => sources.push(ConfigSource {
            path: strategy.config_dir().join("esflat").join(CONFIG_FILE_NAME),
            required: false,
        }),
        Err(e) => debug!("Skipping user config, no home directory: {e}"),
    }

    sources.push(ConfigSource {
        path: project_root.join(CONFIG_FILE_NAME),
        required: false,
    });

    if let Some(path) = explicit {
        sources.push(ConfigSource {
            path: path.to_path_buf(),
            required: true,
        });
    }

    sources
}

fn read_config_file(path: &Path) -> BundleResult<ConfigFile> {
    let text = fs::read_to_string(path).map_err(|e| BundleError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&text).map_err(|e| BundleError::Config {
        path: path.to_path_buf(),
        message: e.message().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn optional(path: PathBuf) -> ConfigSource {
        ConfigSource {
            path,
            required: false,
        }
    }

    #[test]
    fn test_defaults_without_files() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = Config::load_from_sources(&[optional(temp_dir.path().join("esflat.toml"))])
            .expect("defaults are valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.output, PathBuf::from("app-bundled.js"));
        assert_eq!(config.modules.len(), 8);
    }

    #[test]
    fn test_project_file_overrides_keys() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("esflat.toml");
        fs::write(
            &path,
            r#"
output = "dist/bundle.js"

[[modules]]
path = "src/a.js"
label = "Module A"

[[modules]]
path = "src/b.js"
label = "Module B"

[header]
title = "Demo - Bundled Version"
"#,
        )
        .expect("write config");

        let config = Config::load_from_sources(&[optional(path)]).expect("valid config");
        assert_eq!(config.output, PathBuf::from("dist/bundle.js"));
        assert_eq!(
            config.modules,
            vec![
                ModuleEntry::new("src/a.js", "Module A"),
                ModuleEntry::new("src/b.js", "Module B"),
            ]
        );
        assert_eq!(config.header.title, "Demo - Bundled Version");
        // Unset header keys keep their defaults
        assert_eq!(config.header.rebuild, HeaderSpec::default().rebuild);
        assert_eq!(config.helper, HelperSpec::default());
    }

    #[test]
    fn test_later_sources_win() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let user = temp_dir.path().join("user.toml");
        let project = temp_dir.path().join("project.toml");
        fs::write(&user, "output = \"user.js\"\n").expect("write user config");
        fs::write(&project, "output = \"project.js\"\n").expect("write project config");

        let config = Config::load_from_sources(&[optional(user), optional(project)])
            .expect("valid config");
        assert_eq!(config.output, PathBuf::from("project.js"));
    }

    #[test]
    fn test_merge_reports_changes() {
        let mut config = Config::default();
        assert!(!config.merge(ConfigFile::default()));
        assert!(!config.merge(ConfigFile {
            output: Some(PathBuf::from("app-bundled.js")),
            ..ConfigFile::default()
        }));
        assert!(config.merge(ConfigFile {
            output: Some(PathBuf::from("other.js")),
            ..ConfigFile::default()
        }));
        assert_eq!(config.output, PathBuf::from("other.js"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let err = Config::load_from_sources(&[ConfigSource {
            path: temp_dir.path().join("nope.toml"),
            required: true,
        }])
        .expect_err("explicit config must exist");
        assert!(matches!(err, BundleError::Config { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("esflat.toml");
        fs::write(&path, "outptu = \"typo.js\"\n").expect("write config");

        let err = Config::load_from_sources(&[optional(path)]).expect_err("unknown key");
        assert!(err.to_string().contains("outptu"));
    }

    #[test]
    fn test_empty_module_list_rejected() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("esflat.toml");
        fs::write(&path, "modules = []\n").expect("write config");

        let err = Config::load_from_sources(&[optional(path)]).expect_err("empty module list");
        assert!(err.to_string().contains("module list is empty"));
    }

    #[test]
    fn test_explicit_source_is_last() {
        let root = Path::new("/project");
        let sources = config_sources(root, Some(Path::new("/elsewhere/custom.toml")));
        let last = sources.last().expect("at least one source");
        assert_eq!(last.path, PathBuf::from("/elsewhere/custom.toml"));
        assert!(last.required);
        assert!(
            sources
                .iter()
                .any(|s| s.path == root.join("esflat.toml") && !s.required)
        );
    }
}
