use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILENAME;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default, rename = "cxx-backport")]
    /// The main configuration section.
    pub cxx_backport: BackportConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Options of the `[cxx-backport]` section.
///
/// Every field is optional; command-line flags take precedence.
pub struct BackportConfig {
    /// Maximum number of rewrite passes per file.
    pub max_passes: Option<usize>,
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to include even if excluded by default.
    pub include_folders: Option<Vec<String>>,
    /// File extensions to process (without the dot).
    pub extensions: Option<Vec<String>>,
    /// Rewrite files even if the parser had to recover from syntax errors.
    pub allow_parse_errors: Option<bool>,
}

impl Config {
    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Unreadable or malformed files are skipped with a warning.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                match fs::read_to_string(&candidate)
                    .map_err(|e| e.to_string())
                    .and_then(|content| {
                        toml::from_str::<Config>(&content).map_err(|e| e.to_string())
                    }) {
                    Ok(mut config) => {
                        tracing::debug!(path = %candidate.display(), "loaded configuration");
                        config.cxx_backport.drop_invalid(&candidate);
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                    Err(error) => {
                        tracing::warn!(path = %candidate.display(), %error, "ignoring configuration file");
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}

impl BackportConfig {
    /// Unset values that cannot be honored, with a warning.
    fn drop_invalid(&mut self, path: &Path) {
        if self.max_passes == Some(0) {
            tracing::warn!(path = %path.display(), "ignoring max_passes = 0, at least one pass is needed");
            self.max_passes = None;
        }
    }
}
