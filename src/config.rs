//! Runtime configuration: defaults, optional config file, `MEMFS__*`
//! environment overlay.

use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemfsConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub shell: ShellConfig,
}

/// Shell front-end configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Prompt label shown before the current directory
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// List full paths instead of bare names by default
    #[serde(default)]
    pub full_paths: bool,

    /// Colored shell output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_prompt() -> String {
    "memfs".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            full_paths: false,
            color: default_true(),
        }
    }
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// The platform config file path (~/.config/memfs/config.toml on Linux).
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "memfs", "memfs")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration with precedence: defaults (lowest) -> config file
    /// -> environment (highest).
    pub fn load(file: Option<&Path>) -> Result<MemfsConfig, ConfigError> {
        let mut builder = Config::builder();
        match file {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()));
            }
            None => {
                if let Some(path) = Self::default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }
        builder = builder.add_source(
            Environment::with_prefix("MEMFS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut loaded: MemfsConfig = config.try_deserialize()?;
        if loaded.shell.prompt.is_empty() {
            loaded.shell.prompt = default_prompt();
        }
        Ok(loaded)
    }
}
