//! Client configuration: `config.toml` in the taskdeck config dir.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The original deployment's backend host; the default when nothing is
/// configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            url: default_backend_url(),
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

/// Resolve the taskdeck config dir: explicit override flag, then
/// `TASKDECK_CONFIG_DIR`, then `$XDG_CONFIG_HOME/taskdeck`, then
/// `~/.config/taskdeck`.
pub fn config_dir(override_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir {
        return PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("TASKDECK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let config_home = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_home.join("taskdeck")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config file, falling back to defaults when it is missing. A
/// corrupted file is reported but never fatal.
pub fn read_config(config_dir: &Path) -> Config {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Config::default();
    }
    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: could not parse {}: {}", path.display(), e);
                Config::default()
            }
        },
        Err(e) => {
            eprintln!("warning: could not read {}: {}", path.display(), e);
            Config::default()
        }
    }
}
