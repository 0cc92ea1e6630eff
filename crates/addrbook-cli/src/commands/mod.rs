pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use addrbook_core::AddrbookConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("addrbook")
        .join("config.json")
}

/// The configuration file in effect: the `--config` path if given,
/// otherwise the default location.
pub fn resolve_config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load the configuration from an explicit path, the default path, or
/// fall back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<AddrbookConfig> {
    if let Some(path) = config_path {
        return Ok(AddrbookConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(AddrbookConfig::from_file(&default_path)?)
    } else {
        Ok(AddrbookConfig::default())
    }
}
