// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// File name used for both the user config and the project-local config.
pub const CONFIG_FILE_NAME: &str = "multibuild.toml";

/// Load one configuration file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** validate.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a single file and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load the user config (explicit path or [`default_config_path`]) and layer
/// the project-local `multibuild.toml` from `project_dir` over it.
///
/// A missing file is not an error: it is reported with a warning and the
/// defaults are used instead.
pub fn load_layered(explicit: Option<&Path>, project_dir: &Path) -> Result<ConfigFile> {
    let user_path = explicit.map(Path::to_path_buf).or_else(default_config_path);

    let mut raw = RawConfigFile::default();

    match user_path {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "using config file");
            raw = load_from_path(&path)?;
        }
        Some(path) => {
            warn!(path = %path.display(), "config file is missing");
        }
        None => {
            warn!("no user config directory; using defaults");
        }
    }

    let project_path = project_dir.join(CONFIG_FILE_NAME);
    if project_path.is_file() {
        debug!(path = %project_path.display(), "using extra project config file");
        raw = load_from_path(&project_path)?.layered_over(raw);
    }

    ConfigFile::try_from(raw)
}

/// `<config dir>/multibuild/multibuild.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("multibuild").join(CONFIG_FILE_NAME))
}
