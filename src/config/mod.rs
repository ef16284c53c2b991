mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// File picked up when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "./imgdrop.toml";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Load config from the given path, the default location, or built-in defaults
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        return load_config(path);
    }

    Ok(Config::default())
}

/// Resolve the final configuration: file (or defaults), then command-line overrides.
pub fn resolve(custom_path: Option<&Path>, overrides: Overrides) -> Result<Config> {
    let mut config = load_config_or_default(custom_path)?;
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, overrides: Overrides) {
    if let Some(dir) = overrides.storage_dir {
        config.storage.dir = dir;
    }
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(base_url) = overrides.base_url {
        config.server.base_url = base_url;
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.server.base_url.trim().is_empty() {
        anyhow::bail!("Base URL cannot be empty");
    }

    if config.storage.dir.as_os_str().is_empty() {
        anyhow::bail!("Storage directory cannot be empty");
    }

    Ok(())
}
