//! `kubedash config`: write or show the settings file

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::config::Settings;

/// Write the example config. Refuses to overwrite unless `force`.
pub fn init(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = match path.or_else(Settings::user_config_path) {
        Some(p) => p,
        None => bail!("Cannot determine a config directory; pass --path"),
    };

    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Settings::example_config())?;
    crate::log_info!("Wrote {}", path.display());
    Ok(path)
}

/// Effective settings as TOML, plus where they came from
pub fn show() -> Result<String> {
    let settings = Settings::try_load()?;
    let source = Settings::find_config_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    Ok(format!("# source: {}\n{}", source, toml::to_string_pretty(&settings)?))
}
