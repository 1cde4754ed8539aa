use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::builtin_categories;
use crate::config::{ensure_dir, get_config_path, Config};
use crate::prompt::prompt_yes_no;

/// Starter config: the built-in catalog spelled out so it can be edited
pub fn starter_config() -> Config {
    Config {
        data_dir: None,
        categories: Some(builtin_categories()),
    }
}

/// Write a starter config file.
///
/// If `path` is None, writes to the default config path. An existing file is
/// only replaced when `force` is set or the user confirms.
/// Returns the path written, or None when the user declined.
pub fn run_init(path: Option<PathBuf>, force: bool) -> Result<Option<PathBuf>> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!(
                "Ya existe una configuración en {}. ¿Sobrescribir?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            return Ok(None);
        }
    }

    write_config(&config_path, &starter_config())?;
    Ok(Some(config_path))
}

/// Serialize and write a config atomically
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}
