pub mod init;
mod schema;

pub use init::run_init;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/diagnostico/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("diagnostico")
}

/// Get the default config file path (~/.config/diagnostico/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Default answer store location (~/.config/diagnostico/store)
pub fn default_data_dir() -> PathBuf {
    get_config_dir().join("store")
}

/// Ensure a directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/diagnostico/config.yaml), and a missing default file simply
///   means default settings.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))
}

/// Parse config YAML
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_saphyr::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_empty_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.catalog().len(), 5);
    }

    #[test]
    fn test_parse_data_dir() {
        let config = parse_config("data_dir: /tmp/diagnostico-data\n").unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/diagnostico-data"));
        assert!(config.categories.is_none());
    }

    #[test]
    fn test_parse_catalog_override() {
        let yaml = r#"
categories:
  - id: ventas
    name: Ventas
    description: Cierre de tratos.
    questions:
      - "Tenemos metas de venta claras."
      - "Medimos la tasa de cierre."
  - id: equipo
    name: Equipo
    questions:
      - "Hay reuniones semanales."
"#;
        let config = parse_config(yaml).unwrap();
        let catalog = config.catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.categories()[0].questions.len(), 2);
        assert_eq!(catalog.categories()[1].description, "");
        assert!(catalog.contains_question("equipo-0"));
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        assert!(parse_config("colour: blue\n").is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let path = env::temp_dir().join("diagnostico_test_no_such_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join("diagnostico_test_load_config.yaml");
        fs::write(&path, "data_dir: /tmp/elsewhere\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/elsewhere")));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml_mentions_path() {
        let path = env::temp_dir().join("diagnostico_test_bad_config.yaml");
        fs::write(&path, "categories: [unclosed\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(format!("{:#}", err).contains("diagnostico_test_bad_config.yaml"));

        let _ = fs::remove_file(&path);
    }
}
