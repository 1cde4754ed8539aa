use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::{Catalog, Category};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where answers are stored (default: ~/.config/diagnostico/store)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Replaces the built-in catalog when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
}

impl Config {
    pub fn catalog(&self) -> Catalog {
        match &self.categories {
            Some(categories) => Catalog::new(categories.clone()),
            None => Catalog::builtin(),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(super::default_data_dir)
    }
}
