use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::extract::{
    DEFAULT_INSTALLER_IDENT, DEFAULT_MODULE_BINDING_PREFIX, DEFAULT_REGISTRY_IDENT,
};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ExtractorConfig {
    pub installer_ident: String,
    pub registry_ident: String,
    pub module_binding_prefix: String,
    pub concurrency: Option<usize>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            installer_ident: DEFAULT_INSTALLER_IDENT.to_string(),
            registry_ident: DEFAULT_REGISTRY_IDENT.to_string(),
            module_binding_prefix: DEFAULT_MODULE_BINDING_PREFIX.to_string(),
            concurrency: None,
        }
    }
}

impl ExtractorConfig {
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency
            .filter(|count| *count > 0)
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1)
    }
}

pub fn discover_config_path(dir: &Path) -> Option<PathBuf> {
    let names = [
        "pkgmeta.config.json5",
        "pkgmeta.config.json",
        ".pkgmetarc.json5",
        ".pkgmetarc.json",
    ];
    names
        .into_iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

pub fn load_config(dir: &Path) -> Result<ExtractorConfig, ConfigError> {
    match discover_config_path(dir) {
        Some(path) => load_config_from_path(&path),
        None => Ok(ExtractorConfig::default()),
    }
}

pub fn load_config_from_path(path: &Path) -> Result<ExtractorConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    json5::from_str::<ExtractorConfig>(&raw).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
