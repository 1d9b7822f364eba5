//! Configuration service.
//!
//! Loads [`ClientConfig`] from `config.toml`, creating the file with
//! defaults when it does not exist, then applies environment overrides.

use crate::paths::SiteIndentPaths;
use crate::storage::{AtomicFile, FileFormat};
use siteindent_core::config::ClientConfig;
use siteindent_core::{Result, SiteIndentError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicFile<ClientConfig>,
}

impl ConfigService {
    /// Service for the config file at the default location, or below `base`.
    pub fn new(base: Option<&Path>) -> Result<Self> {
        let path = SiteIndentPaths::new(base)
            .config_file()
            .map_err(|e| SiteIndentError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path, FileFormat::Toml),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the file as written, creating it with defaults if missing.
    pub fn load_file(&self) -> Result<ClientConfig> {
        match self.file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = ClientConfig::default();
                self.file.save(&config)?;
                tracing::info!(
                    "[ConfigService] Created default config at {}",
                    self.path().display()
                );
                Ok(config)
            }
        }
    }

    /// The effective configuration: file, then environment, then range checks.
    pub fn load(&self) -> Result<ClientConfig> {
        Ok(self.load_file()?.with_env_overrides().normalized())
    }

    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        self.file.save(config)?;
        Ok(())
    }
}
