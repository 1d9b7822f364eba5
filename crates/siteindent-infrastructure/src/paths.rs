//! Path management for SiteIndent configuration and session files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/siteindent/        # Config directory
//! ├── config.toml              # Client configuration
//! └── session.json             # Persisted auth_token and user
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "siteindent";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where the client keeps its files.
///
/// With a base path every file lives directly below it, which is how tests
/// and `--config-dir` isolate state; otherwise the platform config
/// directory is used.
#[derive(Debug, Clone, Default)]
pub struct SiteIndentPaths {
    base: Option<PathBuf>,
}

impl SiteIndentPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/siteindent/`
    /// - `Err(PathError::ConfigDirNotFound)`: no platform config directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the persisted session file.
    ///
    /// The file holds a bearer token; it is created with mode 600 on Unix.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.json"))
    }
}
