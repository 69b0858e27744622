use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};
use crate::position::Placement;
use crate::typewriter::TypewriterConfig;

pub const DEFAULT_TEXT: &str = "Type anything you like and watch it appear.";

/// Persisted playground settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub text: String,
    pub typewriter: TypewriterConfig,
    pub placement: Placement,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            typewriter: TypewriterConfig::default().with_cursor("|"),
            placement: Placement {
                offset: 1.0,
                ..Placement::default()
            },
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> PlaygroundConfig;
    fn save(&self, cfg: &PlaygroundConfig) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<PlaygroundConfig>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let cfg: PlaygroundConfig = serde_json::from_slice(&bytes)?;
        cfg.typewriter.validate()?;
        Ok(Some(cfg))
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> PlaygroundConfig {
        match self.read() {
            Ok(cfg) => cfg.unwrap_or_default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring config file");
                PlaygroundConfig::default()
            }
        }
    }

    fn save(&self, cfg: &PlaygroundConfig) -> Result<()> {
        let io_err = |source| Error::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data).map_err(io_err)
    }
}
