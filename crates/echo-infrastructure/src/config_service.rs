//! Configuration service implementation.
//!
//! Loads [`CompanionConfig`] from `config.toml` and caches it. A missing file
//! yields the defaults; a malformed file is a configuration error.

use echo_core::EchoError;
use echo_core::config::CompanionConfig;
use echo_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::paths::EchoPaths;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<CompanionConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &EchoPaths) -> Self {
        Self::with_path(paths.config_file())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<CompanionConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Writes the default configuration if no file exists yet.
    pub fn ensure_config_file(&self) -> Result<PathBuf> {
        if self.path.exists() {
            return Ok(self.path.clone());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&CompanionConfig::default())?;
        std::fs::write(&self.path, content)?;
        tracing::info!("[ConfigService] Wrote default config to {:?}", self.path);
        Ok(self.path.clone())
    }

    fn load_config(&self) -> Result<CompanionConfig> {
        if !self.path.exists() {
            tracing::debug!("[ConfigService] No config file at {:?}, using defaults", self.path);
            return Ok(CompanionConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| EchoError::io(format!("Failed to read config file: {}", e)))?;
        let config: CompanionConfig = toml::from_str(&content)?;

        if config.max_message_chars == 0 {
            return Err(EchoError::configuration(
                "max_message_chars must be greater than zero",
            ));
        }
        Ok(config)
    }
}
