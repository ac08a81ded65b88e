//! Unified path management for EchoWhisper data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/echowhisper/
//! ├── config.toml                  # Companion configuration
//! ├── mood-entries.json            # Mood check-ins (newest first)
//! ├── wellness-data.json           # Mood points, summaries, goals
//! ├── conversations.json           # Conversation archive
//! ├── echowhisper-pro-trial.json   # Pro trial state
//! └── logs/
//!     └── echowhisper.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform config directory could be determined.
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

/// Resolved locations of every file EchoWhisper reads or writes.
#[derive(Debug, Clone)]
pub struct EchoPaths {
    root: PathBuf,
}

impl EchoPaths {
    const APP_DIR: &'static str = "echowhisper";

    /// Resolves the platform config directory (`~/.config/echowhisper` on Linux).
    pub fn resolve() -> Result<Self, PathError> {
        let base = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        Ok(Self::with_root(base.join(Self::APP_DIR)))
    }

    /// Uses `root` as the data directory (tests, `--data-dir`).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn mood_entries_file(&self) -> PathBuf {
        self.root.join("mood-entries.json")
    }

    pub fn wellness_data_file(&self) -> PathBuf {
        self.root.join("wellness-data.json")
    }

    pub fn conversations_file(&self) -> PathBuf {
        self.root.join("conversations.json")
    }

    pub fn trial_file(&self) -> PathBuf {
        self.root.join("echowhisper-pro-trial.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_root() {
        let paths = EchoPaths::with_root("/tmp/echo");
        assert_eq!(
            paths.mood_entries_file(),
            PathBuf::from("/tmp/echo/mood-entries.json")
        );
        assert_eq!(paths.trial_file().parent(), Some(Path::new("/tmp/echo")));
        assert!(paths.logs_dir().ends_with("logs"));
    }
}
