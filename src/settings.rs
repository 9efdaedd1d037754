//! Theme preference store injected into the presentation layer.

use crate::config::{persist_display_theme, read_display_theme, Theme};
use crate::error::ConfigError;
use std::path::PathBuf;
use std::sync::Mutex;

/// Where the front end reads and saves its theme preference.
pub trait SettingsStore: Send + Sync {
    /// Saved theme, if one can be read.
    fn load_theme(&self) -> Option<Theme>;
    /// Persist `theme` for future sessions.
    fn save_theme(&self, theme: Theme) -> Result<(), ConfigError>;
}

/// Stores the theme as `[display].theme` in the effective config file.
#[derive(Debug, Clone, Default)]
pub struct FileSettingsStore {
    path_override: Option<PathBuf>,
}

impl FileSettingsStore {
    /// `path_override` mirrors the `--config` flag; `None` uses the normal
    /// lookup (local file, then global).
    pub fn new(path_override: Option<PathBuf>) -> Self {
        Self { path_override }
    }
}

impl SettingsStore for FileSettingsStore {
    fn load_theme(&self) -> Option<Theme> {
        match read_display_theme(self.path_override.as_deref()) {
            Ok(theme) => theme,
            Err(err) => {
                tracing::debug!(error = %err, "theme preference unavailable");
                None
            }
        }
    }

    fn save_theme(&self, theme: Theme) -> Result<(), ConfigError> {
        let path = persist_display_theme(self.path_override.as_deref(), theme)?;
        tracing::debug!(path = %path.display(), %theme, "saved theme preference");
        Ok(())
    }
}

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    theme: Mutex<Option<Theme>>,
}

impl MemorySettingsStore {
    pub fn new(theme: Option<Theme>) -> Self {
        Self {
            theme: Mutex::new(theme),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_theme(&self) -> Option<Theme> {
        self.theme.lock().ok().and_then(|guard| *guard)
    }

    fn save_theme(&self, theme: Theme) -> Result<(), ConfigError> {
        let mut guard = self
            .theme
            .lock()
            .map_err(|_| ConfigError::Invalid("settings store poisoned".to_string()))?;
        *guard = Some(theme);
        Ok(())
    }
}
