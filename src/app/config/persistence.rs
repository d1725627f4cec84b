use crate::radio::volume::{sanitize_volume, DEFAULT_VOLUME};
use crate::ui::theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Automatically saved session state
/// stored in `state.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default)]
    pub theme: ThemeMode,
    /// Playback volume after the slider curve
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

impl Default for PersistentState {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            volume: DEFAULT_VOLUME,
        }
    }
}

impl PersistentState {
    /// Read `state.toml`; anything unreadable falls back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<Self>(&content) {
            Ok(mut state) => {
                state.volume = sanitize_volume(state.volume);
                state
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable state file");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    pub fn save(&self) {
        let path = super::AppConfig::get_state_path();
        if let Err(e) = self.save_to(&path) {
            warn!(path = %path.display(), error = %e, "Could not save state");
        }
    }
}
