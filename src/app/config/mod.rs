use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod persistence;
pub mod user;

pub use persistence::PersistentState;
pub use user::{PlaybackConfig, PollingConfig, StationConfig, UserConfig};

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("airwave");

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_state_path() -> PathBuf {
        Self::get_config_dir().join("state.toml")
    }

    pub fn get_log_dir() -> PathBuf {
        Self::get_config_dir().join("logs")
    }

    /// Load both from the default location
    pub fn load() -> (UserConfig, PersistentState) {
        (
            Self::load_user_config(&Self::get_config_path()),
            PersistentState::load_from(&Self::get_state_path()),
        )
    }

    /// Read `config.toml`, writing the defaults out when it is missing.
    pub fn load_user_config(path: &Path) -> UserConfig {
        if !path.exists() {
            let config = UserConfig::default();
            match toml::to_string_pretty(&config) {
                Ok(content) => match fs::write(path, content) {
                    Ok(()) => info!(path = %path.display(), "Wrote default config"),
                    Err(e) => warn!(path = %path.display(), error = %e, "Could not write default config"),
                },
                Err(e) => warn!(error = %e, "Could not serialize default config"),
            }
            return config;
        }

        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                UserConfig::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read config, using defaults");
                UserConfig::default()
            }
        }
    }

    /// Default config as TOML, for `--generate-config`
    pub fn default_config_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&UserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig::load_user_config(&path);
        assert_eq!(config.station.station_id, "harmony_radio");
        assert!(path.exists());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[station]"));
        assert!(written.contains("playing_interval_secs = 10"));
    }

    #[test]
    fn invalid_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[station\nbroken").unwrap();

        let config = AppConfig::load_user_config(&path);
        assert_eq!(config.polling.paused_interval_secs, 30);
    }

    #[test]
    fn generated_config_parses_back() {
        let text = AppConfig::default_config_toml().unwrap();
        let parsed: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.playback.player_command, "mpv");
    }
}
