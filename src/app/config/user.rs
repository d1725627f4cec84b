use crate::app::keys::KeyConfig;
use crate::playback::BackendKind;
use crate::radio::PollIntervals;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-editable configuration (ReadOnly by App after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub station: StationConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub keys: KeyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// AzuraCast instance, e.g. `https://radio.example.com`
    pub base_url: String,
    /// Station short name
    pub station_id: String,
    /// Shown as fallback artist and in the window title
    pub name: String,
    /// Direct audio URL. Empty = AzuraCast's default mount.
    pub stream_url: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://weareharmony.net".to_string(),
            station_id: "harmony_radio".to_string(),
            name: "Euphoria Radio".to_string(),
            stream_url: String::new(),
        }
    }
}

impl StationConfig {
    pub fn resolved_stream_url(&self) -> String {
        let explicit = self.stream_url.trim();
        if !explicit.is_empty() {
            return explicit.to_string();
        }
        format!(
            "{}/listen/{}/radio.mp3",
            self.base_url.trim().trim_end_matches('/'),
            self.station_id.trim().trim_matches('/')
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub playing_interval_secs: u64,
    pub paused_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            playing_interval_secs: 10,
            paused_interval_secs: 30,
            request_timeout_secs: 10,
        }
    }
}

impl PollingConfig {
    /// Zero would mean a busy loop; clamp to one second.
    pub fn intervals(&self) -> PollIntervals {
        PollIntervals {
            playing: Duration::from_secs(self.playing_interval_secs.max(1)),
            paused: Duration::from_secs(self.paused_interval_secs.max(1)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub backend: BackendKind,
    pub player_command: String,
    /// Start the stream as soon as the app opens
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::External,
            player_command: "mpv".to_string(),
            autoplay: false,
        }
    }
}
