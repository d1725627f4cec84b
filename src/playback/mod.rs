//! Media backends: whatever actually turns the station stream into sound.
//!
//! Backends report progress asynchronously through [`MediaEvent`]s, the same
//! way a media element fires `play`/`pause`/`waiting` events.

pub mod external;
#[cfg(feature = "audio")]
pub mod native;

use crate::radio::error::{RadioError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

pub use external::ExternalPlayer;
#[cfg(feature = "audio")]
pub use native::NativePlayer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Started fetching the stream
    LoadStart,
    /// Enough data buffered to start
    CanPlay,
    /// Playback was requested and accepted
    Play,
    Pause,
    Error(String),
    /// Stalled, rebuffering
    Waiting,
    /// Audio is coming out
    Playing,
}

pub type MediaEventSender = UnboundedSender<MediaEvent>;

/// The unified interface for stream playback 🎵
pub trait MediaBackend: Send {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// `volume` is the curve-mapped playback volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;
    fn name(&self) -> &'static str;

    /// Release the stream for good
    fn shutdown(&mut self) {
        let _ = self.pause();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Spawn an external player (mpv)
    #[default]
    External,
    /// Decode in-process (requires the `audio` feature)
    Native,
}

impl std::str::FromStr for BackendKind {
    type Err = RadioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "external" | "mpv" => Ok(Self::External),
            "native" => Ok(Self::Native),
            other => Err(RadioError::Config(format!("unknown playback backend: {}", other))),
        }
    }
}

/// Factory to get the configured backend
pub fn create_backend(
    kind: BackendKind,
    stream_url: &str,
    player_command: &str,
    events: MediaEventSender,
) -> Result<Box<dyn MediaBackend>> {
    if stream_url.trim().is_empty() {
        return Err(RadioError::Config("stream URL cannot be empty".into()));
    }

    match kind {
        BackendKind::External => Ok(Box::new(ExternalPlayer::new(
            player_command,
            stream_url,
            events,
        ))),
        #[cfg(feature = "audio")]
        BackendKind::Native => Ok(Box::new(NativePlayer::new(stream_url, events))),
        #[cfg(not(feature = "audio"))]
        BackendKind::Native => Err(RadioError::Config(
            "native playback needs a build with the `audio` feature".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_kind() {
        assert_eq!("external".parse::<BackendKind>().unwrap(), BackendKind::External);
        assert_eq!("MPV".parse::<BackendKind>().unwrap(), BackendKind::External);
        assert_eq!("native".parse::<BackendKind>().unwrap(), BackendKind::Native);
        assert!("vlc".parse::<BackendKind>().is_err());
    }

    #[test]
    fn empty_stream_url_is_rejected() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        assert!(create_backend(BackendKind::External, " ", "mpv", tx).is_err());
    }
}
