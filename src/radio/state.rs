use super::api::{NowPlayingPayload, TrackProgress};
use super::track::Track;
use std::time::Duration;

/// Playback state owned by the controller.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub is_playing: bool,
    pub is_loading: bool,
    /// Actual playback volume (0.0 - 0.7 after the slider curve)
    pub volume: f32,
    pub current_track: Option<Track>,
    /// Cached payload used to detect track changes
    pub last_fetched_payload: Option<NowPlayingPayload>,
    /// True until the first poll has completed (success or failure)
    pub is_initial_load: bool,
}

impl PlayerState {
    pub fn new(volume: f32) -> Self {
        Self {
            is_playing: false,
            is_loading: false,
            volume,
            current_track: None,
            last_fetched_payload: None,
            is_initial_load: true,
        }
    }

    pub fn current_track_id(&self) -> Option<&str> {
        self.current_track.as_ref().map(Track::id)
    }
}

/// What changed after an action, a media event or a poll.
///
/// The view applies these in order; it never reads controller internals.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Playback { playing: bool },
    Loading(bool),
    /// New track on air. `None` means "no metadata", show the fallback.
    /// `transition` asks the view to hold the old info that long first.
    Track {
        track: Option<Track>,
        transition: Option<Duration>,
    },
    Progress(Option<TrackProgress>),
    RecentlyPlayed(Vec<Track>),
    Volume { volume: f32, slider: u8 },
    /// Poll outcome: `None` when the station answered
    Connection { error: Option<String> },
    PlaybackFailed(String),
    InitialLoadComplete,
}
