pub mod artwork;
pub mod ui;

pub use artwork::ArtworkState;
pub use ui::{PendingTrack, Toast, TOAST_DURATION};

use super::config::PersistentState;
use super::keys::KeyConfig;
use crate::radio::api::TrackProgress;
use crate::radio::volume::{volume_to_slider, VolumeIcon};
use crate::radio::{StateChange, Track};
use crate::ui::theme::{Theme, ThemeMode};
use std::time::{Duration, Instant};
use tracing::debug;

pub const CONNECTION_ERROR_TITLE: &str = "Connection Error";
pub const CONNECTION_ERROR_HINT: &str = "Please try again later";

/// View model. Only ever changed through [`StateChange`]s from the
/// controller and the view's own toggles.
pub struct App {
    pub station_name: String,
    pub backend_name: &'static str,
    pub keys: KeyConfig,
    pub theme_mode: ThemeMode,
    pub theme: Theme,

    // Playback
    pub is_playing: bool,
    pub is_loading: bool,
    pub volume: f32,
    pub slider: u8,
    pub playback_error: Option<String>,

    // Now playing
    pub track: Option<Track>,
    /// Old info is dimmed while a new track is waiting to be revealed
    pub track_updating: bool,
    pending_track: Option<PendingTrack>,
    pub progress: Option<TrackProgress>,
    progress_synced_at: Instant,
    track_started: Instant,
    pub initial_loading: bool,
    pub connection_error: Option<String>,

    // Artwork
    pub artwork: ArtworkState,
    pub artwork_url: Option<String>,
    artwork_request: Option<String>,

    // Panels & popups
    pub recent: Vec<Track>,
    pub show_recent: bool,
    pub toast: Option<Toast>,
    pub show_keyhints: bool,
    pub should_quit: bool,
    /// Theme or volume changed since the last save
    prefs_dirty: bool,
}

impl App {
    pub fn new(
        station_name: &str,
        keys: KeyConfig,
        saved: &PersistentState,
        backend_name: &'static str,
        now: Instant,
    ) -> Self {
        Self {
            station_name: station_name.to_string(),
            backend_name,
            keys,
            theme_mode: saved.theme,
            theme: Theme::for_mode(saved.theme),

            is_playing: false,
            is_loading: false,
            volume: saved.volume,
            slider: volume_to_slider(saved.volume),
            playback_error: None,

            track: None,
            track_updating: false,
            pending_track: None,
            progress: None,
            progress_synced_at: now,
            track_started: now,
            initial_loading: true,
            connection_error: None,

            artwork: ArtworkState::Idle,
            artwork_url: None,
            artwork_request: None,

            recent: Vec::new(),
            show_recent: false,
            toast: None,
            show_keyhints: false,
            should_quit: false,
            prefs_dirty: false,
        }
    }

    pub fn apply_all(&mut self, changes: Vec<StateChange>, now: Instant) {
        for change in changes {
            self.apply(change, now);
        }
    }

    pub fn apply(&mut self, change: StateChange, now: Instant) {
        match change {
            StateChange::Playback { playing } => {
                self.is_playing = playing;
                if playing {
                    self.playback_error = None;
                }
            }
            StateChange::Loading(loading) => self.is_loading = loading,
            StateChange::Track { track, transition } => match transition {
                Some(delay) => {
                    self.track_updating = true;
                    self.pending_track = Some(PendingTrack {
                        track,
                        reveal_at: now + delay,
                    });
                }
                None => {
                    self.pending_track = None;
                    self.commit_track(track, now);
                }
            },
            StateChange::Progress(progress) => {
                self.progress = progress;
                self.progress_synced_at = now;
            }
            StateChange::RecentlyPlayed(tracks) => self.recent = tracks,
            StateChange::Volume { volume, slider } => {
                if self.volume != volume {
                    self.prefs_dirty = true;
                }
                self.volume = volume;
                self.slider = slider;
            }
            StateChange::Connection { error } => self.connection_error = error,
            StateChange::PlaybackFailed(message) => {
                self.playback_error = Some(message);
                self.show_toast("❌ Playback failed");
            }
            StateChange::InitialLoadComplete => self.initial_loading = false,
        }
    }

    fn commit_track(&mut self, track: Option<Track>, now: Instant) {
        self.track_updating = false;
        self.track_started = now;
        self.playback_error = None;

        match track.as_ref().and_then(Track::cover_url) {
            Some(url) if self.artwork_url.as_deref() != Some(url) => {
                debug!(url, "Requesting cover art");
                self.artwork_url = Some(url.to_string());
                self.artwork = ArtworkState::Loading;
                self.artwork_request = Some(url.to_string());
            }
            Some(_) => {}
            None => {
                self.artwork_url = None;
                self.artwork = ArtworkState::Idle;
                self.artwork_request = None;
            }
        }

        self.track = track;
    }

    /// Cover URL the event loop should download, if any.
    pub fn take_artwork_request(&mut self) -> Option<String> {
        self.artwork_request.take()
    }

    /// Late downloads for a cover that is no longer shown are dropped.
    pub fn set_artwork(&mut self, url: &str, state: ArtworkState) {
        if self.artwork_url.as_deref() == Some(url) {
            self.artwork = state;
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + TOAST_DURATION;

        if let Some(ref mut current) = self.toast {
            // Keep start_time so the entrance animation does not replay
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every tick to update state
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(ref toast) = self.toast {
            if now > toast.deadline {
                self.toast = None;
            }
        }

        if self
            .pending_track
            .as_ref()
            .is_some_and(|pending| now >= pending.reveal_at)
        {
            if let Some(pending) = self.pending_track.take() {
                self.commit_track(pending.track, now);
            }
        }
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme_mode = self.theme_mode.toggled();
        self.theme = Theme::for_mode(self.theme_mode);
        self.prefs_dirty = true;
        self.theme_mode
    }

    /// True once after theme or volume changed.
    pub fn take_prefs_dirty(&mut self) -> bool {
        std::mem::take(&mut self.prefs_dirty)
    }

    pub fn toggle_recent(&mut self) {
        self.show_recent = !self.show_recent;
    }

    pub fn display_title(&self) -> &str {
        if self.playback_error.is_some() {
            return CONNECTION_ERROR_TITLE;
        }
        match &self.track {
            Some(track) => track.title(),
            None if self.is_playing => "Live Stream",
            None => "Now Playing",
        }
    }

    pub fn display_artist(&self) -> &str {
        if self.playback_error.is_some() {
            return CONNECTION_ERROR_HINT;
        }
        match &self.track {
            Some(track) => track.artist(),
            None => &self.station_name,
        }
    }

    pub fn window_title(&self) -> String {
        match &self.track {
            Some(track) => format!("{} - {} | {}", track.title(), track.artist(), self.station_name),
            None => self.station_name.clone(),
        }
    }

    /// Position in the current track. Uses the station's numbers when it
    /// sends them, otherwise how long we have been listening to this track.
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        match &self.progress {
            Some(progress) => {
                let elapsed =
                    progress.elapsed + now.saturating_duration_since(self.progress_synced_at);
                Some(match progress.duration {
                    Some(total) => elapsed.min(total),
                    None => elapsed,
                })
            }
            None if self.track.is_some() && self.is_playing => {
                Some(now.saturating_duration_since(self.track_started))
            }
            None => None,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.progress.as_ref().and_then(|p| p.duration)
    }

    pub fn progress_ratio(&self, now: Instant) -> Option<f64> {
        let total = self.duration().filter(|d| !d.is_zero())?;
        let elapsed = self.elapsed(now)?;
        Some((elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0))
    }

    pub fn volume_icon(&self) -> VolumeIcon {
        VolumeIcon::for_volume(self.volume)
    }

    pub fn persistent_state(&self) -> PersistentState {
        PersistentState {
            theme: self.theme_mode,
            volume: self.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn app(now: Instant) -> App {
        App::new(
            "Test FM",
            KeyConfig::default(),
            &PersistentState::default(),
            "fake",
            now,
        )
    }

    fn track(title: &str, art: Option<&str>) -> Track {
        Track::new(None, title, "Artist", art, Utc::now())
    }

    #[test]
    fn fallback_text_follows_playback() {
        let now = Instant::now();
        let mut app = app(now);
        assert_eq!(app.display_title(), "Now Playing");
        assert_eq!(app.display_artist(), "Test FM");
        assert_eq!(app.window_title(), "Test FM");

        app.apply(StateChange::Playback { playing: true }, now);
        assert_eq!(app.display_title(), "Live Stream");

        app.apply(StateChange::PlaybackFailed("boom".into()), now);
        assert_eq!(app.display_title(), CONNECTION_ERROR_TITLE);
        assert_eq!(app.display_artist(), CONNECTION_ERROR_HINT);
    }

    #[test]
    fn transition_holds_old_track_until_reveal() {
        let now = Instant::now();
        let mut app = app(now);
        app.apply(
            StateChange::Track {
                track: Some(track("Old", None)),
                transition: None,
            },
            now,
        );

        app.apply(
            StateChange::Track {
                track: Some(track("New", None)),
                transition: Some(Duration::from_millis(300)),
            },
            now,
        );
        assert!(app.track_updating);
        assert_eq!(app.display_title(), "Old");

        app.on_tick(now + Duration::from_millis(100));
        assert_eq!(app.display_title(), "Old");

        app.on_tick(now + Duration::from_millis(300));
        assert!(!app.track_updating);
        assert_eq!(app.display_title(), "New");
        assert_eq!(app.window_title(), "New - Artist | Test FM");
    }

    #[test]
    fn artwork_requested_once_per_cover() {
        let now = Instant::now();
        let mut app = app(now);

        app.apply(
            StateChange::Track {
                track: Some(track("A", Some("https://x/a.jpg"))),
                transition: None,
            },
            now,
        );
        assert_eq!(app.take_artwork_request().as_deref(), Some("https://x/a.jpg"));
        assert!(app.artwork.is_loading());

        // Same cover again: nothing to fetch
        app.apply(
            StateChange::Track {
                track: Some(track("A2", Some("https://x/a.jpg"))),
                transition: None,
            },
            now,
        );
        assert_eq!(app.take_artwork_request(), None);

        // A stale download does not overwrite the current cover
        app.set_artwork("https://x/old.jpg", ArtworkState::Failed);
        assert!(app.artwork.is_loading());

        app.apply(
            StateChange::Track {
                track: None,
                transition: None,
            },
            now,
        );
        assert!(matches!(app.artwork, ArtworkState::Idle));
    }

    #[test]
    fn progress_uses_station_numbers_or_listening_time() {
        let now = Instant::now();
        let mut app = app(now);
        app.apply(StateChange::Playback { playing: true }, now);
        app.apply(
            StateChange::Track {
                track: Some(track("A", None)),
                transition: None,
            },
            now,
        );

        // Simulated: time since the track appeared
        assert_eq!(app.elapsed(now + Duration::from_secs(7)), Some(Duration::from_secs(7)));
        assert_eq!(app.progress_ratio(now), None);

        app.apply(
            StateChange::Progress(Some(TrackProgress {
                elapsed: Duration::from_secs(50),
                duration: Some(Duration::from_secs(100)),
            })),
            now,
        );
        assert_eq!(app.progress_ratio(now + Duration::from_secs(10)), Some(0.6));
        assert_eq!(app.elapsed(now + Duration::from_secs(500)), Some(Duration::from_secs(100)));
    }

    #[test]
    fn theme_and_volume_persist() {
        let now = Instant::now();
        let mut app = app(now);
        assert_eq!(app.toggle_theme(), ThemeMode::Dark);
        app.apply(StateChange::Volume { volume: 0.3, slider: 50 }, now);

        assert!(app.take_prefs_dirty());
        assert!(!app.take_prefs_dirty());

        let saved = app.persistent_state();
        assert_eq!(saved.theme, ThemeMode::Dark);
        assert_eq!(saved.volume, 0.3);
        assert_eq!(app.volume_icon(), VolumeIcon::Low);
    }

    #[test]
    fn toast_expires() {
        let now = Instant::now();
        let mut app = app(now);
        app.show_toast("hello");
        app.on_tick(Instant::now() + TOAST_DURATION + Duration::from_millis(1));
        assert!(app.toast.is_none());
    }
}
