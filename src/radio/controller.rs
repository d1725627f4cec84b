//! The player controller: one object owning playback state, the poll
//! scheduler and the media backend, with an explicit lifecycle
//! (`new` / `start` / `stop` / `dispose`).
//!
//! Every entry point returns the [`StateChange`]s it caused; the caller hands
//! them to the view.

use super::client::NowPlayingSource;
use super::recent::RecentlyPlayed;
use super::reconcile::Reconciler;
use super::scheduler::{PollResult, PollScheduler};
use super::state::{PlayerState, StateChange};
use super::volume::{sanitize_volume, slider_to_volume, volume_to_slider, SLIDER_MAX};
use crate::playback::{MediaBackend, MediaEvent};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub playing: Duration,
    pub paused: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            playing: Duration::from_secs(10),
            paused: Duration::from_secs(30),
        }
    }
}

pub struct PlayerController<S, E> {
    intervals: PollIntervals,
    state: PlayerState,
    recent: RecentlyPlayed,
    reconciler: Reconciler,
    scheduler: PollScheduler<S, E>,
    media: Box<dyn MediaBackend>,
    disposed: bool,
}

impl<S, E> PlayerController<S, E>
where
    S: NowPlayingSource,
    E: From<PollResult> + Send + 'static,
{
    pub fn new(
        intervals: PollIntervals,
        source: Arc<S>,
        mut media: Box<dyn MediaBackend>,
        tx: mpsc::Sender<E>,
        volume: f32,
    ) -> Self {
        let volume = sanitize_volume(volume);
        if let Err(e) = media.set_volume(volume) {
            warn!(error = %e, "Could not apply initial volume");
        }

        Self {
            intervals,
            state: PlayerState::new(volume),
            recent: RecentlyPlayed::default(),
            reconciler: Reconciler::new(),
            scheduler: PollScheduler::new(source, tx),
            media,
            disposed: false,
        }
    }

    /// Begin polling (immediately, then at the cadence for the current
    /// playback state). Returns the initial volume so the view can place the
    /// slider.
    pub fn start(&mut self) -> Vec<StateChange> {
        if self.disposed {
            return Vec::new();
        }
        info!(backend = self.media.name(), "Player controller started");
        self.scheduler.start(self.cadence());
        vec![self.volume_change()]
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Stop polling and release the stream. The controller is inert afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.scheduler.stop();
        self.media.shutdown();
        self.disposed = true;
        info!("Player controller disposed");
    }

    pub fn toggle_play(&mut self) -> Vec<StateChange> {
        if self.disposed {
            return Vec::new();
        }
        if self.state.is_loading {
            debug!("Toggle ignored while loading");
            return Vec::new();
        }

        let result = if self.state.is_playing {
            self.media.pause()
        } else {
            self.media.play()
        };

        match result {
            Ok(()) => Vec::new(),
            Err(e) => self.fail_playback(e.to_string()),
        }
    }

    pub fn set_slider(&mut self, slider: u8) -> Vec<StateChange> {
        let volume = slider_to_volume(slider.min(SLIDER_MAX));
        self.state.volume = volume;
        if let Err(e) = self.media.set_volume(volume) {
            warn!(error = %e, "Could not change volume");
        }
        vec![self.volume_change()]
    }

    /// Move the slider by `delta` positions.
    pub fn nudge_volume(&mut self, delta: i16) -> Vec<StateChange> {
        let slider = (i16::from(self.slider()) + delta).clamp(0, i16::from(SLIDER_MAX));
        self.set_slider(slider as u8)
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) -> Vec<StateChange> {
        if self.disposed {
            return Vec::new();
        }

        let mut changes = Vec::new();
        match event {
            MediaEvent::LoadStart | MediaEvent::Waiting => self.set_loading(true, &mut changes),
            MediaEvent::CanPlay | MediaEvent::Playing => self.set_loading(false, &mut changes),
            MediaEvent::Play => {
                self.set_loading(false, &mut changes);
                self.set_playing(true, &mut changes);
                self.scheduler.reschedule(self.intervals.playing);
            }
            MediaEvent::Pause => {
                self.set_loading(false, &mut changes);
                self.set_playing(false, &mut changes);
                self.scheduler.reschedule(self.intervals.paused);
            }
            MediaEvent::Error(message) => changes = self.fail_playback(message),
        }
        changes
    }

    /// Feed one poll outcome through the reconciler.
    pub fn apply_poll(&mut self, poll: PollResult) -> Vec<StateChange> {
        if self.disposed {
            return Vec::new();
        }
        self.reconciler.reconcile(
            &mut self.state,
            &mut self.recent,
            poll.seq,
            poll.result,
            Utc::now(),
        )
    }

    /// Poll now, outside the regular cadence.
    pub fn refresh(&self) {
        if !self.disposed {
            self.scheduler.refresh_now();
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn recent(&self) -> &RecentlyPlayed {
        &self.recent
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.state.volume
    }

    pub fn slider(&self) -> u8 {
        volume_to_slider(self.state.volume)
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        self.scheduler.interval()
    }

    pub fn backend_name(&self) -> &'static str {
        self.media.name()
    }

    fn cadence(&self) -> Duration {
        if self.state.is_playing {
            self.intervals.playing
        } else {
            self.intervals.paused
        }
    }

    fn volume_change(&self) -> StateChange {
        StateChange::Volume {
            volume: self.state.volume,
            slider: self.slider(),
        }
    }

    fn set_loading(&mut self, loading: bool, changes: &mut Vec<StateChange>) {
        if self.state.is_loading != loading {
            self.state.is_loading = loading;
            changes.push(StateChange::Loading(loading));
        }
    }

    fn set_playing(&mut self, playing: bool, changes: &mut Vec<StateChange>) {
        if self.state.is_playing != playing {
            self.state.is_playing = playing;
            info!(playing, "Playback state changed");
            changes.push(StateChange::Playback { playing });
        }
    }

    fn fail_playback(&mut self, message: String) -> Vec<StateChange> {
        warn!(error = %message, "Playback error");
        let mut changes = Vec::new();
        self.set_loading(false, &mut changes);
        self.set_playing(false, &mut changes);
        self.scheduler.reschedule(self.intervals.paused);
        changes.push(StateChange::PlaybackFailed(message));
        changes
    }
}

impl<S, E> Drop for PlayerController<S, E> {
    fn drop(&mut self) {
        if !self.disposed {
            self.media.shutdown();
        }
    }
}
