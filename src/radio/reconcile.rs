//! Turns poll results into state changes.

use super::api::{NowPlayingPayload, Song};
use super::error::RadioError;
use super::recent::RecentlyPlayed;
use super::state::{PlayerState, StateChange};
use super::track::Track;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long the view keeps the previous track dimmed before swapping
pub const TRACK_TRANSITION: Duration = Duration::from_millis(300);

/// True when the song on air differs between the cached and the new payload.
///
/// Songs are compared on (title, artist, art), raw as the station sent them.
pub fn has_track_changed(old: Option<&NowPlayingPayload>, new: &NowPlayingPayload) -> bool {
    let Some(old) = old else {
        return true;
    };

    match (old.current_song(), new.current_song()) {
        (None, None) => false,
        (None, Some(_)) | (Some(_), None) => true,
        (Some(a), Some(b)) => !same_song(a, b),
    }
}

fn same_song(a: &Song, b: &Song) -> bool {
    a.title == b.title && a.artist == b.artist && a.art == b.art
}

#[derive(Debug, Default)]
pub struct Reconciler {
    latest_seq: Option<u64>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response is stale when a newer request has already been applied.
    pub fn is_stale(&self, seq: u64) -> bool {
        self.latest_seq.is_some_and(|latest| seq <= latest)
    }

    pub fn reconcile(
        &mut self,
        state: &mut PlayerState,
        recent: &mut RecentlyPlayed,
        seq: u64,
        result: Result<NowPlayingPayload, RadioError>,
        now: DateTime<Utc>,
    ) -> Vec<StateChange> {
        if self.is_stale(seq) {
            debug!(seq, latest = ?self.latest_seq, "Dropping stale now-playing response");
            return Vec::new();
        }
        self.latest_seq = Some(seq);

        let mut changes = match result {
            Ok(payload) => Self::apply_payload(state, recent, payload, now),
            Err(e) => Self::apply_error(state, &e),
        };

        if state.is_initial_load {
            state.is_initial_load = false;
            changes.push(StateChange::InitialLoadComplete);
        }
        changes
    }

    fn apply_payload(
        state: &mut PlayerState,
        recent: &mut RecentlyPlayed,
        payload: NowPlayingPayload,
        now: DateTime<Utc>,
    ) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if has_track_changed(state.last_fetched_payload.as_ref(), &payload) {
            // Only fade when something was already on screen
            let fade = !state.is_initial_load && state.last_fetched_payload.is_some();
            let track = payload.current_song().map(|song| Track::from_song(song, now));

            if let Some(track) = &track {
                info!(title = %track.title(), artist = %track.artist(), "Now playing");
            }

            state.current_track = track.clone();
            changes.push(StateChange::Track {
                track,
                transition: fade.then_some(TRACK_TRANSITION),
            });
        }

        changes.push(StateChange::Progress(payload.progress()));

        let added = recent.merge_history(payload.history(), state.current_track_id(), now);
        if added > 0 {
            debug!(added, "Recently played updated");
            changes.push(StateChange::RecentlyPlayed(recent.to_vec()));
        }

        state.last_fetched_payload = Some(payload);
        changes.push(StateChange::Connection { error: None });
        changes
    }

    fn apply_error(state: &mut PlayerState, error: &RadioError) -> Vec<StateChange> {
        warn!(error = %error, "Error fetching current track");

        let mut changes = Vec::new();
        // Drop the cache too, otherwise the next good poll would look unchanged
        // and the fallback text would stick.
        let had_info = state.current_track.is_some() || state.last_fetched_payload.is_some();
        state.current_track = None;
        state.last_fetched_payload = None;

        if had_info {
            changes.push(StateChange::Track {
                track: None,
                transition: None,
            });
            changes.push(StateChange::Progress(None));
        }
        changes.push(StateChange::Connection {
            error: Some(error.to_string()),
        });
        changes
    }
}
