//! Recently played list
//!
//! Bounded, deduplicated by track id, most recent first.

use super::api::HistoryEntry;
use super::track::{played_at_or, Track};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

pub const RECENTLY_PLAYED_CAPACITY: usize = 5;

#[derive(Debug, Clone)]
pub struct RecentlyPlayed {
    /// Most recent = front
    tracks: VecDeque<Track>,
    capacity: usize,
}

impl RecentlyPlayed {
    pub fn new(capacity: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front unless the track is on air right now or already
    /// listed. Returns whether the list changed.
    pub fn add_track(&mut self, track: Track, current_track_id: Option<&str>) -> bool {
        if current_track_id == Some(track.id()) {
            return false;
        }
        if self.contains(track.id()) {
            return false;
        }

        self.tracks.push_front(track);
        self.tracks.truncate(self.capacity);
        true
    }

    /// Merge a station history block. Rows are replayed oldest to newest so
    /// the newest aired song ends up first; rows without a song are skipped.
    /// Returns how many tracks were added.
    pub fn merge_history(
        &mut self,
        history: &[HistoryEntry],
        current_track_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> usize {
        // Stations report newest first: reverse, then order by timestamp so
        // rows with equal (or missing) timestamps keep that reversed order.
        let mut rows: Vec<(DateTime<Utc>, Track)> = history
            .iter()
            .rev()
            .filter_map(|entry| {
                let song = entry.song.as_ref()?;
                let played_at = played_at_or(entry.played_at, now);
                Some((played_at, Track::from_song(song, played_at)))
            })
            .collect();
        rows.sort_by_key(|(played_at, _)| *played_at);

        rows.into_iter()
            .filter(|(_, track)| self.add_track(track.clone(), current_track_id))
            .count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tracks.iter().any(|t| t.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self::new(RECENTLY_PLAYED_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::api::Song;

    fn track(id: &str) -> Track {
        Track::new(Some(id), &format!("Title {}", id), "Artist", None, Utc::now())
    }

    fn entry(id: &str, played_at: Option<i64>) -> HistoryEntry {
        HistoryEntry {
            song: Some(Song {
                id: Some(id.to_string()),
                title: Some(format!("Title {}", id)),
                artist: Some("Artist".to_string()),
                art: None,
            }),
            played_at,
        }
    }

    fn ids(list: &RecentlyPlayed) -> Vec<&str> {
        list.iter().map(|t| t.id()).collect()
    }

    #[test]
    fn inserts_at_front() {
        let mut list = RecentlyPlayed::default();
        assert!(list.add_track(track("1"), None));
        assert!(list.add_track(track("2"), None));
        assert_eq!(ids(&list), vec!["2", "1"]);
    }

    #[test]
    fn rejects_current_track() {
        let mut list = RecentlyPlayed::default();
        assert!(!list.add_track(track("now"), Some("now")));
        assert!(list.is_empty());
    }

    #[test]
    fn rejects_duplicates() {
        let mut list = RecentlyPlayed::default();
        assert!(list.add_track(track("1"), None));
        assert!(!list.add_track(track("1"), None));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut list = RecentlyPlayed::default();
        for i in 0..12 {
            list.add_track(track(&i.to_string()), None);
            assert!(list.len() <= RECENTLY_PLAYED_CAPACITY);
        }
        // Oldest entries were evicted
        assert_eq!(ids(&list), vec!["11", "10", "9", "8", "7"]);
    }

    #[test]
    fn history_oldest_to_newest() {
        let mut list = RecentlyPlayed::default();
        let history = vec![entry("1", Some(10)), entry("2", Some(20)), entry("3", Some(30))];

        let added = list.merge_history(&history, None, Utc::now());
        assert_eq!(added, 3);
        assert_eq!(ids(&list), vec!["3", "2", "1"]);
    }

    #[test]
    fn history_newest_first_as_reported() {
        let mut list = RecentlyPlayed::default();
        let history = vec![entry("c", Some(30)), entry("b", Some(20)), entry("a", Some(10))];

        list.merge_history(&history, None, Utc::now());
        assert_eq!(ids(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn history_without_timestamps_uses_reported_order() {
        let mut list = RecentlyPlayed::default();
        let history = vec![entry("c", None), entry("b", None), entry("a", None)];

        list.merge_history(&history, None, Utc::now());
        assert_eq!(ids(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn history_skips_current_and_known() {
        let mut list = RecentlyPlayed::default();
        list.add_track(track("1"), None);

        let history = vec![entry("now", Some(40)), entry("2", Some(20)), entry("1", Some(10))];
        let added = list.merge_history(&history, Some("now"), Utc::now());

        assert_eq!(added, 1);
        assert_eq!(ids(&list), vec!["2", "1"]);
    }

    #[test]
    fn history_rows_without_song_are_skipped() {
        let mut list = RecentlyPlayed::default();
        let history = vec![HistoryEntry { song: None, played_at: Some(5) }, entry("1", Some(1))];

        assert_eq!(list.merge_history(&history, None, Utc::now()), 1);
    }
}
