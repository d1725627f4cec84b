use super::api::Song;
use chrono::{DateTime, TimeZone, Utc};

pub const UNKNOWN_TITLE: &str = "Unknown Track";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A song that aired on the station. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    id: String,
    title: String,
    artist: String,
    cover_url: Option<String>,
    played_at: DateTime<Utc>,
}

impl Track {
    pub fn new(
        id: Option<&str>,
        title: &str,
        artist: &str,
        cover_url: Option<&str>,
        played_at: DateTime<Utc>,
    ) -> Self {
        let id = match id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id.to_string(),
            None => Self::derive_id(title, artist),
        };

        Self {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            cover_url: cover_url.map(str::to_string),
            played_at,
        }
    }

    /// Build from an API song, defaulting blank fields.
    pub fn from_song(song: &Song, played_at: DateTime<Utc>) -> Self {
        Self::new(
            song.id.as_deref(),
            song.display_title(),
            song.display_artist(),
            song.cover_url(),
            played_at,
        )
    }

    /// Identity for songs the station did not give an id
    pub fn derive_id(title: &str, artist: &str) -> String {
        format!("{}-{}", title, artist)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }

    pub fn played_at(&self) -> DateTime<Utc> {
        self.played_at
    }
}

/// Convert a `played_at` unix timestamp, falling back to `now` when absent
/// or out of range.
pub fn played_at_or(timestamp: Option<i64>, now: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_id_when_missing() {
        let track = Track::new(None, "Song", "Band", None, Utc::now());
        assert_eq!(track.id(), "Song-Band");

        let track = Track::new(Some(""), "Song", "Band", None, Utc::now());
        assert_eq!(track.id(), "Song-Band");
    }

    #[test]
    fn keeps_station_id() {
        let track = Track::new(Some("a1b2"), "Song", "Band", Some("https://x/c.jpg"), Utc::now());
        assert_eq!(track.id(), "a1b2");
        assert_eq!(track.cover_url(), Some("https://x/c.jpg"));
    }

    #[test]
    fn from_song_uses_fallback_names() {
        let song = Song::default();
        let track = Track::from_song(&song, Utc::now());
        assert_eq!(track.title(), UNKNOWN_TITLE);
        assert_eq!(track.artist(), UNKNOWN_ARTIST);
        assert_eq!(track.id(), "Unknown Track-Unknown Artist");
    }

    #[test]
    fn played_at_fallback() {
        let now = Utc::now();
        assert_eq!(played_at_or(None, now), now);
        assert_eq!(played_at_or(Some(30), now).timestamp(), 30);
        assert_eq!(played_at_or(Some(i64::MAX), now), now);
    }
}
