//! Wire types for the AzuraCast `/api/nowplaying/{station}` document.
//!
//! Everything is optional on purpose: stations return partial documents while
//! a stream is (re)starting, and a missing field must fall back to a default
//! instead of failing the whole poll.

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Raw now-playing response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NowPlayingPayload {
    #[serde(default)]
    pub now_playing: Option<CurrentEntry>,
    #[serde(default)]
    pub song_history: Option<Vec<HistoryEntry>>,
}

/// `now_playing` block: the song on air plus optional timing info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentEntry {
    #[serde(default)]
    pub song: Option<Song>,
    /// Seconds into the current song
    #[serde(default)]
    pub elapsed: Option<f64>,
    /// Song length in seconds (0 or absent for live shows)
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub art: Option<String>,
}

/// One `song_history` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub song: Option<Song>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub played_at: Option<i64>,
}

/// Position inside the song on air, as reported by the station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackProgress {
    pub elapsed: Duration,
    pub duration: Option<Duration>,
}

impl NowPlayingPayload {
    pub fn current_song(&self) -> Option<&Song> {
        self.now_playing.as_ref().and_then(|np| np.song.as_ref())
    }

    /// History rows in the order the station reported them (newest first
    /// for AzuraCast). Empty when the field is absent.
    pub fn history(&self) -> &[HistoryEntry] {
        self.song_history.as_deref().unwrap_or(&[])
    }

    pub fn progress(&self) -> Option<TrackProgress> {
        let np = self.now_playing.as_ref()?;
        let elapsed = np.elapsed.filter(|e| e.is_finite() && *e >= 0.0)?;
        let duration = np
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(Duration::from_secs_f64);

        Some(TrackProgress {
            elapsed: Duration::from_secs_f64(elapsed),
            duration,
        })
    }
}

impl Song {
    /// Title as shown to the user (blank counts as missing)
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(crate::radio::track::UNKNOWN_TITLE)
    }

    pub fn display_artist(&self) -> &str {
        non_blank(self.artist.as_deref()).unwrap_or(crate::radio::track::UNKNOWN_ARTIST)
    }

    pub fn cover_url(&self) -> Option<&str> {
        non_blank(self.art.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Song ids are hashes (strings) on AzuraCast, but some proxies re-emit them
/// as numbers. Anything else is treated as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
