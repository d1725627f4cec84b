use crate::radio::Track;
use std::time::{Duration, Instant};

pub const TOAST_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// A track change held back while the old info fades out.
#[derive(Debug, Clone)]
pub struct PendingTrack {
    pub track: Option<Track>,
    pub reveal_at: Instant,
}
