use crate::app::ArtworkState;
use crate::playback::MediaEvent;
use crate::radio::PollResult;
use crossterm::event::Event;

pub enum AppEvent {
    Input(Event),
    Poll(PollResult),
    Media(MediaEvent),
    /// Artwork for the given cover URL finished loading
    ArtworkUpdate(String, ArtworkState),
    Tick,
}

impl From<PollResult> for AppEvent {
    fn from(poll: PollResult) -> Self {
        Self::Poll(poll)
    }
}
