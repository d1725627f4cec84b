//! Station polling and player state, independent of any view.

pub mod api;
pub mod client;
pub mod controller;
pub mod error;
pub mod recent;
pub mod reconcile;
pub mod scheduler;
pub mod state;
pub mod track;
pub mod volume;

pub use api::NowPlayingPayload;
pub use client::{NowPlayingClient, NowPlayingSource};
pub use controller::{PlayerController, PollIntervals};
pub use error::{RadioError, Result};
pub use recent::RecentlyPlayed;
pub use scheduler::{PollResult, PollScheduler};
pub use state::{PlayerState, StateChange};
pub use track::Track;
