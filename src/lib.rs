pub mod app;
pub mod artwork;
pub mod playback;
pub mod radio;
pub mod ui;
