use crate::app::events::AppEvent;
use crate::app::App;
use crate::radio::{NowPlayingSource, PlayerController};
use crossterm::event::{KeyEvent, KeyEventKind};
use std::time::Instant;

pub mod common;
pub mod player;

pub fn handle_event<S: NowPlayingSource>(
    key: KeyEvent,
    app: &mut App,
    controller: &mut PlayerController<S, AppEvent>,
    now: Instant,
) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    // 1. Common/Global Keys (Quit, Help, panels)
    if common::handle_common_events(key, app) {
        return;
    }

    // 2. Player Controls
    player::handle_player_events(key, app, controller, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::PersistentState;
    use crate::app::keys::KeyConfig;
    use crate::playback::{MediaBackend, MediaEvent};
    use crate::radio::error::Result;
    use crate::radio::{NowPlayingPayload, PollIntervals};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::future::Future;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    struct EmptySource;

    impl NowPlayingSource for EmptySource {
        fn fetch(&self) -> impl Future<Output = Result<NowPlayingPayload>> + Send {
            async { Ok(NowPlayingPayload::default()) }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingBackend(Arc<Mutex<Vec<&'static str>>>);

    impl MediaBackend for RecordingBackend {
        fn play(&mut self) -> Result<()> {
            self.0.lock().unwrap().push("play");
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.0.lock().unwrap().push("pause");
            Ok(())
        }

        fn set_volume(&mut self, _volume: f32) -> Result<()> {
            self.0.lock().unwrap().push("volume");
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn setup() -> (
        App,
        PlayerController<EmptySource, AppEvent>,
        RecordingBackend,
    ) {
        let backend = RecordingBackend::default();
        let (tx, _rx) = mpsc::channel(8);
        let controller = PlayerController::new(
            PollIntervals::default(),
            Arc::new(EmptySource),
            Box::new(backend.clone()),
            tx,
            0.4,
        );
        let app = App::new(
            "Test FM",
            KeyConfig::default(),
            &PersistentState::default(),
            "recording",
            Instant::now(),
        );
        (app, controller, backend)
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn space_toggles_playback() {
        let (mut app, mut controller, backend) = setup();
        handle_event(press(' '), &mut app, &mut controller, Instant::now());
        assert_eq!(backend.0.lock().unwrap().last(), Some(&"play"));

        let changes = controller.handle_media_event(MediaEvent::Play);
        app.apply_all(changes, Instant::now());
        handle_event(press(' '), &mut app, &mut controller, Instant::now());
        assert_eq!(backend.0.lock().unwrap().last(), Some(&"pause"));
    }

    #[tokio::test]
    async fn volume_keys_move_slider_in_steps() {
        let (mut app, mut controller, _backend) = setup();
        assert_eq!(app.slider, 63);

        handle_event(press('+'), &mut app, &mut controller, Instant::now());
        assert_eq!(app.slider, 68);
        handle_event(press('-'), &mut app, &mut controller, Instant::now());
        handle_event(press('-'), &mut app, &mut controller, Instant::now());
        assert_eq!(app.slider, 58);
        assert!(app.take_prefs_dirty());
    }

    #[tokio::test]
    async fn quit_closes_help_first() {
        let (mut app, mut controller, _backend) = setup();
        handle_event(press('?'), &mut app, &mut controller, Instant::now());
        assert!(app.show_keyhints);

        handle_event(press('q'), &mut app, &mut controller, Instant::now());
        assert!(!app.show_keyhints);
        assert!(!app.should_quit);

        handle_event(press('q'), &mut app, &mut controller, Instant::now());
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn panel_and_theme_toggles() {
        let (mut app, mut controller, _backend) = setup();
        handle_event(press('h'), &mut app, &mut controller, Instant::now());
        assert!(app.show_recent);

        let before = app.theme_mode;
        handle_event(press('t'), &mut app, &mut controller, Instant::now());
        assert_ne!(app.theme_mode, before);
        assert!(app.take_prefs_dirty());
    }
}
