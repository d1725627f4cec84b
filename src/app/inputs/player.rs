use crate::app::events::AppEvent;
use crate::app::App;
use crate::radio::volume::SLIDER_STEP;
use crate::radio::{NowPlayingSource, PlayerController};
use crossterm::event::KeyEvent;
use std::time::Instant;

pub fn handle_player_events<S: NowPlayingSource>(
    key: KeyEvent,
    app: &mut App,
    controller: &mut PlayerController<S, AppEvent>,
    now: Instant,
) -> bool {
    let keys = app.keys.clone();

    // Play/Pause ('Space')
    if keys.matches(key, &keys.play_pause) {
        if controller.state().is_loading {
            app.show_toast("⏳ Buffering...");
            return true;
        }
        let changes = controller.toggle_play();
        app.apply_all(changes, now);
        return true;
    }

    let step = i16::from(SLIDER_STEP);

    // Volume Up ('+')
    if keys.matches(key, &keys.volume_up) || keys.matches(key, &keys.volume_up_alt) {
        app.apply_all(controller.nudge_volume(step), now);
        let message = format!("{} Volume: {}%", app.volume_icon().glyph(), app.slider);
        app.show_toast(&message);
        return true;
    }

    // Volume Down ('-')
    if keys.matches(key, &keys.volume_down) || keys.matches(key, &keys.volume_down_alt) {
        app.apply_all(controller.nudge_volume(-step), now);
        let message = format!("{} Volume: {}%", app.volume_icon().glyph(), app.slider);
        app.show_toast(&message);
        return true;
    }

    // Refresh ('r')
    if keys.matches(key, &keys.refresh) {
        controller.refresh();
        app.show_toast("🔄 Refreshing");
        return true;
    }

    false
}
