use crate::app::App;
use crate::ui::theme::ThemeMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_common_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = &app.keys;

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return true;
    }

    // Quit ('q')
    if keys.matches(key, &keys.quit) {
        // Close popups first, then quit (Neovim-style)
        if app.show_keyhints {
            app.show_keyhints = false;
        } else {
            app.should_quit = true;
        }
        return true;
    }

    if keys.matches(key, &keys.toggle_keyhints) {
        app.show_keyhints = !app.show_keyhints;
        return true;
    }

    // Global Popup Close (Esc)
    if key.code == KeyCode::Esc && app.show_keyhints {
        app.show_keyhints = false;
        return true;
    }

    if keys.matches(key, &keys.toggle_recent) {
        app.toggle_recent();
        return true;
    }

    if keys.matches(key, &keys.toggle_theme) {
        let mode = app.toggle_theme();
        app.show_toast(match mode {
            ThemeMode::Dark => "🌙 Dark mode",
            ThemeMode::Light => "☀️ Light mode",
        });
        return true;
    }

    false
}
