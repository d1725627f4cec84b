use crate::app::App;
use ratatui::Frame;
use std::time::Instant;

pub mod help;
pub mod toast;

pub fn render(f: &mut Frame, app: &App, now: Instant) {
    // TOAST NOTIFICATION
    if app.toast.is_some() {
        toast::render(f, app, now);
    }

    // WHICHKEY POPUP
    if app.show_keyhints {
        help::render(f, app);
    }
}
