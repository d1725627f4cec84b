use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const SLIDE_MS: u128 = 300;

pub fn render(f: &mut Frame, app: &App, now: Instant) {
    let Some(toast) = &app.toast else {
        return;
    };
    let theme = &app.theme;
    let screen = f.area();

    // Auto-dismiss handled in App::on_tick()
    let message = &toast.message;
    let width = (message.width() as u16 + 6).min(screen.width.saturating_sub(4));
    let height = 3;
    let target_x = screen.width.saturating_sub(width + 1); // Top-right fixed

    let entrance_elapsed = now.saturating_duration_since(toast.start_time).as_millis();
    let time_remaining = toast.deadline.saturating_duration_since(now).as_millis();

    // Animation: Slide In/Out 🌊
    let offset = if entrance_elapsed < SLIDE_MS {
        let t = entrance_elapsed as f32 / SLIDE_MS as f32;
        let ease = 1.0 - (1.0 - t).powi(3); // Cubic Out
        (width as f32 * (1.0 - ease)) as u16
    } else if time_remaining < SLIDE_MS {
        let t = (SLIDE_MS - time_remaining) as f32 / SLIDE_MS as f32;
        let ease = t.powi(3); // Cubic In
        (width as f32 * ease) as u16
    } else {
        0
    };
    let x = target_x.saturating_add(offset);

    if x >= screen.width {
        return;
    }

    // Clip to screen bounds to avoid panic
    let visible_area = Rect::new(x, 1, width, height).intersection(screen);
    if visible_area.is_empty() {
        return;
    }

    f.render_widget(Clear, visible_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let style = Style::default().fg(theme.blue).add_modifier(Modifier::BOLD);
    let text = Paragraph::new(Line::from(vec![Span::styled(message.as_str(), style)]))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(text, visible_area);
}
