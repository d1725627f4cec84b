pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

pub fn ui(f: &mut Frame, app: &App, now: Instant) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);
    let content_layout = layout::get_content_layout(main_layout.body_area, app.show_recent);

    // 2. Player card
    if !content_layout.left.is_empty() {
        widgets::player::render(f, content_layout.left, app, now);
    }

    // 3. Recently played
    if let Some(right_area) = content_layout.right {
        widgets::recent::render(f, right_area, app);
    }

    // 4. Footer
    render_footer(f, main_layout.footer_area, app);

    // 5. Popups (Overlays)
    widgets::popups::render(f, app, now);
}

fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(area);

    let status = match &app.connection_error {
        Some(error) => Line::from(vec![
            Span::styled(" ⚠ ", Style::default().fg(theme.red).add_modifier(Modifier::BOLD)),
            Span::styled(
                utils::truncate(error, chunks[0].width.saturating_sub(4) as usize),
                Style::default().fg(theme.red),
            ),
        ]),
        None => Line::from(vec![
            Span::styled(
                if app.is_playing { " ● " } else { " ○ " },
                Style::default().fg(if app.is_playing { theme.green } else { theme.overlay }),
            ),
            Span::styled(
                format!("{} · {}", app.station_name, app.backend_name),
                Style::default().fg(theme.overlay),
            ),
        ]),
    };
    f.render_widget(Paragraph::new(status), chunks[0]);

    if !app.show_keyhints {
        let hint = Line::from(vec![
            Span::styled(
                format!(" {} ", app.keys.display(&app.keys.toggle_keyhints)),
                Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys", Style::default().fg(theme.overlay)),
        ]);
        f.render_widget(Paragraph::new(hint).alignment(Alignment::Right), chunks[1]);
    }
}
