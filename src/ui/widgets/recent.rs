use crate::app::App;
use crate::ui::utils::truncate;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(Span::styled(
            " Recently Played ",
            Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
        )))
        .border_style(Style::default().fg(theme.magenta))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.recent.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No recent tracks available",
            Style::default().fg(theme.overlay),
        )))
        .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    }

    let max_width = inner.width.saturating_sub(4) as usize;
    let mut lines = Vec::new();
    for track in &app.recent {
        let played = track.played_at().with_timezone(&Local).format("%H:%M");
        lines.push(Line::from(vec![
            Span::styled("♪ ", Style::default().fg(theme.blue)),
            Span::styled(
                truncate(track.title(), max_width),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate(track.artist(), max_width.saturating_sub(8)),
                Style::default().fg(theme.overlay),
            ),
            Span::styled(format!(" · {}", played), Style::default().fg(theme.surface)),
        ]));
        lines.push(Line::default());
    }

    f.render_widget(Paragraph::new(lines), inner);
}
