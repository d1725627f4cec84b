use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

pub mod art;
pub mod controls;
pub mod info;
pub mod progress;

pub fn render(f: &mut Frame, area: Rect, app: &App, now: Instant) {
    let theme = &app.theme;

    // --- PLAYER CARD ---
    let title = Line::from(vec![Span::styled(
        format!(" 📻 {} ", app.station_name),
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Nothing to show until the first poll lands
    if app.initial_loading {
        let placeholder = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                "📡 Tuning in...",
                Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        let centered = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(2),
                Constraint::Fill(1),
            ])
            .split(inner)[1];
        f.render_widget(placeholder, centered);
        return;
    }

    let height = inner.height;
    let constraints = if height < 10 {
        // Tiny Mode: no artwork, no gauge
        vec![
            Constraint::Length(0),                            // 0: Artwork (Hidden)
            Constraint::Length(height.saturating_sub(1).max(1)), // 1: Info
            Constraint::Length(0),                            // 2: Gauge (Hidden)
            Constraint::Length(0),                            // 3: Time (Hidden)
            Constraint::Length(1),                            // 4: Controls
        ]
    } else {
        vec![
            Constraint::Min(0),    // 0: Artwork (Elastic!)
            Constraint::Length(3), // 1: Info
            Constraint::Length(1), // 2: Gauge
            Constraint::Length(1), // 3: Time
            Constraint::Length(3), // 4: Controls
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    if chunks[0].height > 1 {
        art::render(f, chunks[0], app);
    }
    info::render(f, chunks[1], app);
    if chunks[2].height > 0 {
        progress::render_progress(f, chunks[2], app, now);
    }
    if chunks[3].height > 0 {
        progress::render_time(f, chunks[3], app, now);
    }
    controls::render(f, chunks[4], app);
}
