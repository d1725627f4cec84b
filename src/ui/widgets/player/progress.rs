use crate::app::App;
use crate::ui::utils::format_duration;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

pub fn render_progress(f: &mut Frame, area: Rect, app: &App, now: Instant) {
    let theme = &app.theme;

    // No duration from the station: nothing to measure against
    let Some(ratio) = app.progress_ratio(now) else {
        return;
    };

    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let width = gauge_area.width as usize;
    let occupied_width = (width as f64 * ratio) as usize;
    let fill_style = Style::default().fg(theme.magenta);
    let empty_style = Style::default().fg(theme.surface);

    let bar_spans: Vec<Span> = (0..width)
        .map(|i| {
            if i + 1 == occupied_width {
                Span::styled("●", fill_style) // Playhead knob
            } else if i < occupied_width {
                Span::styled("━", fill_style)
            } else {
                Span::styled("─", empty_style)
            }
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(bar_spans)), gauge_area);
}

pub fn render_time(f: &mut Frame, area: Rect, app: &App, now: Instant) {
    let theme = &app.theme;
    let Some(elapsed) = app.elapsed(now) else {
        return;
    };

    let time_str = match app.duration() {
        Some(total) => format!("{} / {}", format_duration(elapsed), format_duration(total)),
        None => format!("Listening for {}", format_duration(elapsed)),
    };
    let time_label = Paragraph::new(time_str)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.overlay));
    f.render_widget(time_label, area);
}
