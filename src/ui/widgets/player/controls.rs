use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const VOLUME_BAR_WIDTH: usize = 20;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let play_icon = if app.is_loading {
        "⏳"
    } else if app.is_playing {
        "⏸"
    } else {
        "▶"
    };
    let btn_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);

    // Split Controls Area: Top for Button, Bottom for Volume
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Button
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Volume Bar
        ])
        .split(area);

    let button = Paragraph::new(Line::from(Span::styled(format!("   {}   ", play_icon), btn_style)))
        .alignment(Alignment::Center);
    f.render_widget(button, chunks[0]);

    // Volume only while the stream is running
    if app.is_playing && chunks[2].height > 0 {
        f.render_widget(
            Paragraph::new(volume_bar(app)).alignment(Alignment::Center),
            chunks[2],
        );
    }
}

fn volume_bar(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let filled = (VOLUME_BAR_WIDTH as f64 * f64::from(app.slider) / 100.0).round() as usize;

    let mut spans = vec![Span::styled(
        format!("{} ", app.volume_icon().glyph()),
        Style::default().fg(theme.overlay),
    )];
    spans.extend((0..VOLUME_BAR_WIDTH).map(|i| {
        if i < filled {
            Span::styled("━", Style::default().fg(theme.magenta))
        } else {
            Span::styled("─", Style::default().fg(theme.surface))
        }
    }));
    spans.push(Span::styled(
        format!(" {:>3}%", app.slider),
        Style::default().fg(theme.overlay),
    ));
    Line::from(spans)
}
