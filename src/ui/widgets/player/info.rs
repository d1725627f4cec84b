use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let max_width = area.width.saturating_sub(4) as usize;

    // Old info fades while the next track is pending
    let fade = if app.track_updating {
        Modifier::DIM
    } else {
        Modifier::empty()
    };
    let title_color = if app.playback_error.is_some() {
        theme.red
    } else {
        theme.text
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("🎵 {}", truncate(app.display_title(), max_width.saturating_sub(2))),
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD | fade),
        )),
        Line::from(vec![
            Span::raw("🎤 "),
            Span::styled(
                truncate(app.display_artist(), max_width.saturating_sub(2)),
                Style::default().fg(theme.magenta).add_modifier(fade),
            ),
        ]),
    ];

    if area.height > 2 {
        let status = if app.is_loading {
            Span::styled("Buffering...", Style::default().fg(theme.yellow))
        } else if app.is_playing {
            Span::styled("● LIVE", Style::default().fg(theme.red).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("Paused", Style::default().fg(theme.overlay))
        };
        lines.push(Line::from(status));
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
