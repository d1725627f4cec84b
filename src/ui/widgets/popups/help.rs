use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let keys = &app.keys;

    // 🎹 WhichKey-style floating popup
    let entries: Vec<(String, &str, &str)> = vec![
        (keys.display(&keys.play_pause), "⏯️", "Play / Pause"),
        (
            format!("{}/{}", keys.display(&keys.volume_up), keys.display(&keys.volume_down)),
            "🔊",
            "Volume",
        ),
        (keys.display(&keys.toggle_recent), "🕘", "Recently played"),
        (keys.display(&keys.toggle_theme), "🌗", "Light / Dark"),
        (keys.display(&keys.refresh), "🔄", "Refresh now"),
        (keys.display(&keys.toggle_keyhints), "❔", "Close help"),
        (keys.display(&keys.quit), "🚪", "Quit"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, icon, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<7} ", key),
                    Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::raw(format!("{} ", icon)),
                Span::styled(*desc, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    // Fit content exactly 📏
    let content_width = entries
        .iter()
        .map(|(k, _, d)| 2 + k.width().max(7) + 3 + 3 + d.width())
        .max()
        .unwrap_or(20);

    let screen = f.area();
    let popup_height = (lines.len() as u16 + 2).min(screen.height.saturating_sub(2));
    let popup_width = (content_width as u16 + 4).min(screen.width.saturating_sub(2));

    // Position at bottom-right
    let popup_x = screen.width.saturating_sub(popup_width + 1);
    let popup_y = screen.height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height).intersection(screen);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.blue))
            .title(" Keys ")
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, popup_area);
}
