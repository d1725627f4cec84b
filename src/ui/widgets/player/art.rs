use crate::app::{App, ArtworkState};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    if area.height < 1 {
        return;
    }

    match &app.artwork {
        ArtworkState::Loaded(raw_image) => {
            let lines = half_block_lines(raw_image, area.width as u32, area.height as u32);
            let artwork_widget = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().style(Style::default().bg(Color::Reset)));
            f.render_widget(artwork_widget, area);
        }
        ArtworkState::Loading => {
            let p = Paragraph::new(padded(area, &["Loading..."]))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.yellow));
            f.render_widget(p, area);
        }
        ArtworkState::Failed | ArtworkState::Idle => {
            let p = Paragraph::new(padded(area, &["♪", "No Cover", "Art"]))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.overlay));
            f.render_widget(p, area);
        }
    }
}

/// Vertically center a few lines of placeholder text
fn padded<'a>(area: Rect, text: &[&'a str]) -> Vec<Line<'a>> {
    let top = area.height.saturating_sub(text.len() as u16) / 2;
    let mut lines = vec![Line::default(); top as usize];
    lines.extend(text.iter().map(|t| Line::from(*t)));
    lines
}

/// Render the image with "▀": foreground is the upper pixel, background
/// the lower one, so each cell holds two rows.
pub fn half_block_lines(image: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    let target_height = height * 2;
    if width == 0 || target_height == 0 {
        return Vec::new();
    }

    // Resize preserving aspect ratio (Triangle for quality)
    let resized = image.resize(width, target_height, FilterType::Triangle);
    let img_height = resized.height();
    let img_rows = img_height.div_ceil(2);
    let padding_top = height.saturating_sub(img_rows) / 2;

    let mut lines = vec![Line::default(); padding_top as usize];
    for y in (0..img_height).step_by(2) {
        let spans: Vec<Span> = (0..resized.width())
            .map(|x| {
                let top = resized.get_pixel(x, y);
                let bottom = if y + 1 < img_height {
                    resized.get_pixel(x, y + 1)
                } else {
                    top
                };
                Span::styled(
                    "▀",
                    Style::default()
                        .fg(Color::Rgb(top[0], top[1], top[2]))
                        .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}
