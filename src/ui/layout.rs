use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    // Footer needs 1 line at the bottom always.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        footer_area: chunks[1],
    }
}

pub struct ContentLayout {
    pub left: Rect,
    pub right: Option<Rect>,
    pub is_horizontal: bool,
}

pub fn get_content_layout(area: Rect, show_recent: bool) -> ContentLayout {
    if !show_recent {
        return ContentLayout {
            left: area,
            right: None,
            is_horizontal: false,
        };
    }

    if area.width >= 90 {
        // Side by side: player dominant
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Min(30)])
            .split(area);
        ContentLayout {
            left: chunks[0],
            right: Some(chunks[1]),
            is_horizontal: true,
        }
    } else if area.height >= 30 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        ContentLayout {
            left: chunks[0],
            right: Some(chunks[1]),
            is_horizontal: false,
        }
    } else {
        // Too small for both: the list replaces the player
        ContentLayout {
            left: Rect::default(),
            right: Some(area),
            is_horizontal: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_panel_placement() {
        let wide = get_content_layout(Rect::new(0, 0, 120, 30), true);
        assert!(wide.is_horizontal);
        assert!(wide.right.is_some());

        let tall = get_content_layout(Rect::new(0, 0, 60, 40), true);
        assert!(!tall.is_horizontal);
        assert_eq!(tall.left.width, 60);

        let hidden = get_content_layout(Rect::new(0, 0, 120, 30), false);
        assert!(hidden.right.is_none());
        assert_eq!(hidden.left.width, 120);

        let cramped = get_content_layout(Rect::new(0, 0, 60, 20), true);
        assert!(cramped.left.is_empty());
    }
}
