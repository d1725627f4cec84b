use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Theme {
    /// Catppuccin Mocha
    pub fn dark() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }

    /// Catppuccin Latte
    pub fn light() -> Self {
        Self {
            base: Color::Rgb(239, 241, 245),
            surface: Color::Rgb(204, 208, 218),
            overlay: Color::Rgb(140, 143, 161),
            text: Color::Rgb(76, 79, 105),
            red: Color::Rgb(210, 15, 57),
            green: Color::Rgb(64, 160, 43),
            yellow: Color::Rgb(223, 142, 29),
            blue: Color::Rgb(30, 102, 245),
            magenta: Color::Rgb(136, 57, 239),
            cyan: Color::Rgb(23, 146, 153),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

/// Persisted as `"dark"` / `"light"`; anything else reads as light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeMode {
    Dark,
    #[default]
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl From<String> for ThemeMode {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl From<ThemeMode> for String {
    fn from(mode: ThemeMode) -> Self {
        mode.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!(ThemeMode::from("dark".to_string()), ThemeMode::Dark);
        assert_eq!(ThemeMode::from("DARK ".to_string()), ThemeMode::Dark);
        assert_eq!(ThemeMode::from("light".to_string()), ThemeMode::Light);
        assert_eq!(ThemeMode::from("sepia".to_string()), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn palettes_differ() {
        assert_ne!(Theme::for_mode(ThemeMode::Dark), Theme::for_mode(ThemeMode::Light));
    }
}
