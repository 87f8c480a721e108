//! # Theme
//!
//! Green palette in a light and a dark variant. The appearance is pure
//! presentation state: toggling it never touches the conversation.

use ratatui::style::Color;

use crate::ThemeMode;

/// Concrete appearance after `ThemeMode::Auto` has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    pub fn toggled(self) -> Self {
        match self {
            Appearance::Light => Appearance::Dark,
            Appearance::Dark => Appearance::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }

    /// Resolves a requested mode, consulting `COLORFGBG` for `Auto`.
    pub fn resolve(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Appearance::Light,
            ThemeMode::Dark => Appearance::Dark,
            ThemeMode::Auto => {
                Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
            }
        }
    }

    /// Reads the background index from a `COLORFGBG` value such as `15;0`.
    /// ANSI 7 and 9..=15 are light backgrounds; anything unknown is dark.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let bg = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|s| s.trim().parse::<u8>().ok());
        match bg {
            Some(7) | Some(9..=15) => Appearance::Light,
            _ => Appearance::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Appearance::Light => Palette::LIGHT,
            Appearance::Dark => Palette::DARK,
        }
    }
}

/// Colour tokens used by every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,
    pub secondary: Color,
    pub on_primary: Color,
    pub background: Color,
    pub paper: Color,
    pub text: Color,
    pub text_muted: Color,
    pub error: Color,
    pub divider: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        primary: Color::Rgb(0x1B, 0x5E, 0x20),
        primary_light: Color::Rgb(0x4C, 0x8C, 0x4A),
        primary_dark: Color::Rgb(0x00, 0x33, 0x00),
        secondary: Color::Rgb(0x81, 0xC7, 0x84),
        on_primary: Color::Rgb(0xFF, 0xFF, 0xFF),
        background: Color::Rgb(0xF5, 0xF5, 0xF5),
        paper: Color::Rgb(0xFF, 0xFF, 0xFF),
        text: Color::Rgb(0x21, 0x21, 0x21),
        text_muted: Color::Rgb(0x75, 0x75, 0x75),
        error: Color::Rgb(0xD3, 0x2F, 0x2F),
        divider: Color::Rgb(0xE0, 0xE0, 0xE0),
    };

    pub const DARK: Palette = Palette {
        primary: Color::Rgb(0x1B, 0x5E, 0x20),
        primary_light: Color::Rgb(0x4C, 0x8C, 0x4A),
        primary_dark: Color::Rgb(0x00, 0x33, 0x00),
        secondary: Color::Rgb(0x81, 0xC7, 0x84),
        on_primary: Color::Rgb(0xFF, 0xFF, 0xFF),
        background: Color::Rgb(0x12, 0x12, 0x12),
        paper: Color::Rgb(0x1E, 0x1E, 0x1E),
        text: Color::Rgb(0xFF, 0xFF, 0xFF),
        text_muted: Color::Rgb(0x9E, 0x9E, 0x9E),
        error: Color::Rgb(0xF4, 0x43, 0x36),
        divider: Color::Rgb(0x33, 0x33, 0x33),
    };
}
