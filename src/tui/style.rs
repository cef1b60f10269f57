//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::model::MarkerSeverity;
use crate::view::SegmentStyle;

/// Color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;
    pub const HOVER_BG: Color = Color::Rgb(40, 40, 48);

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Severity colors
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;

    // Accents
    pub const MATCH: Color = Color::LightYellow;
    pub const LINK: Color = Color::LightBlue;
    pub const QUICK_FIX: Color = Color::LightYellow;
    pub const MARKED: Color = Color::Magenta;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Focused row style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Row under the settled pointer.
    pub fn hovered() -> Style {
        Style::default().bg(Theme::HOVER_BG)
    }

    /// Row in the multi-selection.
    pub fn marked() -> Style {
        Style::default().fg(Theme::MARKED)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn severity(severity: MarkerSeverity) -> Style {
        let color = match severity {
            MarkerSeverity::Error => Theme::ERROR,
            MarkerSeverity::Warning => Theme::WARNING,
            MarkerSeverity::Info => Theme::INFO,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Filter input style.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Status message style.
    pub fn status() -> Style {
        Style::default().fg(Theme::WARNING)
    }

    /// Section header style for popups.
    pub fn section_header() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Maps a UI-agnostic [`SegmentStyle`] to a ratatui [`Style`].
    pub fn from_segment(style: SegmentStyle) -> Style {
        match style {
            SegmentStyle::Normal => Style::default(),
            SegmentStyle::Highlight => Style::default()
                .fg(Theme::MATCH)
                .add_modifier(Modifier::BOLD),
            SegmentStyle::Dimmed => Self::dim(),
            SegmentStyle::Link => Style::default()
                .fg(Theme::LINK)
                .add_modifier(Modifier::UNDERLINED),
            SegmentStyle::Severity(severity) => Self::severity(severity),
            SegmentStyle::QuickFix => Style::default().fg(Theme::QUICK_FIX),
        }
    }
}
