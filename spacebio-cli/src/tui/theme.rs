//! Theme system for the dashboard.
//!
//! Provides dark and light color palettes, loaded from `UiConfig.theme`.

use ratatui::style::{Color, Modifier, Style};
use spacebio_core::MatchLabel;

/// Complete color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub muted_fg: Color,
    /// NASA teal; focus and highlights.
    pub accent: Color,
    /// NASA red; the persona badge and chart bars.
    pub highlight: Color,

    // Status colors
    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub info_fg: Color,

    // UI chrome
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub border_color: Color,
    pub focus_border_color: Color,
    pub selection_bg: Color,
    pub panel_bg: Color,
}

impl Theme {
    /// Create the default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            bg: Color::Rgb(16, 22, 38),
            fg: Color::Rgb(215, 222, 240),
            muted_fg: Color::Rgb(127, 136, 160),
            accent: Color::Rgb(0, 169, 206),
            highlight: Color::Rgb(252, 61, 33),

            error_fg: Color::Rgb(243, 139, 168),
            warning_fg: Color::Rgb(250, 179, 135),
            success_fg: Color::Rgb(166, 227, 161),
            info_fg: Color::Rgb(137, 180, 250),

            header_bg: Color::Rgb(11, 61, 145),
            header_fg: Color::Rgb(255, 255, 255),
            status_bar_bg: Color::Rgb(12, 16, 28),
            status_bar_fg: Color::Rgb(166, 173, 200),
            border_color: Color::Rgb(60, 68, 92),
            focus_border_color: Color::Rgb(0, 169, 206),
            selection_bg: Color::Rgb(36, 52, 88),
            panel_bg: Color::Rgb(22, 30, 50),
        }
    }

    /// Create the light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            bg: Color::Rgb(244, 246, 250),
            fg: Color::Rgb(40, 44, 60),
            muted_fg: Color::Rgb(120, 124, 140),
            accent: Color::Rgb(0, 122, 160),
            highlight: Color::Rgb(214, 40, 16),

            error_fg: Color::Rgb(210, 15, 57),
            warning_fg: Color::Rgb(200, 90, 11),
            success_fg: Color::Rgb(40, 140, 43),
            info_fg: Color::Rgb(30, 102, 245),

            header_bg: Color::Rgb(11, 61, 145),
            header_fg: Color::Rgb(255, 255, 255),
            status_bar_bg: Color::Rgb(220, 224, 232),
            status_bar_fg: Color::Rgb(70, 74, 96),
            border_color: Color::Rgb(172, 176, 190),
            focus_border_color: Color::Rgb(0, 122, 160),
            selection_bg: Color::Rgb(205, 222, 245),
            panel_bg: Color::Rgb(232, 236, 243),
        }
    }

    /// Load a theme by name from config. Falls back to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    // -- Convenience style constructors --

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header_fg).bg(self.header_bg)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar_fg)
            .bg(self.status_bar_bg)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted_fg)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning_fg)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success_fg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border_color)
    }

    /// Border for a pane, brighter when it has keyboard focus.
    pub fn pane_border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus_border_color)
        } else {
            self.border_style()
        }
    }

    pub fn panel_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.panel_bg)
    }

    /// Badge color for a result's match label.
    pub fn match_label_color(&self, label: MatchLabel) -> Color {
        match label {
            MatchLabel::Excellent => self.success_fg,
            MatchLabel::Good => self.info_fg,
            MatchLabel::Relevant => self.muted_fg,
        }
    }

    /// Color for a signed growth figure: green up, red down, muted flat.
    pub fn growth_color(&self, growth: f64) -> Color {
        if growth > 0.0 {
            self.success_fg
        } else if growth < 0.0 {
            self.error_fg
        } else {
            self.muted_fg
        }
    }
}
