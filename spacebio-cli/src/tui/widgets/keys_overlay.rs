//! Keyboard help overlay.
//!
//! Lists the dashboard shortcuts grouped by pane. Toggled with F1 or `?`.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Anywhere",
        &[
            ("Ctrl+C", "Quit"),
            ("F1 / ?", "Toggle this help"),
            ("Ctrl+1..4", "Run a sample query for the current persona"),
        ],
    ),
    (
        "Dashboard",
        &[
            ("Tab / Shift+Tab", "Next / previous tab"),
            ("1 / 2 / 3", "Search, Trends, Gap Analysis"),
            ("p", "Switch persona"),
            ("b", "Back to role selection"),
            ("x", "Dismiss error banner"),
            ("q", "Quit"),
        ],
    ),
    (
        "Search",
        &[
            ("/ or i", "Edit the query"),
            ("Enter", "Run the search"),
            ("f", "Focus the filter panel"),
            ("↑ ↓ / j k", "Move through results"),
            ("Enter / Space", "Open paper details"),
        ],
    ),
    (
        "Filters",
        &[
            ("↑ ↓", "Move between rows"),
            ("← →", "Change year or section"),
            ("Enter / Space", "Toggle organism or clear filters"),
        ],
    ),
    (
        "Paper details",
        &[
            ("s", "Find similar papers"),
            ("c", "Copy citation"),
            ("r", "Retry summary"),
            ("p", "Re-summarize for the next persona"),
            ("Esc", "Close"),
        ],
    ),
    (
        "Trends / Gap Analysis",
        &[("↑ ↓ / PgUp PgDn", "Scroll")],
    ),
];

/// Visibility and scroll state of the help overlay.
#[derive(Debug, Clone, Default)]
pub struct KeysOverlay {
    visible: bool,
    scroll_offset: u16,
}

impl KeysOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide the overlay. Opening always starts at the top.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        self.scroll_offset = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = help_lines(Style::default(), Style::default(), Style::default()).len() as u16;
        self.scroll_offset = (self.scroll_offset + 1).min(max.saturating_sub(1));
    }
}

fn help_lines(section: Style, key: Style, desc: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (title, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(format!(" {}", title), section)));
        for (k, d) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:<18}", k), key),
                Span::styled(*d, desc),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

pub fn render_keys_overlay(frame: &mut Frame, area: Rect, overlay: &KeysOverlay, theme: &Theme) {
    if !overlay.visible || area.width < 20 || area.height < 8 {
        return;
    }
    let popup = super::centered_rect(68, 32, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.pane_border_style(true))
        .title(Span::styled(" Keyboard Shortcuts ", theme.title_style()))
        .title_bottom(Span::styled(" [↑↓] scroll  [Esc] close ", theme.muted_style()))
        .style(theme.panel_style());

    let lines = help_lines(
        theme.accent_style().add_modifier(Modifier::BOLD),
        theme.title_style(),
        theme.muted_style(),
    );
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((overlay.scroll_offset, 0)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn test_toggle_resets_scroll() {
        let mut overlay = KeysOverlay::new();
        assert!(!overlay.is_visible());
        overlay.toggle();
        overlay.scroll_down();
        overlay.scroll_down();
        assert_eq!(overlay.scroll_offset(), 2);
        overlay.toggle();
        overlay.toggle();
        assert!(overlay.is_visible());
        assert_eq!(overlay.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut overlay = KeysOverlay::new();
        overlay.scroll_up();
        assert_eq!(overlay.scroll_offset(), 0);
        for _ in 0..500 {
            overlay.scroll_down();
        }
        let total = help_lines(Style::default(), Style::default(), Style::default()).len() as u16;
        assert_eq!(overlay.scroll_offset(), total - 1);
    }

    #[test]
    fn test_render_visible_lists_drawer_keys() {
        let backend = ratatui::backend::TestBackend::new(100, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut overlay = KeysOverlay::new();
        overlay.toggle();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_keys_overlay(frame, frame.area(), &overlay, &theme))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Find similar papers"));
    }

    #[test]
    fn test_render_hidden_or_tiny_is_noop() {
        let backend = ratatui::backend::TestBackend::new(15, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut overlay = KeysOverlay::new();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_keys_overlay(frame, frame.area(), &overlay, &theme))
            .unwrap();
        overlay.toggle();
        terminal
            .draw(|frame| render_keys_overlay(frame, frame.area(), &overlay, &theme))
            .unwrap();
        assert!(!buffer_text(terminal.backend().buffer()).contains("Keyboard"));
    }
}
