//! Status bar widget showing keybinding hints and the latest status message.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Where keyboard input currently goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Landing,
    Query,
    Samples,
    Filters,
    Results,
    Drawer,
    Browse,
    Dialog,
}

impl InputMode {
    /// Short display label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Landing => "ROLE",
            Self::Query => "SEARCH",
            Self::Samples => "SAMPLES",
            Self::Filters => "FILTERS",
            Self::Results => "RESULTS",
            Self::Drawer => "PAPER",
            Self::Browse => "VIEW",
            Self::Dialog => "DIALOG",
        }
    }

    pub fn hints(&self) -> &'static str {
        match self {
            Self::Landing => "[↑↓] Select │ [Enter] Continue │ [Esc] Quit",
            Self::Query => "[Enter] Search │ [↓] Samples │ [Tab] Next tab │ [Esc] Results │ [Ctrl+C] Quit",
            Self::Samples => "[←→] Select │ [Enter] Run │ [↑] Search box │ [f] Filters",
            Self::Filters => "[↑↓] Move │ [←→] Change │ [Enter] Toggle │ [Esc] Results",
            Self::Results => "[↑↓] Select │ [Enter] Details │ [/] Search │ [f] Filters │ [p] Persona │ [?] Help",
            Self::Drawer => "[s] Similar │ [c] Cite │ [r] Retry │ [p] Persona │ [Esc] Close",
            Self::Browse => "[↑↓] Scroll │ [Tab] Next tab │ [p] Persona │ [b] Roles │ [?] Help",
            Self::Dialog => "[Enter/Esc] Close",
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Render the status bar.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    status: Option<&str>,
    theme: &Theme,
) {
    let status_width = status.map_or(0, |s| s.chars().count() as u16 + 2);
    let [hints_area, status_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)]).areas(area);

    let spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            theme
                .status_bar_style()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", theme.status_bar_style()),
        Span::styled(mode.hints(), theme.status_bar_style()),
    ];
    let bar = Paragraph::new(Line::from(spans)).style(theme.status_bar_style());
    frame.render_widget(bar, hints_area);

    if let Some(status) = status {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {} ", status),
                theme.status_bar_style().fg(theme.success_fg),
            ))
            .style(theme.status_bar_style()),
            status_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn test_input_mode_labels() {
        assert_eq!(InputMode::Query.label(), "SEARCH");
        assert_eq!(InputMode::Drawer.label(), "PAPER");
        assert_eq!(format!("{}", InputMode::Filters), "FILTERS");
    }

    #[test]
    fn test_drawer_hints_list_actions() {
        let hints = InputMode::Drawer.hints();
        assert!(hints.contains("[s] Similar"));
        assert!(hints.contains("[c] Cite"));
        assert!(hints.contains("[r] Retry"));
    }

    #[test]
    fn test_render_status_bar_with_message() {
        let backend = ratatui::backend::TestBackend::new(160, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                render_status_bar(
                    frame,
                    frame.area(),
                    InputMode::Results,
                    Some("Citation copied to clipboard!"),
                    &theme,
                );
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("RESULTS"));
        assert!(text.contains("Citation copied to clipboard!"));
    }

    #[test]
    fn test_render_status_bar_narrow() {
        let backend = ratatui::backend::TestBackend::new(20, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_status_bar(frame, frame.area(), InputMode::Query, None, &theme))
            .unwrap();
    }
}
