//! First-run quick start dialog.

use crate::tui::theme::Theme;
use crate::tui::widgets::centered_rect;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const TABS: [(&str, &str); 3] = [
    (
        "Search Tab",
        "Use semantic search to find relevant research papers with advanced filters",
    ),
    (
        "Trends Tab",
        "Visualize research patterns, organisms studied, and emerging areas",
    ),
    (
        "Gap Analysis Tab",
        "Discover under-researched areas and strategic opportunities",
    ),
];

pub fn render_quick_start(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(72, 20, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.pane_border_style(true))
        .title(Span::styled(
            " Welcome to the Space Biology Knowledge Engine! ",
            theme.title_style(),
        ))
        .style(theme.panel_style());

    let mut lines = vec![
        Line::from(Span::styled(
            "Explore 608 NASA space biology research papers with AI-powered insights tailored to your needs.",
            theme.muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("Get Started:", theme.title_style())),
    ];
    for (i, (title, text)) in TABS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", i + 1), theme.accent_style()),
            Span::styled(*title, theme.accent_style().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::raw(format!("    {}", text))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Pro Tip: ", theme.warning_style().add_modifier(Modifier::BOLD)),
        Span::raw(
            "Switch between personas (Scientist, Investor, Architect) with [p] to get tailored insights for your role!",
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            "[Enter] Got it, let's explore!",
            theme.selected_style().fg(theme.accent),
        ))
        .alignment(Alignment::Center),
    );

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn test_render_quick_start() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_quick_start(frame, frame.area(), &theme))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Gap Analysis Tab"));
        assert!(text.contains("Got it, let's explore!"));
    }

    #[test]
    fn test_render_quick_start_small_terminal() {
        let backend = ratatui::backend::TestBackend::new(30, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::light();
        terminal
            .draw(|frame| render_quick_start(frame, frame.area(), &theme))
            .unwrap();
    }
}
