//! Popup shown when no clipboard backend accepted a citation.

use crate::tui::theme::Theme;
use crate::tui::widgets::centered_rect;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render_manual_copy(frame: &mut Frame, area: Rect, citation: &str, theme: &Theme) {
    let popup = centered_rect(76, 10, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.warning_style())
        .title(Span::styled(" Copy Citation ", theme.title_style()))
        .style(theme.panel_style());
    let lines = vec![
        Line::from(Span::styled(
            "Clipboard unavailable. Select and copy the citation below:",
            theme.warning_style(),
        )),
        Line::from(""),
        Line::from(Span::raw(citation.to_string())),
        Line::from(""),
        Line::from(Span::styled("[Esc] Close", theme.muted_style())),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
