//! Dismissable error banner.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render_banner(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let style = theme.error_style().bg(theme.panel_bg);
    let line = Line::from(vec![
        Span::styled(" ⚠ ", style),
        Span::styled(message.to_string(), style),
        Span::styled("  [x] dismiss", theme.muted_style().bg(theme.panel_bg)),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme.panel_style()), area);
}
