//! Header bar widget showing the title, database stats, and the active persona.

use crate::tui::theme::Theme;
use crate::tui::widgets::format_count;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use spacebio_core::personas;
use spacebio_core::{DatabaseStats, Persona};

/// Data needed to render the header bar.
#[derive(Debug, Clone, Default)]
pub struct HeaderData {
    pub persona: Persona,
    /// `None` until the first stats response arrives.
    pub stats: Option<DatabaseStats>,
}

/// The stats widget text, e.g. `608 papers │ 18,240 vectors │ 12.0% indexed`.
pub fn stats_display(stats: &DatabaseStats) -> String {
    format!(
        "{} papers │ {} vectors │ {:.1}% indexed",
        stats.total_papers,
        format_count(stats.total_vectors),
        stats.index_fullness_percent()
    )
}

/// Render the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, data: &HeaderData, theme: &Theme) {
    let profile = personas::profile(data.persona);
    let persona_label = format!(" {} ▾ [p] ", profile.name);
    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(persona_label.chars().count() as u16),
    ])
    .areas(area);

    let mut spans = vec![
        Span::styled(
            " ● ",
            theme.header_style().fg(theme.highlight).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Space Biology Knowledge Engine",
            theme.header_style().add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(stats) = &data.stats {
        spans.push(Span::styled(" │ ", theme.header_style().fg(theme.accent)));
        spans.push(Span::styled(stats_display(stats), theme.header_style()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.header_style()),
        left,
    );

    let badge = Paragraph::new(Span::styled(
        persona_label,
        theme
            .header_style()
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right)
    .style(theme.header_style());
    frame.render_widget(badge, right);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn test_stats_display() {
        let stats = DatabaseStats {
            total_papers: 608,
            total_vectors: 18_240,
            index_fullness: 0.12,
        };
        assert_eq!(stats_display(&stats), "608 papers │ 18,240 vectors │ 12.0% indexed");
    }

    #[test]
    fn test_zeroed_stats_display() {
        assert_eq!(
            stats_display(&DatabaseStats::zeroed()),
            "0 papers │ 0 vectors │ 0.0% indexed"
        );
    }

    #[test]
    fn test_render_header_shows_persona_and_stats() {
        let backend = ratatui::backend::TestBackend::new(120, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let data = HeaderData {
            persona: Persona::Investor,
            stats: Some(DatabaseStats {
                total_papers: 608,
                total_vectors: 1200,
                index_fullness: 0.5,
            }),
        };
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                render_header(frame, frame.area(), &data, &theme);
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Investment Manager"));
        assert!(text.contains("608 papers"));
    }

    #[test]
    fn test_render_header_without_stats() {
        let backend = ratatui::backend::TestBackend::new(40, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                render_header(frame, frame.area(), &HeaderData::default(), &theme);
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(!text.contains("papers"));
    }
}
