//! Gap analysis view.

use crate::tui::theme::Theme;
use crate::tui::widgets::trends_view::{bar_len, fit_label};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use spacebio_core::{GapsReport, Loadable};

const AREA_WIDTH: usize = 28;
const SEVERITY_BAR: usize = 20;

pub fn gaps_lines(report: &GapsReport, theme: &Theme) -> Vec<Line<'static>> {
    let heading = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            theme.accent_style().add_modifier(Modifier::BOLD),
        ))
    };
    let mut lines = Vec::new();

    for section in &report.sections {
        lines.push(heading(section.title));
        lines.push(Line::from(Span::styled(
            section.caption.to_string(),
            theme.muted_style().add_modifier(Modifier::ITALIC),
        )));
        for item in &section.items {
            lines.push(Line::from(vec![
                Span::styled("  • ", theme.accent_style()),
                Span::raw(item.clone()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !report.scored_gaps.is_empty() {
        lines.push(heading("Gap Severity"));
        for gap in &report.scored_gaps {
            let severity_color = if gap.severity_score >= 0.8 {
                theme.error_fg
            } else if gap.severity_score >= 0.5 {
                theme.warning_fg
            } else {
                theme.muted_fg
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", fit_label(&gap.area, AREA_WIDTH))),
                Span::styled(
                    format!(
                        "{:<width$}",
                        "█".repeat(bar_len(gap.severity_score, 1.0, SEVERITY_BAR)),
                        width = SEVERITY_BAR
                    ),
                    Style::default().fg(severity_color),
                ),
                Span::raw(format!(" {:.2}", gap.severity_score)),
                Span::styled(
                    format!("  {} papers · {}", gap.paper_count, gap.reason),
                    theme.muted_style(),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    if let Some(coverage) = &report.coverage {
        lines.push(heading("Organism × Condition Coverage"));
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:.1}%", coverage.coverage_percentage),
                theme.title_style(),
            ),
            Span::styled(
                format!(
                    " of combinations studied ({}/{})",
                    coverage.studied_combinations, coverage.total_combinations
                ),
                theme.muted_style(),
            ),
        ]));
        for gap in &report.combination_gaps {
            lines.push(Line::from(vec![
                Span::raw(format!("  {} × {}", gap.organism, gap.condition)),
                Span::styled(format!("  {}", gap.status), theme.warning_style()),
            ]));
        }
    }

    lines
}

pub fn render_gaps_view(
    frame: &mut Frame,
    area: Rect,
    state: &Loadable<GapsReport>,
    scroll: u16,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(" Research Gap Analysis ", theme.title_style()));

    let paragraph = match state {
        Loadable::NotStarted | Loadable::Loading => {
            Paragraph::new(Span::styled("Analyzing research gaps...", theme.muted_style()))
                .alignment(Alignment::Center)
        }
        Loadable::Failed(message) => {
            Paragraph::new(Span::styled(message.clone(), theme.error_style()))
                .alignment(Alignment::Center)
        }
        Loadable::Ready(report) if report.is_empty() => {
            Paragraph::new(Span::styled("No research gaps reported", theme.muted_style()))
                .alignment(Alignment::Center)
        }
        Loadable::Ready(report) => Paragraph::new(gaps_lines(report, theme))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
    };
    frame.render_widget(paragraph.block(block), area);
}
