//! Trends view: velocity, yearly output, top organisms and topics, and the
//! optional analytics blocks.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use spacebio_core::Loadable;
use spacebio_core::trends::{ChartPoint, TrendsReport};
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: usize = 26;

/// Bar length for `value` against `max`, in cells.
pub fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    (((value / max) * width as f64).round() as usize).clamp(1, width)
}

/// Pad or cut `label` to exactly `width` display cells.
pub fn fit_label(label: &str, width: usize) -> String {
    if label.width() <= width {
        return format!("{}{}", label, " ".repeat(width - label.width()));
    }
    let mut out = String::new();
    for ch in label.chars() {
        if out.width() + 2 > width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    format!("{}{}", out, " ".repeat(width.saturating_sub(out.width())))
}

pub(crate) fn bar_chart_lines(
    points: &[ChartPoint],
    bar_width: usize,
    color: ratatui::style::Color,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let max = points.iter().map(|p| p.value).fold(0.0, f64::max);
    points
        .iter()
        .map(|point| {
            Line::from(vec![
                Span::styled(
                    format!("  {} ", fit_label(&point.label, LABEL_WIDTH)),
                    theme.muted_style(),
                ),
                Span::styled(
                    "█".repeat(bar_len(point.value, max, bar_width)),
                    Style::default().fg(color),
                ),
                Span::raw(format!(" {}", point.value)),
            ])
        })
        .collect()
}

fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        theme.accent_style().add_modifier(Modifier::BOLD),
    ))
}

/// All lines of the trends report, top to bottom.
pub fn trends_lines(report: &TrendsReport, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let bar_width = (width as usize).saturating_sub(LABEL_WIDTH + 14).max(4);
    let mut lines = Vec::new();

    if let Some(temporal) = &report.temporal {
        lines.push(heading("Research Velocity", theme));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{:+.1}%", temporal.growth_rate),
                Style::default()
                    .fg(theme.growth_color(temporal.growth_rate))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" growth ({})", temporal.trend), theme.muted_style()),
            Span::raw(format!(
                "  │  peak {} with {} papers",
                temporal.peak_year, temporal.peak_papers
            )),
        ]));
        lines.push(Line::from(""));
    }

    for (title, points, color) in [
        ("Research by Year", &report.by_year, theme.accent),
        ("Top Organisms Studied", &report.top_organisms, theme.highlight),
        ("Top Research Topics", &report.top_topics, theme.info_fg),
    ] {
        if points.is_empty() {
            continue;
        }
        lines.push(heading(title, theme));
        lines.extend(bar_chart_lines(points, bar_width, color, theme));
        lines.push(Line::from(""));
    }

    if !report.emerging_areas.is_empty() {
        lines.push(heading("Emerging Research Areas", theme));
        for area in &report.emerging_areas {
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", fit_label(&area.topic, LABEL_WIDTH))),
                Span::styled(
                    format!("{:+.0}%", area.growth_rate),
                    Style::default().fg(theme.growth_color(area.growth_rate)),
                ),
                Span::styled(
                    format!(
                        "  {} recent of {} papers",
                        area.recent_papers, area.total_papers
                    ),
                    theme.muted_style(),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !report.organism_trends.is_empty() {
        lines.push(heading("Organism Research Velocity", theme));
        for series in &report.organism_trends {
            let sparkline: String = {
                let max = series.points.iter().map(|p| p.value).fold(0.0, f64::max);
                series
                    .points
                    .iter()
                    .map(|p| spark_char(p.value, max))
                    .collect()
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", fit_label(&series.organism, LABEL_WIDTH))),
                Span::styled(
                    format!("{:+.0}%", series.velocity),
                    Style::default().fg(theme.growth_color(series.velocity)),
                ),
                Span::styled(
                    format!(" {} · {} papers ", series.status, series.total_papers),
                    theme.muted_style(),
                ),
                Span::styled(sparkline, theme.accent_style()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !report.collaboration_network.is_empty() {
        lines.push(heading("Cross-Organism Research Connections", theme));
        for link in &report.collaboration_network {
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ↔ {}", link.organism1, link.organism2)),
                Span::styled(
                    format!("  {} shared papers", link.co_occurrences),
                    theme.muted_style(),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !report.topic_evolution.is_empty() {
        lines.push(heading("Topic Evolution Timeline", theme));
        for topic in &report.topic_evolution {
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", fit_label(&topic.topic, LABEL_WIDTH))),
                Span::styled(
                    format!("{}–{}", topic.first_seen, topic.last_seen),
                    theme.muted_style(),
                ),
                Span::raw(format!("  momentum {:.2}", topic.recent_momentum)),
            ]));
        }
    }

    lines
}

fn spark_char(value: f64, max: f64) -> char {
    const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    if max <= 0.0 {
        return LEVELS[0];
    }
    let idx = ((value / max) * (LEVELS.len() - 1) as f64).round() as usize;
    LEVELS[idx.min(LEVELS.len() - 1)]
}

pub fn render_trends_view(
    frame: &mut Frame,
    area: Rect,
    state: &Loadable<TrendsReport>,
    scroll: u16,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(" Research Trends ", theme.title_style()));
    let inner_width = block.inner(area).width;

    let paragraph = match state {
        Loadable::NotStarted | Loadable::Loading => {
            Paragraph::new(Span::styled("Loading trends...", theme.muted_style()))
                .alignment(Alignment::Center)
        }
        Loadable::Failed(message) => {
            Paragraph::new(Span::styled(message.clone(), theme.error_style()))
                .alignment(Alignment::Center)
        }
        Loadable::Ready(report) if report.is_empty() => {
            Paragraph::new(Span::styled("No trend data available", theme.muted_style()))
                .alignment(Alignment::Center)
        }
        Loadable::Ready(report) => {
            Paragraph::new(trends_lines(report, inner_width, theme)).scroll((scroll, 0))
        }
    };
    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;
    use spacebio_core::TrendsData;

    #[test]
    fn test_bar_len() {
        assert_eq!(bar_len(50.0, 100.0, 20), 10);
        assert_eq!(bar_len(100.0, 100.0, 20), 20);
        assert_eq!(bar_len(0.0, 100.0, 20), 0);
        assert_eq!(bar_len(0.1, 100.0, 20), 1);
        assert_eq!(bar_len(5.0, 0.0, 20), 0);
    }

    #[test]
    fn test_fit_label() {
        assert_eq!(fit_label("Mouse", 8), "Mouse   ");
        let cut = fit_label("Drosophila melanogaster", 10);
        assert_eq!(cut.width(), 10);
        assert!(cut.contains('…'));
    }

    #[test]
    fn test_spark_char_bounds() {
        assert_eq!(spark_char(0.0, 0.0), '▁');
        assert_eq!(spark_char(10.0, 10.0), '█');
    }

    fn draw(state: &Loadable<TrendsReport>) -> String {
        let backend = ratatui::backend::TestBackend::new(100, 60);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_trends_view(frame, frame.area(), state, 0, &theme))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_render_states() {
        assert!(draw(&Loadable::Loading).contains("Loading trends..."));
        assert!(
            draw(&Loadable::Failed("Failed to load trends data.".into()))
                .contains("Failed to load trends data.")
        );
        assert!(
            draw(&Loadable::Ready(TrendsReport::from_data(&TrendsData::default())))
                .contains("No trend data available")
        );
    }

    #[tokio::test]
    async fn test_render_demo_report() {
        use spacebio_core::PaperApi;
        let api = spacebio_core::MockPaperApi::demo();
        let report = TrendsReport::from_data(&api.trends().await.unwrap());
        let text = draw(&Loadable::Ready(report));
        assert!(text.contains("Research by Year"));
        assert!(text.contains("Top Organisms Studied"));
        assert!(text.contains("Emerging Research Areas"));
    }
}
