//! Paper detail drawer: metadata, organisms, persona summary, and actions.

use crate::tui::theme::Theme;
use crate::tui::widgets::results_list::meta_line;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use spacebio_core::drawer::SUMMARY_FAILED_MESSAGE;
use spacebio_core::personas;
use spacebio_core::results::{self, MatchLabel};
use spacebio_core::{DetailDrawer, SummaryState};

/// Render the drawer over the right-hand side of `area`. No-op when closed.
pub fn render_detail_drawer(
    frame: &mut Frame,
    area: Rect,
    drawer: &DetailDrawer,
    finding_similar: bool,
    scroll: u16,
    theme: &Theme,
) {
    let Some(result) = drawer.result() else {
        return;
    };
    let [_, drawer_area] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(area);
    frame.render_widget(Clear, drawer_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.pane_border_style(true))
        .title(Span::styled(" Paper Details ", theme.title_style()))
        .style(theme.panel_style());
    let inner = block.inner(drawer_area);
    frame.render_widget(block, drawer_area);

    let [body_area, actions_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(inner);

    let label = MatchLabel::from_score(result.score);
    let section_style = theme.accent_style().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            results::display_title(result),
            theme.title_style(),
        )),
        Line::from(Span::styled(meta_line(result), theme.muted_style())),
        Line::from(Span::styled(
            format!("{} {}", results::score_percent(result.score), label),
            ratatui::style::Style::default().fg(theme.match_label_color(label)),
        )),
        Line::from(""),
    ];

    if drawer.shows_organisms() {
        lines.push(Line::from(Span::styled("Organisms Studied", section_style)));
        lines.push(Line::from(Span::raw(format!(
            "  {}",
            result.metadata.organisms.join(" • ")
        ))));
        lines.push(Line::from(""));
    }

    let profile = personas::profile(drawer.persona());
    lines.push(Line::from(Span::styled(
        format!("AI Summary for {}", profile.name),
        section_style,
    )));
    match drawer.summary() {
        SummaryState::Idle => {}
        SummaryState::Loading => lines.push(Line::from(Span::styled(
            "Generating summary...",
            theme.muted_style(),
        ))),
        SummaryState::Ready {
            summary,
            key_points,
        } => {
            lines.push(Line::from(Span::raw(summary.clone())));
            if !key_points.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Key Points", theme.title_style())));
                for point in key_points {
                    lines.push(Line::from(vec![
                        Span::styled("  • ", theme.accent_style()),
                        Span::raw(point.clone()),
                    ]));
                }
            }
        }
        SummaryState::Failed => {
            lines.push(Line::from(Span::styled(SUMMARY_FAILED_MESSAGE, theme.error_style())));
            lines.push(Line::from(Span::styled("[r] Retry", theme.warning_style())));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Excerpt", section_style)));
    lines.push(Line::from(Span::raw(results::excerpt(result).to_string())));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        body_area,
    );

    let similar = if finding_similar {
        Span::styled("Finding similar papers...", theme.muted_style())
    } else {
        Span::styled("[s] Find similar papers", theme.accent_style())
    };
    let actions = Line::from(vec![
        similar,
        Span::styled(" │ ", theme.border_style()),
        Span::styled("[c] Export citation", theme.accent_style()),
        Span::styled(" │ ", theme.border_style()),
        Span::styled("[Esc] Close", theme.muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(vec![Line::from(""), actions]),
        actions_area,
    );
}
