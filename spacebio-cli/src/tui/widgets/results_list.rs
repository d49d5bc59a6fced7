//! Results list widget: ranked result cards with match labels.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use spacebio_core::SearchResult;
use spacebio_core::results::{self, MatchLabel};

/// What the list pane should show besides the results themselves.
#[derive(Debug, Clone, Copy)]
pub struct ResultsView<'a> {
    pub results: &'a [SearchResult],
    pub selected: usize,
    pub loading: bool,
    pub has_searched: bool,
    pub focused: bool,
}

/// Meta line for a card, e.g. `2016 · results · p. 3 · Mouse, Rat`.
pub fn meta_line(result: &SearchResult) -> String {
    let meta = &result.metadata;
    let mut parts = Vec::new();
    if let Some(year) = meta.year {
        parts.push(year.to_string());
    }
    if let Some(section) = meta.section() {
        parts.push(section.to_string());
    }
    parts.push(format!("p. {}", meta.page));
    if !meta.organisms.is_empty() {
        parts.push(meta.organisms.join(", "));
    }
    parts.join(" · ")
}

pub fn render_results_list(frame: &mut Frame, area: Rect, view: &ResultsView<'_>, theme: &Theme) {
    let title = if view.results.is_empty() {
        " Results ".to_string()
    } else {
        format!(" Found {} results ", view.results.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.pane_border_style(view.focused))
        .title(Span::styled(title, theme.title_style()));

    if view.loading && view.results.is_empty() {
        render_message(frame, area, block, vec![Line::from(Span::styled(
            "Searching...",
            theme.accent_style(),
        ))]);
        return;
    }
    if view.results.is_empty() {
        let lines = if view.has_searched {
            vec![
                Line::from(Span::styled(results::EMPTY_RESULTS_TITLE, theme.title_style())),
                Line::from(Span::styled(results::EMPTY_RESULTS_HINT, theme.muted_style())),
            ]
        } else {
            vec![Line::from(Span::styled(
                results::NOT_SEARCHED_HINT,
                theme.muted_style(),
            ))]
        };
        render_message(frame, area, block, lines);
        return;
    }

    let width = block.inner(area).width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = view
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| result_item(i, result, width, theme))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected_style())
        .highlight_symbol("▌ ");
    let mut state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_message(frame: &mut Frame, area: Rect, block: Block<'_>, lines: Vec<Line<'_>>) {
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn result_item<'a>(index: usize, result: &'a SearchResult, width: usize, theme: &Theme) -> ListItem<'a> {
    let label = MatchLabel::from_score(result.score);
    let header = Line::from(vec![
        Span::styled(format!("{:>2}. ", index + 1), theme.muted_style()),
        Span::styled(
            results::display_title(result),
            theme.title_style(),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} {}",
                results::score_percent(result.score),
                label
            ),
            ratatui::style::Style::default()
                .fg(theme.match_label_color(label))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let meta = Line::from(Span::styled(
        format!("    {}", meta_line(result)),
        theme.muted_style(),
    ));
    let preview = Line::from(Span::raw(format!(
        "    {}",
        results::preview(result, width.max(20))
    )));
    ListItem::new(Text::from(vec![header, meta, preview, Line::from("")]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;
    use spacebio_core::api::mock::sample_result;

    fn draw(view: &ResultsView<'_>) -> String {
        let backend = ratatui::backend::TestBackend::new(90, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_results_list(frame, frame.area(), view, &theme))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_meta_line() {
        let result = sample_result("a", "Doc", 0.7, Some(2016), &["Mouse", "Rat"], Some("results"), "t");
        assert_eq!(meta_line(&result), "2016 · results · p. 1 · Mouse, Rat");
        let bare = sample_result("b", "Doc", 0.7, None, &[], None, "");
        assert_eq!(meta_line(&bare), "p. 1");
    }

    #[test]
    fn test_render_not_searched_hint() {
        let text = draw(&ResultsView {
            results: &[],
            selected: 0,
            loading: false,
            has_searched: false,
            focused: false,
        });
        assert!(text.contains("Enter a search query"));
    }

    #[test]
    fn test_render_empty_results() {
        let text = draw(&ResultsView {
            results: &[],
            selected: 0,
            loading: false,
            has_searched: true,
            focused: false,
        });
        assert!(text.contains("No results found"));
        assert!(text.contains("Try adjusting your search query or filters"));
    }

    #[test]
    fn test_render_cards_with_labels() {
        let results = vec![
            sample_result("a", "Rodent-Study", 0.71, Some(2016), &["Mouse"], None, "Mice lost mass."),
            sample_result("b", "Plant-Study", 0.62, None, &[], None, ""),
            sample_result("c", "Fly-Study", 0.55, None, &[], None, "Flies."),
        ];
        let text = draw(&ResultsView {
            results: &results,
            selected: 1,
            loading: false,
            has_searched: true,
            focused: true,
        });
        assert!(text.contains("Found 3 results"));
        assert!(text.contains("71.0% Excellent Match"));
        assert!(text.contains("62.0% Good Match"));
        assert!(text.contains("No text excerpt available"));
    }
}
