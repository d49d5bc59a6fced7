//! Filter panel widget: year, organisms, section, and clear-all.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use spacebio_core::{FilterPanel, FilterRow, SearchFilters};

/// Label of the year selector.
pub fn year_label(filters: &SearchFilters) -> String {
    filters
        .year
        .map_or_else(|| "All years".to_string(), |y| y.to_string())
}

/// Label of the section selector.
pub fn section_label(filters: &SearchFilters) -> String {
    filters
        .section
        .clone()
        .unwrap_or_else(|| "All sections".to_string())
}

pub fn render_filter_panel(
    frame: &mut Frame,
    area: Rect,
    panel: &FilterPanel,
    filters: &SearchFilters,
    focused: bool,
    theme: &Theme,
) {
    let active = FilterPanel::has_active_filters(filters);
    let title = if active { " Filters ● [f] " } else { " Filters [f] " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.pane_border_style(focused))
        .title(Span::styled(title, theme.title_style()));

    if !panel.is_loaded() {
        frame.render_widget(
            Paragraph::new(Span::styled("Loading filters...", theme.muted_style())).block(block),
            area,
        );
        return;
    }

    let cursor = focused.then(|| panel.cursor_row());
    let row_style = |row: FilterRow| {
        if cursor == Some(row) {
            theme.selected_style().fg(theme.accent)
        } else {
            Style::default().fg(theme.fg)
        }
    };

    let mut lines = vec![Line::from(Span::styled("Year", theme.muted_style()))];
    let year_text = if panel.years().is_empty() {
        "No years available".to_string()
    } else {
        format!("‹ {} ›", year_label(filters))
    };
    lines.push(Line::from(Span::styled(
        format!("  {}", year_text),
        row_style(FilterRow::Year),
    )));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Organisms", theme.muted_style())));
    if panel.organisms().is_empty() {
        lines.push(Line::from(Span::styled(
            "  No organisms available",
            theme.muted_style(),
        )));
    }
    for (i, organism) in panel.visible_organisms().iter().enumerate() {
        let checked = filters.has_organism(organism);
        let mark = if checked { "[x]" } else { "[ ]" };
        let mut style = row_style(FilterRow::Organism(i));
        if checked {
            style = style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            format!("  {} {}", mark, organism),
            style,
        )));
    }
    let hidden = panel.organisms().len() - panel.visible_organisms().len();
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("  +{} more", hidden),
            theme.muted_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Section", theme.muted_style())));
    let section_text = if panel.sections().is_empty() {
        "No sections available".to_string()
    } else {
        format!("‹ {} ›", section_label(filters))
    };
    lines.push(Line::from(Span::styled(
        format!("  {}", section_text),
        row_style(FilterRow::Section),
    )));

    lines.push(Line::from(""));
    let clear_style = if active {
        row_style(FilterRow::ClearAll).fg(theme.warning_fg)
    } else {
        row_style(FilterRow::ClearAll).fg(theme.muted_fg)
    };
    lines.push(Line::from(Span::styled("  Clear all filters", clear_style)));

    // Keep the cursor row visible in short panes.
    let cursor_line = match cursor {
        Some(FilterRow::Year) | None => 0,
        Some(FilterRow::Organism(i)) => 4 + i,
        Some(FilterRow::Section) | Some(FilterRow::ClearAll) => lines.len(),
    };
    let visible = block.inner(area).height as usize;
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(1)) as u16;

    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}
