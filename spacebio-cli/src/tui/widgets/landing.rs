//! Landing screen: pick the persona to explore with.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use spacebio_core::personas;

/// Render the landing screen with the persona at `selected` highlighted.
pub fn render_landing(frame: &mut Frame, area: Rect, selected: usize, theme: &Theme) {
    frame.render_widget(Block::default().style(theme.base_style()), area);

    let [_, title_area, cards_area, footer_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let title = vec![
        Line::from(Span::styled(
            "NASA Space Biology",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Knowledge Engine", theme.title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Explore 608 space biology research papers with AI-powered insights",
            theme.muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("Choose your role", theme.title_style())),
    ];
    frame.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        title_area,
    );

    let [_, cards, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(96),
        Constraint::Fill(1),
    ])
    .areas(cards_area);
    let card_areas: [Rect; 3] = Layout::horizontal([Constraint::Ratio(1, 3); 3])
        .spacing(1)
        .areas(cards);

    for (i, (profile, card)) in personas::all_profiles()
        .iter()
        .zip(card_areas)
        .enumerate()
    {
        let is_selected = i == selected;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(theme.pane_border_style(is_selected))
            .title(format!(" {} ", i + 1));
        let name_style = if is_selected {
            theme.accent_style().add_modifier(Modifier::BOLD)
        } else {
            theme.title_style()
        };
        let body = vec![
            Line::from(Span::styled(profile.name, name_style)),
            Line::from(""),
            Line::from(Span::styled(profile.description, theme.muted_style())),
        ];
        frame.render_widget(
            Paragraph::new(body)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            card,
        );
    }

    let footer = vec![
        Line::from(Span::styled(
            "↑/↓ or 1-3 select │ Enter continue │ Esc quit",
            theme.muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "NASA Space Apps Challenge 2025",
            theme.muted_style(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(footer).alignment(Alignment::Center),
        footer_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn test_render_landing_lists_personas() {
        let backend = ratatui::backend::TestBackend::new(110, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_landing(frame, frame.area(), 1, &theme))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Choose your role"));
        assert!(text.contains("Scientist"));
        assert!(text.contains("Investment Manager"));
        assert!(text.contains("Mission Architect"));
    }

    #[test]
    fn test_render_landing_tiny_terminal() {
        let backend = ratatui::backend::TestBackend::new(20, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::light();
        terminal
            .draw(|frame| render_landing(frame, frame.area(), 0, &theme))
            .unwrap();
    }
}
