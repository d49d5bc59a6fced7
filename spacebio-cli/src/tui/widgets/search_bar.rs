//! Search input wrapping tui-textarea, plus the persona sample queries.

use crate::tui::theme::Theme;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use spacebio_core::personas::PersonaProfile;
use tui_textarea::TextArea;

const PLACEHOLDER: &str = "Ask anything about space biology research...";

/// Single-line query input.
pub struct SearchBar {
    textarea: TextArea<'static>,
}

/// Result of processing an input event.
#[derive(Debug, PartialEq)]
pub enum SearchInput {
    /// Enter with a non-blank query.
    Submit(String),
    /// Input was consumed by the textarea.
    Consumed,
    /// Input was not consumed (pass to the app).
    NotConsumed,
}

impl SearchBar {
    pub fn new(theme: &Theme) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_style(Style::default().fg(theme.fg));
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_placeholder_style(theme.muted_style());
        Self { textarea }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|l| l.is_empty())
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    /// Replace the query text, e.g. with a sample query.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.textarea.insert_str(text);
    }

    /// Process a crossterm event while the bar has focus.
    pub fn handle_event(&mut self, event: &Event) -> SearchInput {
        let Event::Key(key) = event else {
            if let Event::Paste(text) = event {
                self.textarea.insert_str(text.replace(['\r', '\n'], " "));
                return SearchInput::Consumed;
            }
            return SearchInput::NotConsumed;
        };
        match key {
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => {
                let text = self.text();
                let text = text.trim();
                if text.is_empty() {
                    SearchInput::Consumed
                } else {
                    SearchInput::Submit(text.to_string())
                }
            }
            KeyEvent {
                code: KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down,
                ..
            } => SearchInput::NotConsumed,
            KeyEvent {
                code: KeyCode::Char('m' | 'j'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => SearchInput::Consumed,
            _ => {
                self.textarea.input(event.clone());
                SearchInput::Consumed
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, loading: bool, theme: &Theme) {
        let title = if loading { " Searching... " } else { " Search [/] " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.pane_border_style(focused))
            .title(Span::styled(title, theme.title_style()));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(&self.textarea, inner);
    }
}

/// Render the four sample queries of the active persona.
pub fn render_sample_queries(
    frame: &mut Frame,
    area: Rect,
    profile: &PersonaProfile,
    selected: Option<usize>,
    theme: &Theme,
) {
    let mut lines = vec![Line::from(Span::styled(
        format!("Try these {} queries", profile.name),
        theme.muted_style().add_modifier(Modifier::ITALIC),
    ))];
    for (i, query) in profile.sample_queries.iter().enumerate() {
        let style = if selected == Some(i) {
            theme.selected_style().fg(theme.accent)
        } else {
            Style::default().fg(theme.fg)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" Ctrl+{} ", i + 1), theme.accent_style()),
            Span::styled(*query, style),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
