//! Terminal event handling using crossterm EventStream.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;

/// High-level actions the TUI can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Esc: close the innermost overlay or leave the current pane.
    Back,
    NextTab,
    PrevTab,
    SelectTab(usize),
    SelectPersona(usize),
    CyclePersona,
    ToLanding,
    FocusQuery,
    FocusFilters,
    ToggleHelp,
    DismissBanner,
    SampleQuery(usize),
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    Activate,
    FindSimilar,
    ExportCitation,
    RetrySummary,
}

/// Reads terminal events asynchronously using crossterm's EventStream.
pub struct EventHandler {
    stream: EventStream,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }

    /// Read the next terminal event. Returns None if the stream ends.
    pub async fn next(&mut self) -> Option<Event> {
        self.stream.next().await.and_then(|r| r.ok())
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys that work everywhere, including while typing a query.
pub fn map_global_key(event: &KeyEvent) -> Option<Action> {
    match (event.modifiers, event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (_, KeyCode::F(1)) => Some(Action::ToggleHelp),
        (m, KeyCode::Char(c @ '1'..='4'))
            if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Action::SampleQuery(c as usize - '1' as usize))
        }
        _ => None,
    }
}

/// Keys on the persona picker.
pub fn map_landing_key(event: &KeyEvent) -> Option<Action> {
    match event.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Char(c @ '1'..='3') => Some(Action::SelectPersona(c as usize - '1' as usize)),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Keys on the main screen while no text input has focus.
pub fn map_main_key(event: &KeyEvent) -> Option<Action> {
    match event.code {
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PrevTab),
        KeyCode::Char(c @ '1'..='3') => Some(Action::SelectTab(c as usize - '1' as usize)),
        KeyCode::Char('p') => Some(Action::CyclePersona),
        KeyCode::Char('b') => Some(Action::ToLanding),
        KeyCode::Char('/') | KeyCode::Char('i') => Some(Action::FocusQuery),
        KeyCode::Char('f') => Some(Action::FocusFilters),
        KeyCode::Char('x') => Some(Action::DismissBanner),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    }
}

/// Keys while the paper detail drawer is open.
pub fn map_drawer_key(event: &KeyEvent) -> Option<Action> {
    match event.code {
        KeyCode::Char('s') => Some(Action::FindSimilar),
        KeyCode::Char('c') => Some(Action::ExportCitation),
        KeyCode::Char('r') => Some(Action::RetrySummary),
        KeyCode::Char('p') => Some(Action::CyclePersona),
        KeyCode::Char('x') => Some(Action::DismissBanner),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Back),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_ctrl_c_quits() {
        assert_eq!(map_global_key(&ctrl(KeyCode::Char('c'))), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_digit_picks_sample_query() {
        assert_eq!(
            map_global_key(&ctrl(KeyCode::Char('1'))),
            Some(Action::SampleQuery(0))
        );
        let alt = KeyEvent::new(KeyCode::Char('4'), KeyModifiers::ALT);
        assert_eq!(map_global_key(&alt), Some(Action::SampleQuery(3)));
        assert_eq!(map_global_key(&ctrl(KeyCode::Char('5'))), None);
    }

    #[test]
    fn test_plain_digit_not_global() {
        assert_eq!(map_global_key(&key(KeyCode::Char('1'))), None);
    }

    #[test]
    fn test_landing_keys() {
        assert_eq!(
            map_landing_key(&key(KeyCode::Char('2'))),
            Some(Action::SelectPersona(1))
        );
        assert_eq!(map_landing_key(&key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(map_landing_key(&key(KeyCode::Enter)), Some(Action::Activate));
        assert_eq!(map_landing_key(&key(KeyCode::Char('4'))), None);
    }

    #[test]
    fn test_main_keys() {
        assert_eq!(map_main_key(&key(KeyCode::Tab)), Some(Action::NextTab));
        assert_eq!(map_main_key(&key(KeyCode::Char('3'))), Some(Action::SelectTab(2)));
        assert_eq!(map_main_key(&key(KeyCode::Char('x'))), Some(Action::DismissBanner));
        assert_eq!(map_main_key(&key(KeyCode::Char('f'))), Some(Action::FocusFilters));
        assert_eq!(map_main_key(&key(KeyCode::Char('b'))), Some(Action::ToLanding));
        assert_eq!(map_main_key(&key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_drawer_keys() {
        assert_eq!(map_drawer_key(&key(KeyCode::Char('s'))), Some(Action::FindSimilar));
        assert_eq!(map_drawer_key(&key(KeyCode::Char('c'))), Some(Action::ExportCitation));
        assert_eq!(map_drawer_key(&key(KeyCode::Char('r'))), Some(Action::RetrySummary));
        assert_eq!(map_drawer_key(&key(KeyCode::Esc)), Some(Action::Back));
        assert_eq!(map_drawer_key(&key(KeyCode::Tab)), None);
    }
}
