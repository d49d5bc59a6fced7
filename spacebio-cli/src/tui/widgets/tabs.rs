//! Tab bar for the main screen.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Trends,
    Gaps,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Search, Tab::Trends, Tab::Gaps];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Trends => "Trends",
            Tab::Gaps => "Gap Analysis",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Search => 0,
            Tab::Trends => 1,
            Tab::Gaps => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Render the tab bar with `active` selected.
pub fn render_tabs(frame: &mut Frame, area: Rect, active: Tab, theme: &Theme) {
    let titles = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} {} ", tab.index() + 1, tab.title())));
    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(theme.muted_style())
        .highlight_style(theme.accent_style().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme.border_style()),
        );
    frame.render_widget(tabs, area);
}
