//! Terminal research dashboard.
//!
//! Role selection, semantic search with filters and a paper detail drawer,
//! plus the trends and gap analysis tabs.

pub mod app;
pub mod event;
pub mod tasks;
pub mod theme;
pub mod widgets;

use crate::context::AppContext;
use app::App;

/// Run the dashboard until the user quits.
pub async fn run(ctx: AppContext) -> anyhow::Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture,
        crossterm::event::EnableBracketedPaste
    )?;

    let backend = ratatui::backend::CrosstermBackend::new(std::io::stdout());
    let mut terminal = ratatui::Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(ctx);
    let result = app.run(&mut terminal).await;

    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}
