//! Main TUI application: state, event loop, and top-level draw function.

use crate::clipboard;
use crate::context::AppContext;
use crate::tui::event::{
    Action, EventHandler, map_drawer_key, map_global_key, map_landing_key, map_main_key,
};
use crate::tui::tasks::{BackendEvent, Dispatcher};
use crate::tui::theme::Theme;
use crate::tui::widgets::banner::render_banner;
use crate::tui::widgets::detail_drawer::render_detail_drawer;
use crate::tui::widgets::filter_panel::render_filter_panel;
use crate::tui::widgets::gaps_view::render_gaps_view;
use crate::tui::widgets::header::{HeaderData, render_header};
use crate::tui::widgets::keys_overlay::{KeysOverlay, render_keys_overlay};
use crate::tui::widgets::landing::render_landing;
use crate::tui::widgets::manual_copy::render_manual_copy;
use crate::tui::widgets::quick_start::render_quick_start;
use crate::tui::widgets::results_list::{ResultsView, render_results_list};
use crate::tui::widgets::search_bar::{SearchBar, SearchInput, render_sample_queries};
use crate::tui::widgets::status_bar::{InputMode, render_status_bar};
use crate::tui::widgets::tabs::{Tab, render_tabs};
use crate::tui::widgets::trends_view::render_trends_view;
use chrono::{DateTime, Local, TimeDelta};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use spacebio_core::personas;
use spacebio_core::similar::{NO_SIMILAR_MESSAGE, SimilarOutcome};
use spacebio_core::{
    Citation, CopyOutcome, DatabaseStats, DetailDrawer, FilterPanel, GapsReport, Loadable,
    OnboardingStore, Persona, ResultsList, SearchFilters, SearchOrchestrator, TrendsReport,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

const SIMILAR_FAILED_MESSAGE: &str = "Failed to find similar papers.";
const PAGE: u16 = 10;
/// Status messages fade after this many seconds.
const STATUS_TTL_SECS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Main,
}

/// Which pane of the search tab receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Samples,
    Filters,
    Results,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    at: DateTime<Local>,
}

/// The main TUI application state.
pub struct App {
    pub theme: Theme,
    pub screen: Screen,
    pub landing_cursor: usize,
    pub persona: Persona,
    pub tab: Tab,
    pub focus: Focus,

    // Search tab
    pub search_bar: SearchBar,
    pub sample_cursor: usize,
    pub search: SearchOrchestrator,
    pub filters: FilterPanel,
    filters_requested: bool,
    pub results: ResultsList,
    pub drawer: DetailDrawer,
    drawer_scroll: u16,
    similar_generation: u64,
    pub finding_similar: bool,

    // Trends and gaps tabs
    pub trends: Loadable<TrendsReport>,
    trends_scroll: u16,
    pub gaps: Loadable<GapsReport>,
    gaps_scroll: u16,

    pub stats: Option<DatabaseStats>,

    // Overlays and messages
    onboarding: Option<OnboardingStore>,
    pub quick_start: bool,
    quick_start_pending: bool,
    pub keys_overlay: KeysOverlay,
    pub notice: Option<String>,
    status: Option<StatusMessage>,
    pub manual_copy: Option<String>,
    copy: fn(&str) -> CopyOutcome,

    dispatcher: Dispatcher,
    backend_rx: mpsc::UnboundedReceiver<BackendEvent>,
    pub should_quit: bool,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let onboarding = OnboardingStore::from_project_dirs();
        Self::with_onboarding(ctx, onboarding)
    }

    /// Build the app with an explicit onboarding store; `None` shows the
    /// quick start once per session.
    pub fn with_onboarding(ctx: AppContext, onboarding: Option<OnboardingStore>) -> Self {
        let theme = Theme::from_name(&ctx.config.ui.theme);
        let (dispatcher, backend_rx) = Dispatcher::new(ctx.api.clone(), ctx.stats.clone());
        let persona = ctx.persona();
        let quick_start_pending = ctx.config.ui.show_quick_start
            && onboarding.as_ref().is_none_or(|store| store.should_show());
        Self {
            search_bar: SearchBar::new(&theme),
            search: SearchOrchestrator::new(ctx.top_k()),
            theme,
            screen: Screen::Landing,
            landing_cursor: Persona::all()
                .iter()
                .position(|p| *p == persona)
                .unwrap_or(0),
            persona,
            tab: Tab::Search,
            focus: Focus::Query,
            sample_cursor: 0,
            filters: FilterPanel::new(),
            filters_requested: false,
            results: ResultsList::new(),
            drawer: DetailDrawer::new(),
            drawer_scroll: 0,
            similar_generation: 0,
            finding_similar: false,
            trends: Loadable::NotStarted,
            trends_scroll: 0,
            gaps: Loadable::NotStarted,
            gaps_scroll: 0,
            stats: ctx.stats.peek(),
            onboarding,
            quick_start: false,
            quick_start_pending,
            keys_overlay: KeysOverlay::new(),
            notice: None,
            status: None,
            manual_copy: None,
            copy: clipboard::copy_text,
            dispatcher,
            backend_rx,
            should_quit: false,
        }
    }

    /// Run the main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_handler = EventHandler::new();
        let tick_rate = std::time::Duration::from_millis(100);

        loop {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                event = event_handler.next() => {
                    match event {
                        Some(event) => self.handle_terminal_event(event),
                        None => self.should_quit = true,
                    }
                }
                event = self.backend_rx.recv() => {
                    if let Some(event) = event {
                        self.handle_backend_event(event);
                    }
                }
                _ = tokio::time::sleep(tick_rate) => {
                    self.tick(Local::now());
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Expire old status messages.
    pub fn tick(&mut self, now: DateTime<Local>) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| now - status.at >= TimeDelta::seconds(STATUS_TTL_SECS))
        {
            self.status = None;
        }
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            at: Local::now(),
        });
    }

    /// The banner shown above the tab content, if any.
    pub fn banner(&self) -> Option<&str> {
        self.notice.as_deref().or_else(|| self.search.error())
    }

    pub fn input_mode(&self) -> InputMode {
        if self.keys_overlay.is_visible() || self.quick_start || self.manual_copy.is_some() {
            return InputMode::Dialog;
        }
        match self.screen {
            Screen::Landing => InputMode::Landing,
            Screen::Main if self.drawer.is_open() => InputMode::Drawer,
            Screen::Main if self.tab != Tab::Search => InputMode::Browse,
            Screen::Main => match self.focus {
                Focus::Query => InputMode::Query,
                Focus::Samples => InputMode::Samples,
                Focus::Filters => InputMode::Filters,
                Focus::Results => InputMode::Results,
            },
        }
    }

    /// Draw the full UI.
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(ratatui::widgets::Block::default().style(self.theme.base_style()), area);

        match self.screen {
            Screen::Landing => {
                let [body, status_area] =
                    Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
                render_landing(frame, body, self.landing_cursor, &self.theme);
                render_status_bar(frame, status_area, self.input_mode(), None, &self.theme);
            }
            Screen::Main => self.draw_main(frame, area),
        }

        render_keys_overlay(frame, area, &self.keys_overlay, &self.theme);
    }

    fn draw_main(&self, frame: &mut Frame, area: Rect) {
        let banner_height = u16::from(self.banner().is_some());
        let [header_area, tabs_area, banner_area, content_area, status_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(banner_height),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .areas(area);

        let header = HeaderData {
            persona: self.persona,
            stats: self.stats,
        };
        render_header(frame, header_area, &header, &self.theme);
        render_tabs(frame, tabs_area, self.tab, &self.theme);
        if let Some(message) = self.banner() {
            render_banner(frame, banner_area, message, &self.theme);
        }

        match self.tab {
            Tab::Search => self.draw_search(frame, content_area),
            Tab::Trends => {
                render_trends_view(frame, content_area, &self.trends, self.trends_scroll, &self.theme)
            }
            Tab::Gaps => {
                render_gaps_view(frame, content_area, &self.gaps, self.gaps_scroll, &self.theme)
            }
        }

        render_status_bar(
            frame,
            status_area,
            self.input_mode(),
            self.status_text(),
            &self.theme,
        );

        if self.quick_start {
            render_quick_start(frame, area, &self.theme);
        }
        if let Some(citation) = &self.manual_copy {
            render_manual_copy(frame, area, citation, &self.theme);
        }
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect) {
        let [query_area, samples_area, body] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .areas(area);
        self.search_bar.render(
            frame,
            query_area,
            self.focus == Focus::Query,
            self.search.is_loading(),
            &self.theme,
        );
        render_sample_queries(
            frame,
            samples_area,
            personas::profile(self.persona),
            (self.focus == Focus::Samples).then_some(self.sample_cursor),
            &self.theme,
        );

        let [filters_area, results_area] =
            Layout::horizontal([Constraint::Length(30), Constraint::Min(0)]).areas(body);
        render_filter_panel(
            frame,
            filters_area,
            &self.filters,
            self.search.filters(),
            self.focus == Focus::Filters,
            &self.theme,
        );
        let view = ResultsView {
            results: self.search.results(),
            selected: self.results.selected(),
            loading: self.search.is_loading(),
            has_searched: self.search.has_searched(),
            focused: self.focus == Focus::Results,
        };
        render_results_list(frame, results_area, &view, &self.theme);

        render_detail_drawer(
            frame,
            body,
            &self.drawer,
            self.finding_similar,
            self.drawer_scroll,
            &self.theme,
        );
    }

    /// Handle a terminal event (keyboard, paste, mouse, resize).
    pub fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Paste(_) => {
                if self.screen == Screen::Main
                    && self.tab == Tab::Search
                    && self.focus == Focus::Query
                    && !self.drawer.is_open()
                {
                    self.search_bar.handle_event(&event);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            _ => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if let Some(action) = map_global_key(&key) {
            match action {
                Action::Quit => self.should_quit = true,
                Action::ToggleHelp => self.keys_overlay.toggle(),
                Action::SampleQuery(i) if self.screen == Screen::Main => self.run_sample(i),
                _ => {}
            }
            return;
        }

        if self.keys_overlay.is_visible() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.keys_overlay.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => self.keys_overlay.scroll_down(),
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => self.keys_overlay.hide(),
                _ => {}
            }
            return;
        }
        if self.manual_copy.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.manual_copy = None;
            }
            return;
        }
        if self.quick_start {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                self.dismiss_quick_start();
            }
            return;
        }

        match self.screen {
            Screen::Landing => {
                if let Some(action) = map_landing_key(&key) {
                    self.execute_landing_action(action);
                }
            }
            Screen::Main if self.drawer.is_open() => {
                if let Some(action) = map_drawer_key(&key) {
                    self.execute_drawer_action(action);
                }
            }
            Screen::Main if self.tab == Tab::Search && self.focus == Focus::Query => {
                self.handle_query_key(key);
            }
            Screen::Main => {
                if let Some(action) = map_main_key(&key) {
                    self.execute_main_action(action);
                }
            }
        }
    }

    fn handle_query_key(&mut self, key: KeyEvent) {
        match self.search_bar.handle_event(&Event::Key(key)) {
            SearchInput::Submit(text) => self.submit_query(&text),
            SearchInput::Consumed => {}
            SearchInput::NotConsumed => match key.code {
                KeyCode::Esc => self.focus = Focus::Results,
                KeyCode::Down => self.focus = Focus::Samples,
                KeyCode::Tab => self.switch_tab(self.tab.next()),
                KeyCode::BackTab => self.switch_tab(self.tab.prev()),
                _ => {}
            },
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let up = match mouse.kind {
            MouseEventKind::ScrollUp => true,
            MouseEventKind::ScrollDown => false,
            _ => return,
        };
        if self.screen != Screen::Main {
            return;
        }
        let action = if up { Action::MoveUp } else { Action::MoveDown };
        if self.drawer.is_open() {
            self.execute_drawer_action(action);
        } else if self.tab != Tab::Search || self.focus == Focus::Results {
            self.execute_main_action(action);
        }
    }

    fn execute_landing_action(&mut self, action: Action) {
        let count = Persona::all().len();
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.landing_cursor = (self.landing_cursor + count - 1) % count,
            Action::MoveDown => self.landing_cursor = (self.landing_cursor + 1) % count,
            Action::SelectPersona(i) if i < count => {
                self.landing_cursor = i;
                self.enter_dashboard();
            }
            Action::Activate => self.enter_dashboard(),
            _ => {}
        }
    }

    fn execute_main_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextTab => self.switch_tab(self.tab.next()),
            Action::PrevTab => self.switch_tab(self.tab.prev()),
            Action::SelectTab(i) => {
                if let Some(tab) = Tab::from_index(i) {
                    self.switch_tab(tab);
                }
            }
            Action::CyclePersona => self.set_persona(self.persona.next()),
            Action::ToLanding => self.screen = Screen::Landing,
            Action::FocusQuery => {
                self.switch_tab(Tab::Search);
                self.focus = Focus::Query;
            }
            Action::FocusFilters => {
                self.switch_tab(Tab::Search);
                self.focus = Focus::Filters;
            }
            Action::ToggleHelp => self.keys_overlay.toggle(),
            Action::DismissBanner => self.dismiss_banner(),
            _ => match self.tab {
                Tab::Search => self.execute_search_action(action),
                Tab::Trends => scroll(&mut self.trends_scroll, action),
                Tab::Gaps => scroll(&mut self.gaps_scroll, action),
            },
        }
    }

    fn execute_search_action(&mut self, action: Action) {
        match (self.focus, action) {
            (Focus::Samples, Action::MoveLeft) => {
                self.sample_cursor = self.sample_cursor.saturating_sub(1)
            }
            (Focus::Samples, Action::MoveRight) | (Focus::Samples, Action::MoveDown) => {
                let last = personas::profile(self.persona).sample_queries.len() - 1;
                self.sample_cursor = (self.sample_cursor + 1).min(last);
            }
            (Focus::Samples, Action::MoveUp) => self.focus = Focus::Query,
            (Focus::Samples, Action::Activate) => self.run_sample(self.sample_cursor),

            (Focus::Filters, Action::MoveUp) => self.filters.move_cursor(-1),
            (Focus::Filters, Action::MoveDown) => self.filters.move_cursor(1),
            (Focus::Filters, Action::MoveLeft) => {
                let next = self.filters.cycle(self.search.filters(), -1);
                self.apply_filters(next);
            }
            (Focus::Filters, Action::MoveRight) => {
                let next = self.filters.cycle(self.search.filters(), 1);
                self.apply_filters(next);
            }
            (Focus::Filters, Action::Activate) => {
                let next = self.filters.activate(self.search.filters());
                self.apply_filters(next);
            }

            (Focus::Results, Action::MoveUp) => self.results.select_previous(),
            (Focus::Results, Action::MoveDown) => {
                self.results.select_next(self.search.results().len())
            }
            (Focus::Results, Action::PageUp) => {
                for _ in 0..PAGE {
                    self.results.select_previous();
                }
            }
            (Focus::Results, Action::PageDown) => {
                for _ in 0..PAGE {
                    self.results.select_next(self.search.results().len());
                }
            }
            (Focus::Results, Action::MoveLeft) => self.focus = Focus::Filters,
            (Focus::Filters, Action::Back) | (Focus::Samples, Action::Back) => {
                self.focus = Focus::Results
            }
            (Focus::Results, Action::Activate) => self.open_selected(),
            _ => {}
        }
    }

    fn execute_drawer_action(&mut self, action: Action) {
        match action {
            Action::Back => self.close_drawer(),
            Action::FindSimilar => self.find_similar(),
            Action::ExportCitation => self.export_citation(),
            Action::RetrySummary => {
                if let Some(ticket) = self.drawer.retry() {
                    self.dispatcher.summary(ticket);
                }
            }
            Action::CyclePersona => self.set_persona(self.persona.next()),
            Action::DismissBanner => self.dismiss_banner(),
            _ => scroll(&mut self.drawer_scroll, action),
        }
    }

    fn enter_dashboard(&mut self) {
        let persona = Persona::all()[self.landing_cursor];
        info!(persona = %persona, "Entering dashboard");
        self.set_persona(persona);
        self.screen = Screen::Main;
        self.tab = Tab::Search;
        self.focus = Focus::Query;
        self.sample_cursor = 0;
        if !self.filters_requested {
            self.filters_requested = true;
            self.dispatcher.filter_options();
        }
        self.dispatcher.stats();
        if self.quick_start_pending {
            self.quick_start_pending = false;
            self.quick_start = true;
        }
    }

    fn dismiss_quick_start(&mut self) {
        self.quick_start = false;
        if let Some(store) = &self.onboarding {
            store.mark_seen();
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        match tab {
            Tab::Trends if self.trends.begin() => self.dispatcher.trends(),
            Tab::Gaps if self.gaps.begin() => self.dispatcher.gaps(),
            _ => {}
        }
    }

    fn set_persona(&mut self, persona: Persona) {
        if persona == self.persona {
            return;
        }
        debug!(from = %self.persona, to = %persona, "Switching persona");
        self.persona = persona;
        self.sample_cursor = 0;
        if let Some(ticket) = self.drawer.set_persona(persona) {
            self.dispatcher.summary(ticket);
        }
    }

    fn dismiss_banner(&mut self) {
        self.notice = None;
        self.search.dismiss_error();
    }

    fn submit_query(&mut self, text: &str) {
        if let Some(ticket) = self.search.submit_query(text) {
            self.notice = None;
            self.focus = Focus::Results;
            self.dispatcher.search(ticket);
        }
    }

    fn run_sample(&mut self, index: usize) {
        let profile = personas::profile(self.persona);
        let Some(query) = profile.sample_queries.get(index) else {
            return;
        };
        self.close_drawer();
        self.tab = Tab::Search;
        self.sample_cursor = index;
        self.search_bar.set_text(query);
        self.submit_query(query);
    }

    fn apply_filters(&mut self, filters: Option<SearchFilters>) {
        let Some(filters) = filters else {
            return;
        };
        debug!(filters = %filters.describe(), "Filters changed");
        if let Some(ticket) = self.search.update_filters(filters) {
            self.dispatcher.search(ticket);
        }
    }

    fn open_selected(&mut self) {
        let Some(result) = self.results.current(self.search.results()).cloned() else {
            return;
        };
        let ticket = self.drawer.open(result, self.persona);
        self.drawer_scroll = 0;
        self.dispatcher.summary(ticket);
    }

    fn close_drawer(&mut self) {
        self.drawer.close();
        self.drawer_scroll = 0;
        // A similar search still in flight belongs to the closed paper.
        self.similar_generation += 1;
        self.finding_similar = false;
    }

    fn find_similar(&mut self) {
        if self.finding_similar {
            return;
        }
        let Some(result) = self.drawer.result().cloned() else {
            return;
        };
        self.similar_generation += 1;
        self.finding_similar = true;
        self.dispatcher.similar(self.similar_generation, result);
    }

    fn export_citation(&mut self) {
        let Some(result) = self.drawer.result() else {
            return;
        };
        let citation = Citation::from_result(result).to_string();
        let outcome = (self.copy)(&citation);
        self.set_status(outcome.message());
        if let CopyOutcome::ManualCopy(text) = outcome {
            self.manual_copy = Some(text);
        }
    }

    /// Apply a response from a background task.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Search { ticket, outcome } => {
                if self.search.apply_search(&ticket, outcome) {
                    self.results.reset();
                }
            }
            BackendEvent::Summary { ticket, outcome } => {
                self.drawer.apply_summary(&ticket, outcome);
            }
            BackendEvent::Similar {
                generation,
                outcome,
            } => {
                if generation != self.similar_generation {
                    debug!(generation, "Dropping stale similar-papers response");
                    return;
                }
                self.finding_similar = false;
                match outcome {
                    Ok(SimilarOutcome::Found(results)) => {
                        let count = results.len();
                        self.search.apply_similar_results(results);
                        self.results.reset();
                        self.close_drawer();
                        self.focus = Focus::Results;
                        self.set_status(format!("Showing {} similar papers", count));
                    }
                    Ok(SimilarOutcome::NoneFound) => {
                        self.notice = Some(NO_SIMILAR_MESSAGE.to_string());
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to find similar papers");
                        self.notice = Some(SIMILAR_FAILED_MESSAGE.to_string());
                    }
                }
            }
            BackendEvent::FilterOptions(outcome) => match outcome {
                Ok(options) => self.filters.set_options(options),
                Err(e) => {
                    error!(error = %e, "Failed to load filter options");
                    self.filters.mark_load_failed();
                }
            },
            BackendEvent::Trends(state) => self.trends = state,
            BackendEvent::Gaps(state) => self.gaps = state,
            BackendEvent::Stats(stats) => self.stats = Some(stats),
        }
    }
}

fn scroll(offset: &mut u16, action: Action) {
    *offset = match action {
        Action::MoveUp => offset.saturating_sub(1),
        Action::MoveDown => offset.saturating_add(1),
        Action::PageUp => offset.saturating_sub(PAGE),
        Action::PageDown => offset.saturating_add(PAGE),
        _ => *offset,
    };
}
