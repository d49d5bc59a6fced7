//! Filter panel state.
//!
//! The panel holds the vocabulary of years, organisms and sections, loaded
//! once from the backend. The active [`SearchFilters`] live in the search
//! orchestrator; every operation here takes the current set and returns the
//! complete replacement.

use crate::api::PaperApi;
use crate::types::{FilterOptions, SearchFilters};
use tracing::error;

/// Organisms listed before the panel truncates.
pub const VISIBLE_ORGANISMS: usize = 10;

/// A focusable row in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRow {
    Year,
    Organism(usize),
    Section,
    ClearAll,
}

#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    years: Vec<i32>,
    organisms: Vec<String>,
    sections: Vec<String>,
    loaded: bool,
    cursor: usize,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the vocabulary has been requested (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Install the vocabulary: years newest first, organisms and sections sorted.
    pub fn set_options(&mut self, options: FilterOptions) {
        let FilterOptions {
            mut years,
            mut organisms,
            mut sections,
        } = options;
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        organisms.sort();
        organisms.dedup();
        sections.sort();
        sections.dedup();
        self.years = years;
        self.organisms = organisms;
        self.sections = sections;
        self.loaded = true;
        self.cursor = 0;
    }

    /// Record a failed load. The lists stay empty and are not retried.
    pub fn mark_load_failed(&mut self) {
        self.loaded = true;
    }

    /// Fetch the vocabulary the first time only.
    pub async fn load(&mut self, api: &dyn PaperApi) {
        if self.loaded {
            return;
        }
        match api.filter_options().await {
            Ok(options) => self.set_options(options),
            Err(e) => {
                error!(error = %e, "Failed to load filter options");
                self.mark_load_failed();
            }
        }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn organisms(&self) -> &[String] {
        &self.organisms
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn visible_organisms(&self) -> &[String] {
        &self.organisms[..self.organisms.len().min(VISIBLE_ORGANISMS)]
    }

    pub fn select_year(&self, current: &SearchFilters, year: Option<i32>) -> SearchFilters {
        SearchFilters {
            year,
            ..current.clone()
        }
    }

    /// Add or remove one organism, leaving the others untouched.
    pub fn toggle_organism(&self, current: &SearchFilters, organism: &str) -> SearchFilters {
        let mut organisms = current.organisms.clone().unwrap_or_default();
        if let Some(pos) = organisms.iter().position(|o| o == organism) {
            organisms.remove(pos);
        } else {
            organisms.push(organism.to_string());
        }
        SearchFilters {
            organisms: (!organisms.is_empty()).then_some(organisms),
            ..current.clone()
        }
    }

    pub fn select_section(&self, current: &SearchFilters, section: Option<String>) -> SearchFilters {
        SearchFilters {
            section,
            ..current.clone()
        }
    }

    pub fn clear_all(&self) -> SearchFilters {
        SearchFilters::default()
    }

    pub fn has_active_filters(current: &SearchFilters) -> bool {
        !current.is_empty()
    }

    // ── Keyboard navigation ──────────────────────────────────────

    pub fn rows(&self) -> Vec<FilterRow> {
        let mut rows = vec![FilterRow::Year];
        rows.extend((0..self.visible_organisms().len()).map(FilterRow::Organism));
        rows.push(FilterRow::Section);
        rows.push(FilterRow::ClearAll);
        rows
    }

    pub fn cursor_row(&self) -> FilterRow {
        let rows = self.rows();
        rows[self.cursor.min(rows.len() - 1)]
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.rows().len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Step the year or section under the cursor through `All` and its options.
    pub fn cycle(&self, current: &SearchFilters, delta: isize) -> Option<SearchFilters> {
        match self.cursor_row() {
            FilterRow::Year => {
                let next = step(&self.years, current.year.as_ref(), delta)?;
                Some(self.select_year(current, next.copied()))
            }
            FilterRow::Section => {
                let next = step(&self.sections, current.section.as_ref(), delta)?;
                Some(self.select_section(current, next.cloned()))
            }
            _ => None,
        }
    }

    /// Toggle the organism under the cursor, or clear everything on the last row.
    pub fn activate(&self, current: &SearchFilters) -> Option<SearchFilters> {
        match self.cursor_row() {
            FilterRow::Organism(i) => {
                let organism = self.visible_organisms().get(i)?;
                Some(self.toggle_organism(current, organism))
            }
            FilterRow::ClearAll if Self::has_active_filters(current) => Some(self.clear_all()),
            _ => None,
        }
    }
}

/// Move through `[All, options...]`, wrapping. `None` when there are no options.
fn step<'a, T: PartialEq>(
    options: &'a [T],
    current: Option<&T>,
    delta: isize,
) -> Option<Option<&'a T>> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as isize + 1;
    let index = current
        .and_then(|c| options.iter().position(|o| o == c))
        .map_or(0, |p| p as isize + 1);
    let next = (index + delta).rem_euclid(len);
    Some(if next == 0 {
        None
    } else {
        options.get(next as usize - 1)
    })
}
