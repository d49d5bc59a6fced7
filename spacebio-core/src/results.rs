//! Result display helpers and list selection state.

use crate::types::SearchResult;
use std::fmt;

pub const EMPTY_RESULTS_TITLE: &str = "No results found";
pub const EMPTY_RESULTS_HINT: &str = "Try adjusting your search query or filters";
pub const NOT_SEARCHED_HINT: &str = "Enter a search query or try one of the sample queries above";
pub const NO_EXCERPT: &str = "No text excerpt available";
const FALLBACK_TITLE: &str = "Research Document";

/// Label derived from a relevance score. The thresholds are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLabel {
    Excellent,
    Good,
    Relevant,
}

impl MatchLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.65 {
            MatchLabel::Excellent
        } else if score > 0.60 {
            MatchLabel::Good
        } else {
            MatchLabel::Relevant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchLabel::Excellent => "Excellent Match",
            MatchLabel::Good => "Good Match",
            MatchLabel::Relevant => "Relevant",
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading for a result: the file name without `.pdf`.
pub fn display_title(result: &SearchResult) -> &str {
    result.metadata.file_title().unwrap_or(FALLBACK_TITLE)
}

/// Score as a percentage with one decimal, e.g. `71.3%`.
pub fn score_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Full chunk text, or a placeholder when the chunk has none.
pub fn excerpt(result: &SearchResult) -> &str {
    let text = result.text.trim();
    if text.is_empty() { NO_EXCERPT } else { text }
}

/// The excerpt cut to at most `max_chars` characters, with an ellipsis when cut.
pub fn preview(result: &SearchResult, max_chars: usize) -> String {
    let text = excerpt(result);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Selection cursor over the current result list.
#[derive(Debug, Clone, Default)]
pub struct ResultsList {
    selected: usize,
}

impl ResultsList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Reset the cursor after the list is replaced.
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn current<'a>(&self, results: &'a [SearchResult]) -> Option<&'a SearchResult> {
        results.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::sample_result;

    #[test]
    fn test_match_label_boundaries() {
        assert_eq!(MatchLabel::from_score(0.50).as_str(), "Relevant");
        assert_eq!(MatchLabel::from_score(0.60), MatchLabel::Relevant);
        assert_eq!(MatchLabel::from_score(0.61).as_str(), "Good Match");
        assert_eq!(MatchLabel::from_score(0.65), MatchLabel::Good);
        assert_eq!(MatchLabel::from_score(0.70).as_str(), "Excellent Match");
    }

    #[test]
    fn test_display_title_and_fallback() {
        let r = sample_result("1", "Bone-Loss", 0.5, None, &[], None, "x");
        assert_eq!(display_title(&r), "Bone Loss");
        let mut r = r;
        r.metadata.file.clear();
        assert_eq!(display_title(&r), "Research Document");
    }

    #[test]
    fn test_score_percent() {
        assert_eq!(score_percent(0.7134), "71.3%");
    }

    #[test]
    fn test_excerpt_placeholder_and_preview() {
        let r = sample_result("1", "p", 0.5, None, &[], None, "");
        assert_eq!(excerpt(&r), NO_EXCERPT);
        let r = sample_result("1", "p", 0.5, None, &[], None, "abcdefghij");
        assert_eq!(preview(&r, 20), "abcdefghij");
        assert_eq!(preview(&r, 5), "abcd…");
    }

    #[test]
    fn test_selection_clamped() {
        let mut list = ResultsList::new();
        list.select_next(2);
        list.select_next(2);
        assert_eq!(list.selected(), 1);
        list.select_previous();
        list.select_previous();
        assert_eq!(list.selected(), 0);
        list.select_next(0);
        assert_eq!(list.selected(), 0);
    }
}
