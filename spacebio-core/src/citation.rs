//! Citation formatting and clipboard export.

use crate::error::ClipboardError;
use crate::types::SearchResult;
use std::fmt;
use tracing::warn;

const UNKNOWN_AUTHOR: &str = "Unknown Author";
const UNTITLED: &str = "Untitled document";

/// Join author names: `A`, `A & B`, or `A, B, & C`.
pub fn format_authors(authors: &[String]) -> String {
    let authors: Vec<&str> = authors
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    match authors.as_slice() {
        [] => UNKNOWN_AUTHOR.to_string(),
        [one] => one.to_string(),
        [first, second] => format!("{} & {}", first, second),
        [init @ .., last] => format!("{}, & {}", init.join(", "), last),
    }
}

/// A formatted reference to one search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub authors: String,
    pub year: Option<i32>,
    pub title: String,
    pub page: u32,
}

impl Citation {
    pub fn from_result(result: &SearchResult) -> Self {
        let meta = &result.metadata;
        Self {
            authors: format_authors(&meta.authors),
            year: meta.year,
            title: meta
                .title()
                .or_else(|| meta.file_title())
                .unwrap_or(UNTITLED)
                .to_string(),
            page: meta.page,
        }
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.authors)?;
        match self.year {
            Some(year) => write!(f, "{}", year)?,
            None => f.write_str("n.d.")?,
        }
        write!(f, "). {}. Page {}.", self.title, self.page)
    }
}

/// Somewhere a citation can be copied to.
pub trait ClipboardBackend {
    fn name(&self) -> &str;
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CopiedViaFallback,
    /// Both backends failed; the text must be shown for manual copying.
    ManualCopy(String),
}

impl CopyOutcome {
    /// Status line text for the outcome.
    pub fn message(&self) -> &'static str {
        match self {
            CopyOutcome::Copied | CopyOutcome::CopiedViaFallback => {
                "Citation copied to clipboard!"
            }
            CopyOutcome::ManualCopy(_) => "Clipboard unavailable. Copy the citation manually.",
        }
    }
}

/// Copy `text` with `primary`, falling back to `fallback`.
pub fn copy_with_fallback(
    text: &str,
    primary: &mut dyn ClipboardBackend,
    fallback: &mut dyn ClipboardBackend,
) -> CopyOutcome {
    match primary.copy(text) {
        Ok(()) => return CopyOutcome::Copied,
        Err(e) => warn!(backend = primary.name(), error = %e, "Primary clipboard failed"),
    }
    match fallback.copy(text) {
        Ok(()) => CopyOutcome::CopiedViaFallback,
        Err(e) => {
            warn!(backend = fallback.name(), error = %e, "Fallback clipboard failed");
            CopyOutcome::ManualCopy(text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::sample_result;

    struct FakeClipboard {
        works: bool,
        copied: Vec<String>,
    }

    impl FakeClipboard {
        fn new(works: bool) -> Self {
            Self {
                works,
                copied: Vec::new(),
            }
        }
    }

    impl ClipboardBackend for FakeClipboard {
        fn name(&self) -> &str {
            "fake"
        }

        fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
            if !self.works {
                return Err(ClipboardError::Unavailable {
                    message: "no display".into(),
                });
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_authors_by_count() {
        assert_eq!(format_authors(&[]), "Unknown Author");
        assert_eq!(format_authors(&names(&["Smith J."])), "Smith J.");
        assert_eq!(format_authors(&names(&["A", "B"])), "A & B");
        assert_eq!(format_authors(&names(&["A", "B", "C"])), "A, B, & C");
        assert_eq!(format_authors(&names(&["A", "B", "C", "D"])), "A, B, C, & D");
        assert_eq!(format_authors(&names(&[" ", ""])), "Unknown Author");
    }

    #[test]
    fn test_citation_format() {
        let mut r = sample_result("1", "Bone-Loss", 0.5, Some(2019), &[], None, "");
        r.metadata.page = 4;
        r.metadata.authors = names(&["Lee J.", "Kim S."]);
        assert_eq!(
            Citation::from_result(&r).to_string(),
            "Lee J. & Kim S. (2019). Bone Loss. Page 4."
        );
    }

    #[test]
    fn test_citation_without_year_or_authors() {
        let mut r = sample_result("1", "Plant", 0.5, None, &[], None, "");
        r.metadata.title = Some("Root growth in orbit".into());
        let citation = Citation::from_result(&r).to_string();
        assert_eq!(citation, "Unknown Author (n.d.). Root growth in orbit. Page 1.");
    }

    #[test]
    fn test_copy_primary() {
        let mut primary = FakeClipboard::new(true);
        let mut fallback = FakeClipboard::new(true);
        let outcome = copy_with_fallback("cite", &mut primary, &mut fallback);
        assert_eq!(outcome, CopyOutcome::Copied);
        assert!(fallback.copied.is_empty());
    }

    #[test]
    fn test_copy_fallback_then_manual() {
        let mut primary = FakeClipboard::new(false);
        let mut fallback = FakeClipboard::new(true);
        assert_eq!(
            copy_with_fallback("cite", &mut primary, &mut fallback),
            CopyOutcome::CopiedViaFallback
        );
        assert_eq!(fallback.copied, ["cite"]);

        let mut fallback = FakeClipboard::new(false);
        assert_eq!(
            copy_with_fallback("cite", &mut primary, &mut fallback),
            CopyOutcome::ManualCopy("cite".into())
        );
    }
}
