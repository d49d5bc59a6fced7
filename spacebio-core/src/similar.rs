//! "Find similar papers": re-query on a result's own metadata and keep one
//! chunk per other document.

use crate::api::PaperApi;
use crate::error::ApiError;
use crate::types::{SearchFilters, SearchRequest, SearchResult};
use std::collections::HashMap;
use tracing::debug;

pub const NO_SIMILAR_MESSAGE: &str = "No similar papers found";
/// Candidates requested from the backend.
pub const SIMILAR_CANDIDATES: usize = 25;
/// Documents kept after deduplication.
pub const MAX_SIMILAR: usize = 10;
const MAX_QUERY_CHARS: usize = 100;
const TEXT_PREFIX_CHARS: usize = 200;
const DEFAULT_QUERY: &str = "space biology research";

#[derive(Debug, Clone, PartialEq)]
pub enum SimilarOutcome {
    Found(Vec<SearchResult>),
    NoneFound,
}

/// Build the search text used to find papers similar to `result`.
///
/// Organism tags win, then the document title, then the start of the text.
pub fn similarity_query(result: &SearchResult) -> String {
    let meta = &result.metadata;
    let organisms: Vec<&str> = meta
        .organisms
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .collect();

    let query = if !organisms.is_empty() {
        organisms.join(" ")
    } else if let Some(title) = meta.title().or_else(|| meta.file_title()) {
        title.to_string()
    } else if !result.text.trim().is_empty() {
        result.text.trim().chars().take(TEXT_PREFIX_CHARS).collect()
    } else {
        DEFAULT_QUERY.to_string()
    };
    query.chars().take(MAX_QUERY_CHARS).collect()
}

/// Best chunk per document other than `current`'s, highest score first, at most ten.
pub fn rank_similar(current: &SearchResult, candidates: Vec<SearchResult>) -> Vec<SearchResult> {
    let excluded = current.document_id().to_string();
    let mut best: HashMap<String, SearchResult> = HashMap::new();
    for candidate in candidates {
        let doc = candidate.document_id();
        if doc == excluded {
            continue;
        }
        let better = best
            .get(doc)
            .is_none_or(|kept| candidate.score > kept.score);
        if better {
            best.insert(doc.to_string(), candidate);
        }
    }
    let mut ranked: Vec<SearchResult> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.document_id().cmp(b.document_id()))
    });
    ranked.truncate(MAX_SIMILAR);
    ranked
}

/// Query the backend for papers similar to `result`.
pub async fn find_similar(
    api: &dyn PaperApi,
    result: &SearchResult,
) -> Result<SimilarOutcome, ApiError> {
    let query = similarity_query(result);
    debug!(query = %query, document = %result.document_id(), "Finding similar papers");
    let request = SearchRequest::new(query, SIMILAR_CANDIDATES, &SearchFilters::default());
    let response = api.search(&request).await?;
    let ranked = rank_similar(result, response.results);
    Ok(if ranked.is_empty() {
        SimilarOutcome::NoneFound
    } else {
        SimilarOutcome::Found(ranked)
    })
}
