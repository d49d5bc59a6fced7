//! Data model shared by the API client, view state, and the terminal UI.
//!
//! Wire shapes follow the research backend's JSON. Fields the backend may
//! omit or send as `null` default to empty values; the richer analytics
//! blocks in [`TrendsData`] and [`GapAnalysis`] are decoded leniently so a
//! block of unexpected shape is dropped instead of failing the response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the three research-consumer roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    #[default]
    Scientist,
    Investor,
    Architect,
}

impl Persona {
    /// All personas in landing-page order.
    pub fn all() -> [Persona; 3] {
        [Persona::Scientist, Persona::Investor, Persona::Architect]
    }

    /// Wire identifier sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Scientist => "scientist",
            Persona::Investor => "investor",
            Persona::Architect => "architect",
        }
    }

    /// The persona after this one, wrapping around.
    pub fn next(&self) -> Persona {
        match self {
            Persona::Scientist => Persona::Investor,
            Persona::Investor => Persona::Architect,
            Persona::Architect => Persona::Scientist,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scientist" => Ok(Persona::Scientist),
            "investor" | "investment_manager" => Ok(Persona::Investor),
            "architect" | "mission_architect" => Ok(Persona::Architect),
            other => Err(format!(
                "unknown persona '{}', expected scientist, investor or architect",
                other
            )),
        }
    }
}

// ── Search ────────────────────────────────────────────────────

/// Source metadata attached to a search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Source file name, usually `<title>.pdf`.
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub file: String,
    #[serde(default, deserialize_with = "crate::serde_ext::whole_number")]
    pub page: u32,
    #[serde(default, deserialize_with = "crate::serde_ext::whole_number")]
    pub chunk: u32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_ext::whole_number_opt"
    )]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub organisms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment_type: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub space_conditions: Vec<String>,
}

impl ResultMetadata {
    /// Identity of the source document: the paper id when present, else the file name.
    /// `None` when neither identifies a paper, including the backend's placeholder file.
    pub fn document_id(&self) -> Option<&str> {
        if let Some(id) = self.paper_id() {
            return Some(id);
        }
        non_empty(Some(&self.file)).filter(|file| *file != PLACEHOLDER_FILE)
    }

    fn paper_id(&self) -> Option<&str> {
        non_empty(self.paper_id.as_deref())
    }

    /// Section name, treating an empty string as absent.
    pub fn section(&self) -> Option<&str> {
        non_empty(self.section.as_deref())
    }

    /// Explicit document title, treating an empty string as absent.
    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// Title derived from the file name (`Foo.pdf` -> `Foo`), if there is a file name.
    pub fn file_title(&self) -> Option<&str> {
        let file = self.file.trim();
        if file.is_empty() {
            return None;
        }
        let stem = file.strip_suffix(".pdf").unwrap_or(file);
        non_empty(Some(stem))
    }
}

/// File name the backend gives papers without a title.
const PLACEHOLDER_FILE: &str = "Unknown.pdf";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// A ranked chunk returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "crate::serde_ext::stringish")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub text: String,
    /// Relevance in `0.0..=1.0`.
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub score: f64,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub metadata: ResultMetadata,
}

impl SearchResult {
    /// Document identity, falling back to the chunk id when the metadata names no paper.
    pub fn document_id(&self) -> &str {
        self.metadata.document_id().unwrap_or(&self.id)
    }
}

/// Active search filters. Absent keys are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Exact publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Organism names, OR-matched by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl SearchFilters {
    /// Collapse an empty organism set to `None` so `{}` means "no filters".
    pub fn normalized(mut self) -> Self {
        if self.organisms.as_ref().is_some_and(Vec::is_empty) {
            self.organisms = None;
        }
        if self.section.as_ref().is_some_and(|s| s.trim().is_empty()) {
            self.section = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.organisms.as_ref().is_none_or(Vec::is_empty)
            && self.section.is_none()
    }

    pub fn has_organism(&self, organism: &str) -> bool {
        self.organisms
            .as_ref()
            .is_some_and(|list| list.iter().any(|o| o == organism))
    }

    /// Human-readable summary for status lines, e.g. `year=2019 organisms=Mouse,Rat`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(year) = self.year {
            parts.push(format!("year={}", year));
        }
        if let Some(organisms) = self.organisms.as_ref().filter(|o| !o.is_empty()) {
            parts.push(format!("organisms={}", organisms.join(",")));
        }
        if let Some(section) = &self.section {
            parts.push(format!("section={}", section));
        }
        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Body of `POST /search`. Always carries the complete filter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
    pub filters: SearchFilters,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: usize, filters: &SearchFilters) -> Self {
        Self {
            query: query.into(),
            top_k,
            filters: filters.clone().normalized(),
        }
    }
}

/// Response of `POST /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub results: Vec<SearchResult>,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub query: String,
    #[serde(default, alias = "count", deserialize_with = "crate::serde_ext::nullable")]
    pub total_results: usize,
}

// ── Summaries & consensus ─────────────────────────────────────

/// Body of `POST /summarize`.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest<'a> {
    pub query: &'a str,
    pub results: &'a [SearchResult],
    pub persona: Persona,
}

/// Response of `POST /summarize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub key_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
}

/// Body of `POST /consensus`.
#[derive(Debug, Clone, Serialize)]
pub struct ConsensusRequest<'a> {
    pub topic: &'a str,
    pub results: &'a [SearchResult],
}

/// Response of `POST /consensus`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResponse {
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub consensus_points: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub disagreements: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::stringish")]
    pub confidence_level: String,
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub supporting_evidence: BTreeMap<String, Vec<String>>,
}

// ── Gap analysis ──────────────────────────────────────────────

/// Body of `POST /gaps`.
#[derive(Debug, Clone, Serialize)]
pub struct GapsRequest<'a> {
    pub results: &'a [SearchResult],
}

/// Backend-computed characterization of under-studied topics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub under_researched_areas: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub missing_approaches: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub critical_questions: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub recommendations: Vec<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_ext::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantitative_scoring: Option<Vec<GapScore>>,
    #[serde(
        default,
        deserialize_with = "crate::serde_ext::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub comparative_analysis: Option<CoverageSummary>,
}

/// A severity-scored gap entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapScore {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub paper_count: u64,
    #[serde(default)]
    pub severity_score: f64,
    #[serde(default)]
    pub reason: String,
}

/// Organism × condition coverage summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub organism_condition_gaps: Vec<OrganismConditionGap>,
    #[serde(default)]
    pub total_combinations: u64,
    #[serde(default)]
    pub studied_combinations: u64,
    /// Fraction of combinations with at least one supporting document, in percent.
    #[serde(default)]
    pub coverage_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganismConditionGap {
    #[serde(default)]
    pub organism: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub status: String,
}

// ── Trends ────────────────────────────────────────────────────

/// A count inside a trends mapping.
///
/// The backend has sent plain integers, floats, and nested objects for
/// these values; every shape is decoded into one variant here and
/// [`TrendCount::value`] handles each exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrendCount {
    Count(u64),
    Fractional(f64),
    Detailed(DetailedCount),
    Unsupported(serde_json::Value),
}

/// Object form of a count, e.g. `{"count": 12, "growth": 0.4}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedCount {
    #[serde(alias = "papers", alias = "value")]
    pub count: f64,
}

impl TrendCount {
    pub fn value(&self) -> f64 {
        match self {
            TrendCount::Count(n) => *n as f64,
            TrendCount::Fractional(f) => *f,
            TrendCount::Detailed(d) => d.count,
            TrendCount::Unsupported(_) => 0.0,
        }
    }
}

impl From<u64> for TrendCount {
    fn from(n: u64) -> Self {
        TrendCount::Count(n)
    }
}

/// Response of `GET /trends`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsData {
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub research_by_year: BTreeMap<String, TrendCount>,
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub top_organisms: BTreeMap<String, TrendCount>,
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub top_topics: BTreeMap<String, TrendCount>,
    #[serde(
        default,
        deserialize_with = "crate::serde_ext::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub emerging_areas: Option<Vec<EmergingArea>>,
    #[serde(
        default,
        deserialize_with = "crate::serde_ext::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub temporal_analysis: Option<TemporalAnalysis>,
    #[serde(
        default,
        deserialize_with = "crate::serde_ext::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub collaboration_network: Option<Vec<CollaborationLink>>,
    #[serde(
        default,
        deserialize_with = "crate::serde_ext::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub organism_trends_by_year: Option<Vec<OrganismTrend>>,
    #[serde(
        default,
        deserialize_with = "crate::serde_ext::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub topic_evolution: Option<Vec<TopicEvolution>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergingArea {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub recent_papers: u64,
    #[serde(default)]
    pub growth_rate: f64,
    #[serde(default)]
    pub total_papers: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    #[serde(default)]
    pub growth_rate: f64,
    /// `accelerating`, `declining`, or `stable`.
    #[serde(default, deserialize_with = "crate::serde_ext::stringish")]
    pub trend: String,
    #[serde(default, deserialize_with = "crate::serde_ext::stringish")]
    pub peak_year: String,
    #[serde(default)]
    pub peak_papers: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaborationLink {
    #[serde(default)]
    pub organism1: String,
    #[serde(default)]
    pub organism2: String,
    #[serde(default)]
    pub co_occurrences: u64,
    #[serde(default)]
    pub strength: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganismTrend {
    #[serde(default)]
    pub organism: String,
    #[serde(default)]
    pub total_papers: u64,
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub trend_data: BTreeMap<String, TrendCount>,
    /// Percent change between the early and recent windows.
    #[serde(default)]
    pub velocity: f64,
    #[serde(default, deserialize_with = "crate::serde_ext::stringish")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicEvolution {
    #[serde(default)]
    pub topic: String,
    #[serde(default, deserialize_with = "crate::serde_ext::lenient_or_default")]
    pub timeline: BTreeMap<String, TrendCount>,
    #[serde(default)]
    pub recent_momentum: f64,
    #[serde(default, deserialize_with = "crate::serde_ext::stringish")]
    pub first_seen: String,
    #[serde(default, deserialize_with = "crate::serde_ext::stringish")]
    pub last_seen: String,
}

// ── Filters & stats ───────────────────────────────────────────

/// Response of `GET /filters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default, deserialize_with = "crate::serde_ext::whole_numbers")]
    pub years: Vec<i32>,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub organisms: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub sections: Vec<String>,
}

/// Response of `GET /stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub total_papers: u64,
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub total_vectors: u64,
    /// Index fullness ratio in `0.0..=1.0`.
    #[serde(default, deserialize_with = "crate::serde_ext::nullable")]
    pub index_fullness: f64,
}

impl DatabaseStats {
    /// Placeholder shown when stats could not be fetched.
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn index_fullness_percent(&self) -> f64 {
        self.index_fullness * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_persona_roundtrip_and_parse() {
        assert_eq!(serde_json::to_value(Persona::Investor).unwrap(), json!("investor"));
        assert_eq!("Architect".parse::<Persona>().unwrap(), Persona::Architect);
        assert!("pilot".parse::<Persona>().is_err());
        assert_eq!(Persona::Architect.next(), Persona::Scientist);
    }

    #[test]
    fn test_search_result_from_backend_shape() {
        let raw = json!({
            "id": "p12-c3",
            "score": 0.71,
            "text": "Mice flown on the ISS lost muscle mass.",
            "metadata": {
                "file": "Rodent Research 1.pdf",
                "page": 3,
                "chunk": 3,
                "year": 2016,
                "organisms": ["Mouse"],
                "section": "",
                "paper_id": "p12",
                "keywords": [],
                "experiment_type": "",
                "space_conditions": ["microgravity"]
            }
        });
        let result: SearchResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.document_id(), "p12");
        assert_eq!(result.metadata.section(), None);
        assert_eq!(result.metadata.file_title(), Some("Rodent Research 1"));
        assert_eq!(result.metadata.year, Some(2016));
    }

    #[test]
    fn test_search_result_tolerates_nulls() {
        let raw = json!({"id": 7, "score": null, "text": null, "metadata": {"organisms": null}});
        let result: SearchResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.id, "7");
        assert_eq!(result.score, 0.0);
        assert!(result.text.is_empty());
        assert!(result.metadata.organisms.is_empty());
    }

    #[test]
    fn test_document_id_falls_back_to_file() {
        let meta = ResultMetadata {
            file: "Plant Growth.pdf".into(),
            paper_id: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(meta.document_id(), Some("Plant Growth.pdf"));
    }

    #[test]
    fn test_document_id_ignores_placeholder_and_empty_file() {
        let untitled = SearchResult {
            id: "u1-c0".into(),
            metadata: ResultMetadata {
                file: "Unknown.pdf".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(untitled.metadata.document_id(), None);
        assert_eq!(untitled.document_id(), "u1-c0");

        let nameless = SearchResult {
            id: "n7".into(),
            ..Default::default()
        };
        assert_eq!(nameless.document_id(), "n7");

        let mut titled = untitled.clone();
        titled.metadata.paper_id = Some("p3".into());
        assert_eq!(titled.document_id(), "p3");
    }

    #[test]
    fn test_search_result_accepts_float_numbers() {
        let raw = json!({
            "results": [{
                "id": "p4-c2",
                "score": 0.5,
                "text": "Arabidopsis roots in microgravity.",
                "metadata": {"file": "Roots.pdf", "page": 3.0, "chunk": 2.0, "year": 2019.0}
            }],
            "total_results": 1,
            "query": "roots"
        });
        let resp: SearchResponse = serde_json::from_value(raw).unwrap();
        let meta = &resp.results[0].metadata;
        assert_eq!((meta.page, meta.chunk, meta.year), (3, 2, Some(2019)));
    }

    #[test]
    fn test_filter_options_accept_float_years() {
        let options: FilterOptions = serde_json::from_value(json!({
            "years": [2016.0, 2019.0],
            "organisms": ["Mouse"],
            "sections": null
        }))
        .unwrap();
        assert_eq!(options.years, vec![2016, 2019]);
        assert_eq!(options.organisms, vec!["Mouse".to_string()]);
        assert!(options.sections.is_empty());
    }

    #[test]
    fn test_empty_filters_serialize_as_empty_object() {
        let req = SearchRequest::new("bone loss", 25, &SearchFilters::default());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"query": "bone loss", "top_k": 25, "filters": {}})
        );
    }

    #[test]
    fn test_filters_serialize_full_object() {
        let filters = SearchFilters {
            year: Some(2019),
            organisms: Some(vec!["Mouse".into(), "Rat".into()]),
            section: Some("results".into()),
        };
        let req = SearchRequest::new("radiation", 25, &filters);
        assert_eq!(
            serde_json::to_value(&req).unwrap()["filters"],
            json!({"year": 2019, "organisms": ["Mouse", "Rat"], "section": "results"})
        );
    }

    #[test]
    fn test_filters_normalize_empty_organisms() {
        let filters = SearchFilters {
            organisms: Some(vec![]),
            ..Default::default()
        }
        .normalized();
        assert_eq!(filters, SearchFilters::default());
        assert!(filters.is_empty());
        assert_eq!(filters.describe(), "no filters");
    }

    #[test]
    fn test_search_response_count_alias() {
        let resp: SearchResponse =
            serde_json::from_value(json!({"results": [], "count": 4, "query": "q"})).unwrap();
        assert_eq!(resp.total_results, 4);
    }

    #[test]
    fn test_trend_count_variants() {
        let data: TrendsData = serde_json::from_value(json!({
            "research_by_year": {"2019": 4, "2020": 6.5},
            "top_organisms": {"Mouse": {"count": 12}, "Rat": {"papers": 3}},
            "top_topics": {"bone": "lots"}
        }))
        .unwrap();
        assert_eq!(data.research_by_year["2019"], TrendCount::Count(4));
        assert_eq!(data.research_by_year["2020"].value(), 6.5);
        assert_eq!(data.top_organisms["Mouse"].value(), 12.0);
        assert_eq!(data.top_organisms["Rat"].value(), 3.0);
        assert!(matches!(data.top_topics["bone"], TrendCount::Unsupported(_)));
        assert_eq!(data.top_topics["bone"].value(), 0.0);
    }

    #[test]
    fn test_trends_tolerate_unexpected_shapes() {
        let data: TrendsData = serde_json::from_value(json!({
            "research_by_year": [1, 2, 3],
            "emerging_areas": "not a list",
            "collaboration_network": [{"organism1": "Mouse", "organism2": "Rat", "co_occurrences": 2, "strength": 0.4}],
            "temporal_analysis": {"growth_rate": 12.5, "trend": "accelerating", "peak_year": 2021, "peak_papers": 40}
        }))
        .unwrap();
        assert!(data.research_by_year.is_empty());
        assert!(data.emerging_areas.is_none());
        assert_eq!(data.collaboration_network.as_ref().map(Vec::len), Some(1));
        assert_eq!(data.temporal_analysis.unwrap().peak_year, "2021");
        assert!(data.topic_evolution.is_none());
    }

    #[test]
    fn test_gap_analysis_minimal() {
        let gaps: GapAnalysis = serde_json::from_value(json!({
            "under_researched_areas": ["Fungi under radiation"],
            "recommendations": null
        }))
        .unwrap();
        assert_eq!(gaps.under_researched_areas.len(), 1);
        assert!(gaps.recommendations.is_empty());
        assert!(gaps.quantitative_scoring.is_none());
        assert!(gaps.comparative_analysis.is_none());
    }

    #[test]
    fn test_database_stats_zeroed() {
        let stats = DatabaseStats::zeroed();
        assert_eq!(stats.total_papers, 0);
        assert_eq!(stats.index_fullness_percent(), 0.0);
    }
}
