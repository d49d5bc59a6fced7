//! Scripted in-memory backend.
//!
//! Searches run against a small corpus and honor the year/organism/section
//! filters the way the real backend does (exact year, OR-matched organisms,
//! exact section). Every endpoint counts its calls and can be switched to
//! fail, which is what the orchestrator and cache tests rely on.

use super::{PaperApi, endpoints};
use crate::error::ApiError;
use crate::types::{
    CollaborationLink, ConsensusResponse, CoverageSummary, DatabaseStats, EmergingArea,
    FilterOptions, GapAnalysis, GapScore, OrganismConditionGap, OrganismTrend, Persona,
    ResultMetadata, SearchRequest, SearchResponse, SearchResult, SummaryResponse,
    TemporalAnalysis, TopicEvolution, TrendCount, TrendsData,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    corpus: Vec<SearchResult>,
    summary: SummaryResponse,
    consensus: ConsensusResponse,
    gaps: GapAnalysis,
    trends: TrendsData,
    filter_options: Option<FilterOptions>,
    stats: DatabaseStats,
    failing: HashSet<&'static str>,
    calls: HashMap<&'static str, usize>,
    search_requests: Vec<SearchRequest>,
    summary_requests: Vec<(String, Vec<String>, Persona)>,
}

/// In-memory [`PaperApi`] with canned responses and call accounting.
#[derive(Debug, Default)]
pub struct MockPaperApi {
    state: Mutex<MockState>,
}

impl MockPaperApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose searches draw from `corpus`.
    pub fn with_corpus(corpus: Vec<SearchResult>) -> Self {
        let api = Self::new();
        api.lock().corpus = corpus;
        api
    }

    /// A mock populated with a small space-biology corpus and analytics,
    /// used by the `--offline` mode of the CLI.
    pub fn demo() -> Self {
        let api = Self::with_corpus(demo_corpus());
        {
            let mut state = api.lock();
            state.summary = SummaryResponse {
                summary: "Spaceflight studies consistently report muscle and bone loss in \
                          rodents, with partial recovery after return to Earth."
                    .to_string(),
                key_points: vec![
                    "Microgravity drives rapid skeletal muscle atrophy.".to_string(),
                    "Radiation compounds oxidative stress in tissue.".to_string(),
                ],
                persona: None,
            };
            state.consensus = ConsensusResponse {
                consensus_points: vec!["Unloading causes measurable muscle loss.".to_string()],
                disagreements: vec!["Magnitude of recovery after landing.".to_string()],
                confidence_level: "medium".to_string(),
                supporting_evidence: BTreeMap::new(),
            };
            state.gaps = demo_gaps();
            state.trends = demo_trends();
            state.stats = DatabaseStats {
                total_papers: 608,
                total_vectors: 18_240,
                index_fullness: 0.12,
            };
        }
        api
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_summary(&self, summary: SummaryResponse) {
        self.lock().summary = summary;
    }

    pub fn set_consensus(&self, consensus: ConsensusResponse) {
        self.lock().consensus = consensus;
    }

    pub fn set_gaps(&self, gaps: GapAnalysis) {
        self.lock().gaps = gaps;
    }

    pub fn set_trends(&self, trends: TrendsData) {
        self.lock().trends = trends;
    }

    /// Override the filter vocabulary. By default it is derived from the corpus.
    pub fn set_filter_options(&self, options: FilterOptions) {
        self.lock().filter_options = Some(options);
    }

    pub fn set_stats(&self, stats: DatabaseStats) {
        self.lock().stats = stats;
    }

    /// Make `endpoint` (one of [`endpoints`]) fail or succeed.
    pub fn set_failing(&self, endpoint: &'static str, failing: bool) {
        let mut state = self.lock();
        if failing {
            state.failing.insert(endpoint);
        } else {
            state.failing.remove(endpoint);
        }
    }

    /// Number of calls made to `endpoint`.
    pub fn calls(&self, endpoint: &str) -> usize {
        self.lock().calls.get(endpoint).copied().unwrap_or(0)
    }

    /// Every search request received, in order.
    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.lock().search_requests.clone()
    }

    /// `(query, result ids, persona)` of every summarize call, in order.
    pub fn summary_requests(&self) -> Vec<(String, Vec<String>, Persona)> {
        self.lock().summary_requests.clone()
    }

    fn enter(&self, endpoint: &'static str) -> Result<MutexGuard<'_, MockState>, ApiError> {
        let mut state = self.lock();
        *state.calls.entry(endpoint).or_insert(0) += 1;
        if state.failing.contains(endpoint) {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: 503,
                body: "mock backend unavailable".to_string(),
            });
        }
        Ok(state)
    }
}

fn matches_filters(result: &SearchResult, request: &SearchRequest) -> bool {
    let filters = &request.filters;
    if let Some(year) = filters.year
        && result.metadata.year != Some(year)
    {
        return false;
    }
    if let Some(organisms) = filters.organisms.as_ref().filter(|o| !o.is_empty())
        && !result
            .metadata
            .organisms
            .iter()
            .any(|o| organisms.contains(o))
    {
        return false;
    }
    if let Some(section) = &filters.section
        && result.metadata.section() != Some(section.as_str())
    {
        return false;
    }
    true
}

#[async_trait]
impl PaperApi for MockPaperApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        let mut state = self.enter(endpoints::SEARCH)?;
        state.search_requests.push(request.clone());
        let mut results: Vec<SearchResult> = state
            .corpus
            .iter()
            .filter(|r| matches_filters(r, request))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(request.top_k);
        Ok(SearchResponse {
            total_results: results.len(),
            query: request.query.clone(),
            results,
        })
    }

    async fn summarize(
        &self,
        query: &str,
        results: &[SearchResult],
        persona: Persona,
    ) -> Result<SummaryResponse, ApiError> {
        let mut state = self.enter(endpoints::SUMMARIZE)?;
        state.summary_requests.push((
            query.to_string(),
            results.iter().map(|r| r.id.clone()).collect(),
            persona,
        ));
        let mut summary = state.summary.clone();
        summary.persona = Some(persona);
        Ok(summary)
    }

    async fn consensus(
        &self,
        _topic: &str,
        _results: &[SearchResult],
    ) -> Result<ConsensusResponse, ApiError> {
        Ok(self.enter(endpoints::CONSENSUS)?.consensus.clone())
    }

    async fn analyze_gaps(&self, _results: &[SearchResult]) -> Result<GapAnalysis, ApiError> {
        Ok(self.enter(endpoints::GAPS)?.gaps.clone())
    }

    async fn trends(&self) -> Result<TrendsData, ApiError> {
        Ok(self.enter(endpoints::TRENDS)?.trends.clone())
    }

    async fn filter_options(&self) -> Result<FilterOptions, ApiError> {
        let state = self.enter(endpoints::FILTERS)?;
        if let Some(options) = &state.filter_options {
            return Ok(options.clone());
        }
        let mut years = BTreeSet::new();
        let mut organisms = BTreeSet::new();
        let mut sections = BTreeSet::new();
        for result in &state.corpus {
            if let Some(year) = result.metadata.year {
                years.insert(year);
            }
            organisms.extend(result.metadata.organisms.iter().cloned());
            if let Some(section) = result.metadata.section() {
                sections.insert(section.to_string());
            }
        }
        Ok(FilterOptions {
            years: years.into_iter().collect(),
            organisms: organisms.into_iter().collect(),
            sections: sections.into_iter().collect(),
        })
    }

    async fn stats(&self) -> Result<DatabaseStats, ApiError> {
        Ok(self.enter(endpoints::STATS)?.stats)
    }
}

/// Build a corpus chunk; handy for tests across the workspace.
pub fn sample_result(
    id: &str,
    paper_id: &str,
    score: f64,
    year: Option<i32>,
    organisms: &[&str],
    section: Option<&str>,
    text: &str,
) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        text: text.to_string(),
        score,
        metadata: ResultMetadata {
            file: format!("{}.pdf", paper_id.replace('-', " ")),
            page: 1,
            chunk: 0,
            year,
            organisms: organisms.iter().map(|s| s.to_string()).collect(),
            section: section.map(str::to_string),
            paper_id: Some(paper_id.to_string()),
            ..Default::default()
        },
    }
}

fn demo_corpus() -> Vec<SearchResult> {
    let mut corpus = vec![
        sample_result(
            "rr1-0",
            "Rodent-Research-1",
            0.74,
            Some(2016),
            &["Mouse"],
            Some("results"),
            "Mice housed aboard the ISS for 37 days showed significant loss of \
             quadriceps mass compared with ground controls.",
        ),
        sample_result(
            "rr1-4",
            "Rodent-Research-1",
            0.66,
            Some(2016),
            &["Mouse"],
            Some("discussion"),
            "Muscle atrophy markers including MuRF1 were upregulated during flight.",
        ),
        sample_result(
            "bion-2",
            "Bion-M1-Skeletal-Adaptation",
            0.63,
            Some(2014),
            &["Mouse", "Rat"],
            Some("results"),
            "Trabecular bone volume decreased after 30 days of orbital flight.",
        ),
        sample_result(
            "arab-1",
            "Arabidopsis-Root-Growth",
            0.58,
            Some(2019),
            &["Arabidopsis thaliana"],
            Some("abstract"),
            "Root skewing in microgravity is driven by altered auxin transport.",
        ),
        sample_result(
            "dros-3",
            "Drosophila-Cardiac-Function",
            0.61,
            Some(2018),
            &["Drosophila melanogaster"],
            Some("results"),
            "Flies raised in spaceflight showed reduced cardiac contractility.",
        ),
        sample_result(
            "rad-7",
            "Deep-Space-Radiation-DNA-Repair",
            0.69,
            Some(2021),
            &["Human"],
            Some("conclusion"),
            "Simulated galactic cosmic rays impaired double-strand break repair in \
             human fibroblasts.",
        ),
    ];
    for result in &mut corpus {
        result.metadata.title = result.metadata.file_title().map(str::to_string);
    }
    corpus[0].metadata.authors = vec![
        "Cadena S.".to_string(),
        "Lee J.".to_string(),
        "Globus R.".to_string(),
    ];
    corpus
}

fn demo_gaps() -> GapAnalysis {
    GapAnalysis {
        under_researched_areas: vec![
            "Long-duration effects on fungal pathogens".to_string(),
            "Plant reproduction across multiple generations".to_string(),
        ],
        missing_approaches: vec!["Multi-omics integration across missions".to_string()],
        critical_questions: vec![
            "How does partial gravity on Mars modulate bone loss?".to_string(),
        ],
        recommendations: vec!["Fund combined radiation and microgravity studies.".to_string()],
        quantitative_scoring: Some(vec![
            GapScore {
                kind: "organism".to_string(),
                area: "Fungi".to_string(),
                paper_count: 2,
                severity_score: 0.92,
                reason: "Only two papers in the corpus.".to_string(),
            },
            GapScore {
                kind: "condition".to_string(),
                area: "Partial gravity".to_string(),
                paper_count: 4,
                severity_score: 0.81,
                reason: "Lunar and Martian gravity rarely simulated.".to_string(),
            },
        ]),
        comparative_analysis: Some(CoverageSummary {
            organism_condition_gaps: vec![OrganismConditionGap {
                organism: "Arabidopsis thaliana".to_string(),
                condition: "radiation".to_string(),
                status: "unstudied".to_string(),
            }],
            total_combinations: 24,
            studied_combinations: 15,
            coverage_percentage: 62.5,
        }),
    }
}

fn demo_trends() -> TrendsData {
    let counts = |pairs: &[(&str, u64)]| -> BTreeMap<String, TrendCount> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), TrendCount::Count(*v)))
            .collect()
    };
    TrendsData {
        research_by_year: counts(&[("2014", 21), ("2016", 34), ("2018", 52), ("2021", 61)]),
        top_organisms: counts(&[
            ("Mouse", 143),
            ("Human", 98),
            ("Arabidopsis thaliana", 64),
            ("Rat", 41),
            ("Drosophila melanogaster", 22),
        ]),
        top_topics: counts(&[
            ("microgravity", 220),
            ("radiation", 140),
            ("bone", 88),
            ("muscle", 80),
        ]),
        emerging_areas: Some(vec![EmergingArea {
            topic: "radiation".to_string(),
            recent_papers: 31,
            growth_rate: 48.0,
            total_papers: 140,
        }]),
        temporal_analysis: Some(TemporalAnalysis {
            growth_rate: 18.4,
            trend: "accelerating".to_string(),
            peak_year: "2021".to_string(),
            peak_papers: 61,
        }),
        collaboration_network: Some(vec![CollaborationLink {
            organism1: "Mouse".to_string(),
            organism2: "Rat".to_string(),
            co_occurrences: 12,
            strength: 0.35,
        }]),
        organism_trends_by_year: Some(vec![OrganismTrend {
            organism: "Mouse".to_string(),
            total_papers: 143,
            trend_data: counts(&[("2016", 20), ("2021", 38)]),
            velocity: 42.0,
            status: "growing".to_string(),
        }]),
        topic_evolution: Some(vec![TopicEvolution {
            topic: "radiation".to_string(),
            timeline: counts(&[("2014", 4), ("2021", 19)]),
            recent_momentum: 2.1,
            first_seen: "2012".to_string(),
            last_seen: "2023".to_string(),
        }]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchFilters;

    #[tokio::test]
    async fn test_search_honors_organism_filter() {
        let api = MockPaperApi::demo();
        let filters = SearchFilters {
            organisms: Some(vec!["Rat".to_string()]),
            ..Default::default()
        };
        let response = api
            .search(&SearchRequest::new("bone", 25, &filters))
            .await
            .unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, "bion-2");
    }

    #[tokio::test]
    async fn test_search_sorted_and_truncated() {
        let api = MockPaperApi::demo();
        let response = api
            .search(&SearchRequest::new("q", 3, &SearchFilters::default()))
            .await
            .unwrap();
        let scores: Vec<f64> = response.results.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![0.74, 0.69, 0.66]);
    }

    #[tokio::test]
    async fn test_failing_endpoint_counts_call() {
        let api = MockPaperApi::demo();
        api.set_failing(endpoints::STATS, true);
        assert!(api.stats().await.is_err());
        assert_eq!(api.calls(endpoints::STATS), 1);
        api.set_failing(endpoints::STATS, false);
        assert_eq!(api.stats().await.unwrap().total_papers, 608);
    }

    #[tokio::test]
    async fn test_filter_options_derived_from_corpus() {
        let api = MockPaperApi::demo();
        let options = api.filter_options().await.unwrap();
        assert!(options.years.contains(&2016));
        assert!(options.organisms.contains(&"Mouse".to_string()));
        assert!(options.sections.contains(&"results".to_string()));
    }
}
