//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use crate::clipboard;
use crate::context::AppContext;
use spacebio_core::error::ApiError;
use spacebio_core::gaps::GAPS_FAILED_MESSAGE;
use spacebio_core::personas;
use spacebio_core::results::{self, MatchLabel};
use spacebio_core::similar::{self, NO_SIMILAR_MESSAGE, SimilarOutcome};
use spacebio_core::trends::TRENDS_FAILED_MESSAGE;
use spacebio_core::types::ConsensusResponse;
use spacebio_core::{
    Citation, ClientConfig, CopyOutcome, DatabaseStats, FilterOptions,
    GapsReport, SearchFilters, SearchOrchestrator, SearchResult, SummaryResponse, TrendsReport,
};
use std::fmt::Write as _;
use std::path::Path;
use tracing::error;

/// Results sent along with a summarize or consensus request.
const CONTEXT_RESULTS: usize = 5;
const WRAP_WIDTH: usize = 88;

/// Handle a CLI subcommand that talks to the backend.
pub async fn handle_command(command: Commands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            query,
            year,
            organisms,
            section,
            top_k,
            json,
        } => {
            let filters = SearchFilters {
                year,
                organisms: Some(organisms),
                section,
            };
            let results = search(ctx, &query, filters, top_k).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", format_results(&results));
            }
            Ok(())
        }
        Commands::Summarize { query, json } => {
            let results = search(ctx, &query, SearchFilters::default(), None).await?;
            let context = &results[..results.len().min(CONTEXT_RESULTS)];
            let persona = ctx.persona();
            let summary = ctx
                .api
                .summarize(&query, context, persona)
                .await
                .map_err(|e| backend_failure(e, "Unable to generate summary."))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", format_summary(personas::profile(persona).name, &summary));
            }
            Ok(())
        }
        Commands::Similar { query, json } => {
            let results = search(ctx, &query, SearchFilters::default(), None).await?;
            let Some(top) = results.first() else {
                println!("{}", results::EMPTY_RESULTS_HINT);
                return Ok(());
            };
            let outcome = similar::find_similar(ctx.api.as_ref(), top)
                .await
                .map_err(|e| backend_failure(e, "Failed to find similar papers."))?;
            match outcome {
                SimilarOutcome::Found(list) if json => {
                    println!("{}", serde_json::to_string_pretty(&list)?);
                }
                SimilarOutcome::Found(list) => {
                    println!("Papers similar to {}:", results::display_title(top));
                    print!("{}", format_results(&list));
                }
                SimilarOutcome::NoneFound => println!("{}", NO_SIMILAR_MESSAGE),
            }
            Ok(())
        }
        Commands::Cite { query } => {
            let results = search(ctx, &query, SearchFilters::default(), None).await?;
            let Some(top) = results.first() else {
                println!("{}", results::EMPTY_RESULTS_HINT);
                return Ok(());
            };
            let citation = Citation::from_result(top).to_string();
            println!("{}", citation);
            let outcome = clipboard::copy_text(&citation);
            if !matches!(outcome, CopyOutcome::ManualCopy(_)) {
                eprintln!("{}", outcome.message());
            }
            Ok(())
        }
        Commands::Consensus { topic, json } => {
            let results = search(ctx, &topic, SearchFilters::default(), None).await?;
            let context = &results[..results.len().min(CONTEXT_RESULTS)];
            let consensus = ctx
                .api
                .consensus(&topic, context)
                .await
                .map_err(|e| backend_failure(e, "Failed to analyze consensus."))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&consensus)?);
            } else {
                print!("{}", format_consensus(&consensus));
            }
            Ok(())
        }
        Commands::Gaps { json } => {
            let analysis = ctx
                .api
                .analyze_gaps(&[])
                .await
                .map_err(|e| backend_failure(e, GAPS_FAILED_MESSAGE))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", format_gaps(&GapsReport::from_analysis(&analysis)));
            }
            Ok(())
        }
        Commands::Trends { json } => {
            let data = ctx
                .api
                .trends()
                .await
                .map_err(|e| backend_failure(e, TRENDS_FAILED_MESSAGE))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print!("{}", format_trends(&TrendsReport::from_data(&data)));
            }
            Ok(())
        }
        Commands::Filters { json } => {
            let options = ctx
                .api
                .filter_options()
                .await
                .map_err(|e| backend_failure(e, "Failed to load filter options."))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                print!("{}", format_filters(&options));
            }
            Ok(())
        }
        Commands::Stats { json } => {
            let stats = ctx.stats.get_or_fetch(ctx.api.as_ref()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", format_stats(&stats));
            }
            Ok(())
        }
        Commands::Personas => {
            print!("{}", format_personas());
            Ok(())
        }
        Commands::Config { action } => handle_config(action, Path::new("."), &ctx.config),
    }
}

pub fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            match spacebio_core::config::init_workspace_config(workspace)? {
                Some(path) => println!("Created default configuration at: {}", path.display()),
                None => println!(
                    "Configuration file already exists at: {}",
                    spacebio_core::config::workspace_config_path(workspace).display()
                ),
            }
            Ok(())
        }
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}

async fn search(
    ctx: &AppContext,
    query: &str,
    filters: SearchFilters,
    top_k: Option<usize>,
) -> anyhow::Result<Vec<SearchResult>> {
    let mut search = SearchOrchestrator::new(top_k.unwrap_or(ctx.top_k()));
    search.update_filters(filters);
    if !search.run_submit(ctx.api.as_ref(), query).await {
        anyhow::bail!("Search query must not be empty");
    }
    if let Some(message) = search.error() {
        anyhow::bail!("{}", message);
    }
    Ok(search.results().to_vec())
}

fn backend_failure(e: ApiError, message: &str) -> anyhow::Error {
    error!(error = %e, endpoint = e.endpoint(), "Backend request failed");
    anyhow::anyhow!("{}", message)
}

fn wrap(text: &str, indent: &str) -> String {
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(text, options)
}

pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!(
            "{}\n{}\n",
            results::EMPTY_RESULTS_TITLE,
            results::EMPTY_RESULTS_HINT
        );
    }
    let mut out = format!("Found {} results\n", results.len());
    for (i, result) in results.iter().enumerate() {
        let meta = &result.metadata;
        let mut details = Vec::new();
        if let Some(year) = meta.year {
            details.push(year.to_string());
        }
        if let Some(section) = meta.section() {
            details.push(section.to_string());
        }
        details.push(format!("page {}", meta.page));

        let _ = writeln!(
            out,
            "\n{:>2}. {}  [{} {}]",
            i + 1,
            results::display_title(result),
            results::score_percent(result.score),
            MatchLabel::from_score(result.score),
        );
        let _ = writeln!(out, "    {}", details.join(" · "));
        if !meta.organisms.is_empty() {
            let _ = writeln!(out, "    Organisms: {}", meta.organisms.join(", "));
        }
        let _ = writeln!(out, "{}", wrap(&results::preview(result, 240), "    "));
    }
    out
}

pub fn format_summary(persona_name: &str, summary: &SummaryResponse) -> String {
    let mut out = format!("AI Summary ({})\n\n", persona_name);
    let _ = writeln!(out, "{}", wrap(&summary.summary, ""));
    if !summary.key_points.is_empty() {
        out.push_str("\nKey Points:\n");
        for (i, point) in summary.key_points.iter().enumerate() {
            let _ = writeln!(out, "{}", wrap(point, &format!("  {}. ", i + 1)));
        }
    }
    out
}

pub fn format_consensus(consensus: &ConsensusResponse) -> String {
    let mut out = format!("Confidence: {}\n", consensus.confidence_level);
    push_list(&mut out, "Consensus", &consensus.consensus_points);
    push_list(&mut out, "Disagreements", &consensus.disagreements);
    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", title);
    for item in items {
        let _ = writeln!(out, "{}", wrap(item, "  • "));
    }
}

pub fn format_gaps(report: &GapsReport) -> String {
    if report.is_empty() {
        return "No research gaps reported.\n".to_string();
    }
    let mut out = String::from("Research Gap Analysis\n");
    for section in &report.sections {
        push_list(&mut out, section.title, &section.items);
    }
    if !report.scored_gaps.is_empty() {
        out.push_str("\nMost severe gaps\n");
        for gap in &report.scored_gaps {
            let _ = writeln!(
                out,
                "  {:<32} {:>5.2}  {} papers  {}",
                gap.area, gap.severity_score, gap.paper_count, gap.reason
            );
        }
    }
    if let Some(coverage) = &report.coverage {
        let _ = writeln!(
            out,
            "\nCoverage: {}/{} organism × condition combinations studied ({:.1}%)",
            coverage.studied_combinations,
            coverage.total_combinations,
            coverage.coverage_percentage
        );
        for gap in &report.combination_gaps {
            let _ = writeln!(out, "  {} × {}: {}", gap.organism, gap.condition, gap.status);
        }
    }
    out
}

pub fn format_trends(report: &TrendsReport) -> String {
    if report.is_empty() {
        return "No trend data available.\n".to_string();
    }
    let mut out = String::from("Research Trends\n");
    if let Some(temporal) = &report.temporal {
        let _ = writeln!(
            out,
            "\nResearch Velocity: {:+.1}% ({}), peak {} with {} papers",
            temporal.growth_rate, temporal.trend, temporal.peak_year, temporal.peak_papers
        );
    }
    for (title, series) in [
        ("Research by Year", &report.by_year),
        ("Top Organisms Studied", &report.top_organisms),
        ("Top Research Topics", &report.top_topics),
    ] {
        if series.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}", title);
        let max = series.iter().map(|p| p.value).fold(0.0, f64::max);
        for point in series {
            let width = if max > 0.0 {
                ((point.value / max) * 30.0).round() as usize
            } else {
                0
            };
            let _ = writeln!(
                out,
                "  {:<28} {:>6} {}",
                point.label,
                point.value,
                "█".repeat(width)
            );
        }
    }
    if !report.emerging_areas.is_empty() {
        out.push_str("\nEmerging Research Areas\n");
        for area in &report.emerging_areas {
            let _ = writeln!(
                out,
                "  {:<28} {:+.0}% growth, {} recent of {} papers",
                area.topic, area.growth_rate, area.recent_papers, area.total_papers
            );
        }
    }
    if !report.organism_trends.is_empty() {
        out.push_str("\nOrganism Research Velocity\n");
        for org in &report.organism_trends {
            let _ = writeln!(
                out,
                "  {:<28} {:+.0}% ({}), {} papers",
                org.organism, org.velocity, org.status, org.total_papers
            );
        }
    }
    if !report.collaboration_network.is_empty() {
        out.push_str("\nCross-Organism Research Connections\n");
        for link in &report.collaboration_network {
            let _ = writeln!(
                out,
                "  {} ↔ {}: {} shared papers",
                link.organism1, link.organism2, link.co_occurrences
            );
        }
    }
    if !report.topic_evolution.is_empty() {
        out.push_str("\nTopic Evolution Timeline\n");
        for topic in &report.topic_evolution {
            let _ = writeln!(
                out,
                "  {:<28} {}–{}, momentum {:.2}",
                topic.topic, topic.first_seen, topic.last_seen, topic.recent_momentum
            );
        }
    }
    out
}

pub fn format_filters(options: &FilterOptions) -> String {
    let mut years = options.years.clone();
    years.sort_unstable_by(|a, b| b.cmp(a));
    let years: Vec<String> = years.iter().map(i32::to_string).collect();
    let mut organisms = options.organisms.clone();
    organisms.sort();
    let mut sections = options.sections.clone();
    sections.sort();
    format!(
        "Years: {}\nOrganisms: {}\nSections: {}\n",
        years.join(", "),
        organisms.join(", "),
        sections.join(", ")
    )
}

pub fn format_stats(stats: &DatabaseStats) -> String {
    format!(
        "Papers: {}\nVectors: {}\nIndex fullness: {:.1}%\n",
        stats.total_papers,
        stats.total_vectors,
        stats.index_fullness_percent()
    )
}

pub fn format_personas() -> String {
    let mut out = String::new();
    for profile in personas::all_profiles() {
        let _ = writeln!(out, "{} ({})", profile.name, profile.id);
        let _ = writeln!(out, "  {}", profile.description);
        for query in profile.sample_queries {
            let _ = writeln!(out, "    - {}", query);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spacebio_core::api::endpoints;
    use spacebio_core::api::mock::sample_result;
    use spacebio_core::{MockPaperApi, SearchResponse};
    use std::sync::Arc;

    fn ctx(api: MockPaperApi) -> (AppContext, Arc<MockPaperApi>) {
        let api = Arc::new(api);
        (
            AppContext::with_api(ClientConfig::default(), api.clone()),
            api,
        )
    }

    #[test]
    fn test_format_results_empty() {
        let out = format_results(&[]);
        assert!(out.contains("No results found"));
        assert!(out.contains("Try adjusting your search query or filters"));
    }

    #[test]
    fn test_format_results_lists_labels() {
        let results = vec![
            sample_result("1", "Bone-Loss", 0.7, Some(2019), &["Mouse"], Some("results"), "text"),
            sample_result("2", "Plants", 0.5, None, &[], None, ""),
        ];
        let out = format_results(&results);
        assert!(out.contains("Found 2 results"));
        assert!(out.contains("Bone Loss  [70.0% Excellent Match]"));
        assert!(out.contains("Organisms: Mouse"));
        assert!(out.contains("No text excerpt available"));
    }

    #[test]
    fn test_format_stats() {
        let stats = DatabaseStats {
            total_papers: 608,
            total_vectors: 1200,
            index_fullness: 0.125,
        };
        assert_eq!(
            format_stats(&stats),
            "Papers: 608\nVectors: 1200\nIndex fullness: 12.5%\n"
        );
    }

    #[test]
    fn test_format_personas_has_all() {
        let out = format_personas();
        assert!(out.contains("Scientist (scientist)"));
        assert!(out.contains("Investment Manager (investor)"));
        assert!(out.contains("Mission Architect (architect)"));
    }

    #[tokio::test]
    async fn test_format_trends_and_gaps_from_demo() {
        use spacebio_core::PaperApi;
        let api = MockPaperApi::demo();
        let trends = api.trends().await.unwrap();
        let gaps = api.analyze_gaps(&[]).await.unwrap();
        let out = format_trends(&TrendsReport::from_data(&trends));
        assert!(out.contains("Research by Year"));
        assert!(out.contains("Emerging Research Areas"));
        let out = format_gaps(&GapsReport::from_analysis(&gaps));
        assert!(out.contains("Under-Researched Areas"));
        assert!(out.contains("Coverage: 15/24"));
    }

    #[tokio::test]
    async fn test_search_helper_sends_filters() {
        let (ctx, api) = ctx(MockPaperApi::demo());
        let filters = SearchFilters {
            organisms: Some(vec!["Mouse".into()]),
            ..Default::default()
        };
        let results = search(&ctx, "muscle", filters, Some(3)).await.unwrap();
        assert!(results.len() <= 3);
        let request = &api.search_requests()[0];
        assert_eq!(request.top_k, 3);
        assert!(request.filters.has_organism("Mouse"));
    }

    #[tokio::test]
    async fn test_search_helper_empty_organisms_normalized() {
        let (ctx, api) = ctx(MockPaperApi::demo());
        let filters = SearchFilters {
            organisms: Some(vec![]),
            ..Default::default()
        };
        search(&ctx, "q", filters, None).await.unwrap();
        assert!(api.search_requests()[0].filters.is_empty());
        assert_eq!(api.search_requests()[0].top_k, 25);
    }

    #[tokio::test]
    async fn test_search_helper_reports_generic_failure() {
        let (ctx, api) = ctx(MockPaperApi::demo());
        api.set_failing(endpoints::SEARCH, true);
        let err = search(&ctx, "q", SearchFilters::default(), None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to search. Please check your backend connection."
        );
    }

    #[tokio::test]
    async fn test_stats_command_uses_cache() {
        let (ctx, api) = ctx(MockPaperApi::demo());
        handle_command(Commands::Stats { json: true }, &ctx).await.unwrap();
        handle_command(Commands::Stats { json: false }, &ctx).await.unwrap();
        assert_eq!(api.calls(endpoints::STATS), 1);
    }

    #[test]
    fn test_search_response_json_shape() {
        let response = SearchResponse::default();
        let value = serde_json::to_value(&response).unwrap();
        assert!(value["results"].as_array().unwrap().is_empty());
    }
}
