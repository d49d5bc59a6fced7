//! Reshape `/gaps` output for display.

use crate::types::{CoverageSummary, GapAnalysis, GapScore, OrganismConditionGap};

pub const GAPS_FAILED_MESSAGE: &str =
    "Failed to load gap analysis. Please check your backend connection.";

const TOP_SCORED_GAPS: usize = 10;
const TOP_COMBINATION_GAPS: usize = 10;

/// A titled list of findings.
#[derive(Debug, Clone, PartialEq)]
pub struct GapSection {
    pub title: &'static str,
    pub caption: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapsReport {
    /// Non-empty sections only, in display order.
    pub sections: Vec<GapSection>,
    /// Highest severity first.
    pub scored_gaps: Vec<GapScore>,
    pub combination_gaps: Vec<OrganismConditionGap>,
    pub coverage: Option<CoverageSummary>,
}

impl GapsReport {
    pub fn from_analysis(analysis: &GapAnalysis) -> Self {
        let sections = [
            (
                "Under-Researched Areas",
                "These topics have limited coverage in the current research database",
                &analysis.under_researched_areas,
            ),
            (
                "Missing Research Approaches",
                "Methodologies or perspectives that could enhance the research",
                &analysis.missing_approaches,
            ),
            (
                "Critical Unanswered Questions",
                "Key questions that need to be addressed in future research",
                &analysis.critical_questions,
            ),
            (
                "Recommendations",
                "Strategic suggestions for future research directions",
                &analysis.recommendations,
            ),
        ]
        .into_iter()
        .filter(|(_, _, items)| !items.is_empty())
        .map(|(title, caption, items)| GapSection {
            title,
            caption,
            items: items.clone(),
        })
        .collect();

        let mut scored_gaps = analysis.quantitative_scoring.clone().unwrap_or_default();
        scored_gaps.sort_by(|a, b| b.severity_score.total_cmp(&a.severity_score));
        scored_gaps.truncate(TOP_SCORED_GAPS);

        let combination_gaps = analysis
            .comparative_analysis
            .iter()
            .flat_map(|c| c.organism_condition_gaps.iter().cloned())
            .take(TOP_COMBINATION_GAPS)
            .collect();

        Self {
            sections,
            scored_gaps,
            combination_gaps,
            coverage: analysis.comparative_analysis.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
            && self.scored_gaps.is_empty()
            && self.combination_gaps.is_empty()
            && self.coverage.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sections_skipped() {
        let analysis = GapAnalysis {
            under_researched_areas: vec!["Fungi".into()],
            recommendations: vec!["Fly more plants".into()],
            ..Default::default()
        };
        let report = GapsReport::from_analysis(&analysis);
        let titles: Vec<_> = report.sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, ["Under-Researched Areas", "Recommendations"]);
        assert!(report.coverage.is_none());
    }

    #[test]
    fn test_scored_gaps_sorted_and_capped() {
        let analysis = GapAnalysis {
            quantitative_scoring: Some(
                (0..15)
                    .map(|i| GapScore {
                        area: format!("area{}", i),
                        severity_score: i as f64 / 15.0,
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        };
        let report = GapsReport::from_analysis(&analysis);
        assert_eq!(report.scored_gaps.len(), 10);
        assert_eq!(report.scored_gaps[0].area, "area14");
    }

    #[test]
    fn test_coverage_and_combinations() {
        let analysis = GapAnalysis {
            comparative_analysis: Some(CoverageSummary {
                organism_condition_gaps: (0..12)
                    .map(|i| OrganismConditionGap {
                        organism: format!("org{}", i),
                        condition: "radiation".into(),
                        status: "unstudied".into(),
                    })
                    .collect(),
                total_combinations: 20,
                studied_combinations: 8,
                coverage_percentage: 40.0,
            }),
            ..Default::default()
        };
        let report = GapsReport::from_analysis(&analysis);
        assert_eq!(report.combination_gaps.len(), 10);
        assert_eq!(report.coverage.unwrap().coverage_percentage, 40.0);
    }

    #[test]
    fn test_empty_analysis() {
        assert!(GapsReport::from_analysis(&GapAnalysis::default()).is_empty());
    }
}
