//! Reshape `/trends` data into chart-ready series.

use crate::types::{CollaborationLink, EmergingArea, TemporalAnalysis, TrendCount, TrendsData};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const TRENDS_FAILED_MESSAGE: &str = "Failed to load trends data.";

const TOP_ORGANISMS: usize = 8;
const TOP_TOPICS: usize = 10;
const TOP_ORGANISM_TRENDS: usize = 8;
const TOP_TOPIC_EVOLUTION: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganismSeries {
    pub organism: String,
    pub total_papers: u64,
    pub velocity: f64,
    pub status: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicSeries {
    pub topic: String,
    pub recent_momentum: f64,
    pub first_seen: String,
    pub last_seen: String,
    pub points: Vec<ChartPoint>,
}

/// Everything the trends view draws. Empty vectors mean "skip this block".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendsReport {
    pub by_year: Vec<ChartPoint>,
    pub top_organisms: Vec<ChartPoint>,
    pub top_topics: Vec<ChartPoint>,
    pub temporal: Option<TemporalAnalysis>,
    pub emerging_areas: Vec<EmergingArea>,
    pub organism_trends: Vec<OrganismSeries>,
    pub collaboration_network: Vec<CollaborationLink>,
    pub topic_evolution: Vec<TopicSeries>,
}

impl TrendsReport {
    pub fn from_data(data: &TrendsData) -> Self {
        Self {
            by_year: chronological(&data.research_by_year),
            top_organisms: largest(&data.top_organisms, TOP_ORGANISMS),
            top_topics: largest(&data.top_topics, TOP_TOPICS),
            temporal: data.temporal_analysis.clone(),
            emerging_areas: data.emerging_areas.clone().unwrap_or_default(),
            organism_trends: data
                .organism_trends_by_year
                .iter()
                .flatten()
                .take(TOP_ORGANISM_TRENDS)
                .map(|t| OrganismSeries {
                    organism: t.organism.clone(),
                    total_papers: t.total_papers,
                    velocity: t.velocity,
                    status: t.status.clone(),
                    points: chronological(&t.trend_data),
                })
                .collect(),
            collaboration_network: data.collaboration_network.clone().unwrap_or_default(),
            topic_evolution: data
                .topic_evolution
                .iter()
                .flatten()
                .take(TOP_TOPIC_EVOLUTION)
                .map(|t| TopicSeries {
                    topic: t.topic.clone(),
                    recent_momentum: t.recent_momentum,
                    first_seen: t.first_seen.clone(),
                    last_seen: t.last_seen.clone(),
                    points: chronological(&t.timeline),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
            && self.top_organisms.is_empty()
            && self.top_topics.is_empty()
            && self.temporal.is_none()
            && self.emerging_areas.is_empty()
            && self.organism_trends.is_empty()
            && self.collaboration_network.is_empty()
            && self.topic_evolution.is_empty()
    }
}

fn points(map: &BTreeMap<String, TrendCount>) -> Vec<ChartPoint> {
    map.iter()
        .map(|(label, count)| ChartPoint {
            label: label.clone(),
            value: count.value(),
        })
        .collect()
}

/// Ascending by year. Labels that are not years sort after the years.
fn chronological(map: &BTreeMap<String, TrendCount>) -> Vec<ChartPoint> {
    let mut series = points(map);
    series.sort_by(|a, b| match (a.label.parse::<i32>(), b.label.parse::<i32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.label.cmp(&b.label),
    });
    series
}

/// The `limit` largest values, descending. Ties keep label order.
fn largest(map: &BTreeMap<String, TrendCount>, limit: usize) -> Vec<ChartPoint> {
    let mut series = points(map);
    series.sort_by(|a, b| b.value.total_cmp(&a.value));
    series.truncate(limit);
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrganismTrend;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_year_series_sorted_numerically() {
        let data: TrendsData = serde_json::from_value(json!({
            "research_by_year": {"2021": 5, "998": 1, "2019": 3, "unknown": 2}
        }))
        .unwrap();
        let report = TrendsReport::from_data(&data);
        let labels: Vec<_> = report.by_year.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["998", "2019", "2021", "unknown"]);
    }

    #[test]
    fn test_top_organisms_capped_at_eight() {
        let organisms: serde_json::Map<String, serde_json::Value> =
            (0..12).map(|i| (format!("org{}", i), json!(i))).collect();
        let data: TrendsData =
            serde_json::from_value(json!({ "top_organisms": organisms })).unwrap();
        let report = TrendsReport::from_data(&data);
        assert_eq!(report.top_organisms.len(), 8);
        assert_eq!(report.top_organisms[0].label, "org11");
        assert_eq!(report.top_organisms[0].value, 11.0);
    }

    #[test]
    fn test_optional_blocks_absent() {
        let report = TrendsReport::from_data(&TrendsData::default());
        assert!(report.is_empty());
        assert!(report.temporal.is_none());
    }

    #[test]
    fn test_organism_trends_reshaped() {
        let data = TrendsData {
            organism_trends_by_year: Some(vec![OrganismTrend {
                organism: "Mouse".into(),
                total_papers: 10,
                trend_data: [
                    ("2020".to_string(), TrendCount::Count(4)),
                    ("2018".to_string(), TrendCount::Count(6)),
                ]
                    .into_iter()
                    .collect(),
                velocity: -33.0,
                status: "declining".into(),
            }]),
            ..Default::default()
        };
        let report = TrendsReport::from_data(&data);
        assert_eq!(report.organism_trends.len(), 1);
        assert_eq!(report.organism_trends[0].points[0].label, "2018");
        assert!(!report.is_empty());
    }
}
