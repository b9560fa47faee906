use super::super::domain::Segment;
use super::super::pipeline::ScoredVenue;
use super::super::policy::Thresholds;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SegmentCountEntry {
    pub segment: Segment,
    pub segment_label: &'static str,
    pub venues: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationEntry {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub review_count: u32,
    pub norm_productivity_score: f64,
    pub norm_social_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentRecommendations {
    pub segment: Segment,
    pub segment_label: &'static str,
    pub venues: Vec<RecommendationEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentationReport {
    pub config_version: String,
    pub threshold_policy: &'static str,
    pub thresholds: Thresholds,
    pub top_n: usize,
    pub venue_count: usize,
    pub segment_counts: Vec<SegmentCountEntry>,
    pub recommendations: Vec<SegmentRecommendations>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub venues: Vec<ScoredVenue>,
}
