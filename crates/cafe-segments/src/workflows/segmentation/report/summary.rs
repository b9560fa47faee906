use super::super::pipeline::{ScoredVenue, SegmentationRun};
use super::super::domain::Segment;
use super::views::{
    RecommendationEntry, SegmentCountEntry, SegmentRecommendations, SegmentationReport,
};

impl RecommendationEntry {
    fn from_ranked(rank: usize, venue: &ScoredVenue) -> Self {
        Self {
            rank,
            id: venue.id.to_string(),
            name: venue.name.clone(),
            rating: venue.rating,
            review_count: venue.review_count,
            norm_productivity_score: venue.norm_productivity_score,
            norm_social_score: venue.norm_social_score,
        }
    }
}

impl SegmentationRun {
    /// Summarises the run. `include_venues` embeds the full scored table.
    pub fn report(&self, include_venues: bool) -> SegmentationReport {
        let segment_counts = self
            .segment_counts()
            .into_iter()
            .map(|(segment, venues)| SegmentCountEntry {
                segment,
                segment_label: segment.label(),
                venues,
            })
            .collect();

        let recommendations = Segment::ordered()
            .into_iter()
            .map(|segment| SegmentRecommendations {
                segment,
                segment_label: segment.label(),
                venues: self
                    .recommend(segment)
                    .into_iter()
                    .enumerate()
                    .map(|(index, venue)| RecommendationEntry::from_ranked(index + 1, venue))
                    .collect(),
            })
            .collect();

        SegmentationReport {
            config_version: self.config_version.clone(),
            threshold_policy: self.threshold_policy.label(),
            thresholds: self.thresholds,
            top_n: self.top_n,
            venue_count: self.venues.len(),
            segment_counts,
            recommendations,
            venues: if include_venues {
                self.venues.clone()
            } else {
                Vec::new()
            },
        }
    }
}
