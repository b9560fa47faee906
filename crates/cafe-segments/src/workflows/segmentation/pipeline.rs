use super::config::SegmentationConfig;
use super::domain::{Segment, ValidationError, Venue, VenueId};
use super::normalizer::normalize_scores;
use super::policy::{assign_segment, ThresholdPolicy, Thresholds};
use super::recommender::recommend;
use super::scoring::{raw_venue_scores, CategoryScores};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Venue row with every score populated. Field names follow the exported
/// table schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredVenue {
    pub id: VenueId,
    pub name: String,
    pub rating: f64,
    pub review_count: u32,
    pub raw_productivity_score: f64,
    pub raw_social_score: f64,
    pub norm_productivity_score: f64,
    pub norm_social_score: f64,
    pub segment: Segment,
}

impl ScoredVenue {
    pub const fn raw_scores(&self) -> CategoryScores {
        CategoryScores::new(self.raw_productivity_score, self.raw_social_score)
    }

    pub const fn normalized_scores(&self) -> CategoryScores {
        CategoryScores::new(self.norm_productivity_score, self.norm_social_score)
    }
}

/// Orchestrates lexicon scoring, aggregation, normalization and segmentation
/// over one batch of venues.
#[derive(Debug, Clone)]
pub struct SegmentationPipeline {
    config: SegmentationConfig,
}

impl SegmentationPipeline {
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    pub fn run(&self, venues: &[Venue]) -> Result<SegmentationRun, ValidationError> {
        ensure_unique_ids(venues)?;

        let raw: Vec<CategoryScores> = venues
            .iter()
            .map(|venue| raw_venue_scores(venue, &self.config.lexicon))
            .collect();
        debug!(venues = venues.len(), "scored reviews against lexicon");

        let normalized = normalize_scores(&raw);
        let thresholds = self.config.thresholds.resolve(&normalized);
        debug!(
            policy = self.config.thresholds.label(),
            productivity = thresholds.productivity,
            social = thresholds.social,
            "resolved segment thresholds"
        );

        let scored: Vec<ScoredVenue> = venues
            .iter()
            .zip(raw.iter().zip(&normalized))
            .map(|(venue, (raw, normalized))| ScoredVenue {
                id: venue.id.clone(),
                name: venue.name.clone(),
                rating: venue.rating,
                review_count: venue.review_count,
                raw_productivity_score: raw.productivity,
                raw_social_score: raw.social,
                norm_productivity_score: normalized.productivity(),
                norm_social_score: normalized.social(),
                segment: assign_segment(*normalized, thresholds),
            })
            .collect();

        let run = SegmentationRun {
            config_version: self.config.version.clone(),
            threshold_policy: self.config.thresholds,
            thresholds,
            top_n: self.config.top_n,
            venues: scored,
        };

        let counts = run.segment_counts();
        info!(
            version = %run.config_version,
            venues = run.venues.len(),
            productivity_hubs = counts[0].1,
            social_hotspots = counts[1].1,
            all_rounders = counts[2].1,
            low_engagement = counts[3].1,
            "segmentation run complete"
        );

        Ok(run)
    }
}

fn ensure_unique_ids(venues: &[Venue]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(venues.len());
    for venue in venues {
        if !seen.insert(&venue.id) {
            return Err(ValidationError::DuplicateVenue {
                venue_id: venue.id.clone(),
            });
        }
    }
    Ok(())
}

/// Output of one pipeline run. Normalized values are only meaningful within
/// this run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentationRun {
    pub config_version: String,
    pub threshold_policy: ThresholdPolicy,
    pub thresholds: Thresholds,
    pub top_n: usize,
    pub venues: Vec<ScoredVenue>,
}

impl SegmentationRun {
    pub fn recommend(&self, segment: Segment) -> Vec<&ScoredVenue> {
        recommend(&self.venues, segment, self.top_n)
    }

    /// Venue count per segment in [`Segment::ordered`] order.
    pub fn segment_counts(&self) -> [(Segment, usize); 4] {
        Segment::ordered().map(|segment| {
            let count = self
                .venues
                .iter()
                .filter(|venue| venue.segment == segment)
                .count();
            (segment, count)
        })
    }

    pub fn venue(&self, id: &str) -> Option<&ScoredVenue> {
        self.venues.iter().find(|venue| venue.id.as_str() == id)
    }
}
