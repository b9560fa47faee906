//! Review-driven venue segmentation.
//!
//! Reviews are scored against a keyword [`Lexicon`], summed per venue,
//! min-max normalized per axis across the batch, and placed into one of four
//! quadrants. [`SegmentationPipeline`] composes the stages; each stage is also
//! exposed as a plain function.

pub mod config;
pub mod domain;
pub mod export;
pub mod lexicon;
pub mod normalizer;
pub mod pipeline;
pub mod policy;
pub mod recommender;
pub mod report;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use config::{load_lexicon, SegmentationConfig, SegmentationConfigError};
pub use domain::{
    assemble_venues, Review, ReviewInput, Segment, ValidationError, Venue, VenueId, VenueInput,
};
pub use export::{write_venue_table, write_venue_table_to_path};
pub use lexicon::{Category, Lexicon, LexiconEntry, LexiconError};
pub use normalizer::{min_max_normalize, normalize_scores, NormalizedScores, ScoreRange};
pub use pipeline::{ScoredVenue, SegmentationPipeline, SegmentationRun};
pub use policy::{assign_segment, ThresholdPolicy, Thresholds};
pub use recommender::recommend;
pub use report::SegmentationReport;
pub use scoring::{aggregate_reviews, score_review, score_tokens, CategoryScores};
