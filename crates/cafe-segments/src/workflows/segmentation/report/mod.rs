mod summary;
pub mod views;

pub use views::{RecommendationEntry, SegmentCountEntry, SegmentRecommendations, SegmentationReport};
