use crate::workflows::segmentation::domain::{Review, Segment, Venue, VenueId};
use crate::workflows::segmentation::lexicon::{Category, Lexicon, LexiconEntry};
use crate::workflows::segmentation::pipeline::ScoredVenue;
use crate::workflows::segmentation::{SegmentationConfig, SegmentationPipeline};

pub(super) fn cafe_lexicon() -> Lexicon {
    Lexicon::from_entries(vec![
        LexiconEntry::new("wifi", Category::Productivity, 2.0),
        LexiconEntry::new("outlet", Category::Productivity, 1.5),
        LexiconEntry::new("vibe", Category::Social, 1.0),
        LexiconEntry::new("friends", Category::Social, 2.0),
    ])
    .expect("cafe lexicon loads")
}

pub(super) fn pipeline() -> SegmentationPipeline {
    SegmentationPipeline::new(SegmentationConfig::standard().with_lexicon(cafe_lexicon()))
}

pub(super) fn venue(id: &str, rating: f64, review_count: u32, reviews: &[&[&str]]) -> Venue {
    Venue::new(id, format!("Kopi {id}"), rating, review_count)
        .expect("valid venue")
        .with_reviews(reviews.iter().map(|tokens| Review::new(tokens.iter().copied())).collect())
}

pub(super) fn scored(id: &str, rating: f64, review_count: u32, segment: Segment) -> ScoredVenue {
    ScoredVenue {
        id: VenueId::new(id),
        name: format!("Kopi {id}"),
        rating,
        review_count,
        raw_productivity_score: 0.0,
        raw_social_score: 0.0,
        norm_productivity_score: 0.0,
        norm_social_score: 0.0,
        segment,
    }
}

pub(super) fn ids(venues: &[&ScoredVenue]) -> Vec<String> {
    venues.iter().map(|venue| venue.id.to_string()).collect()
}
