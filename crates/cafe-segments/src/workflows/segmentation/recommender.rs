use super::domain::Segment;
use super::pipeline::ScoredVenue;
use std::cmp::Ordering;

pub const DEFAULT_TOP_N: usize = 3;

/// Rating first, then review count, both descending.
fn popularity_order(left: &ScoredVenue, right: &ScoredVenue) -> Ordering {
    right
        .rating
        .total_cmp(&left.rating)
        .then_with(|| right.review_count.cmp(&left.review_count))
}

/// Top `top_n` venues of `segment`. Remaining ties keep input order.
pub fn recommend(venues: &[ScoredVenue], segment: Segment, top_n: usize) -> Vec<&ScoredVenue> {
    let mut candidates: Vec<&ScoredVenue> = venues
        .iter()
        .filter(|venue| venue.segment == segment)
        .collect();
    // `sort_by` is stable.
    candidates.sort_by(|left, right| popularity_order(left, right));
    candidates.truncate(top_n);
    candidates
}
