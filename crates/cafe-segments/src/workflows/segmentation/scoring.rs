use super::domain::{Review, Venue};
use super::lexicon::{Category, Lexicon};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Pair of per-category scores. Used for per-review hits, raw venue totals and
/// normalized values alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub productivity: f64,
    pub social: f64,
}

impl CategoryScores {
    pub const ZERO: Self = Self {
        productivity: 0.0,
        social: 0.0,
    };

    pub const fn new(productivity: f64, social: f64) -> Self {
        Self {
            productivity,
            social,
        }
    }

    pub const fn get(self, category: Category) -> f64 {
        match category {
            Category::Productivity => self.productivity,
            Category::Social => self.social,
        }
    }
}

impl Add for CategoryScores {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            productivity: self.productivity + rhs.productivity,
            social: self.social + rhs.social,
        }
    }
}

impl AddAssign for CategoryScores {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for CategoryScores {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Weighted keyword hits for one token sequence. Repeated keywords count every
/// time they occur.
pub fn score_tokens<S: AsRef<str>>(tokens: &[S], lexicon: &Lexicon) -> CategoryScores {
    let mut hits = CategoryScores::ZERO;
    for token in tokens {
        let Some((productivity, social)) = lexicon.lookup(token.as_ref()) else {
            continue;
        };
        hits.productivity += productivity.unwrap_or(0.0);
        hits.social += social.unwrap_or(0.0);
    }
    hits
}

pub fn score_review(review: &Review, lexicon: &Lexicon) -> CategoryScores {
    score_tokens(&review.tokens, lexicon)
}

/// Raw venue scores: the sum of every review's hits.
pub fn aggregate_reviews(reviews: &[Review], lexicon: &Lexicon) -> CategoryScores {
    reviews
        .iter()
        .map(|review| score_review(review, lexicon))
        .sum()
}

pub fn raw_venue_scores(venue: &Venue, lexicon: &Lexicon) -> CategoryScores {
    aggregate_reviews(&venue.reviews, lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::segmentation::lexicon::LexiconEntry;

    fn cafe_lexicon() -> Lexicon {
        Lexicon::from_entries(vec![
            LexiconEntry::new("wifi", Category::Productivity, 2.0),
            LexiconEntry::new("outlet", Category::Productivity, 1.5),
            LexiconEntry::new("vibe", Category::Social, 1.0),
        ])
        .expect("lexicon loads")
    }

    #[test]
    fn repeated_keywords_each_contribute() {
        let hits = score_tokens(&["wifi", "wifi", "outlet"], &cafe_lexicon());
        assert_eq!(hits, CategoryScores::new(5.5, 0.0));
    }

    #[test]
    fn empty_review_scores_zero() {
        let hits = score_review(&Review::default(), &cafe_lexicon());
        assert_eq!(hits, CategoryScores::ZERO);
    }

    #[test]
    fn unknown_tokens_contribute_nothing() {
        let hits = score_tokens(&["kopi", "enak", "vibe"], &cafe_lexicon());
        assert_eq!(hits, CategoryScores::new(0.0, 1.0));
    }

    #[test]
    fn dual_category_keyword_feeds_both_axes() {
        let lexicon = Lexicon::from_entries(vec![
            LexiconEntry::new("santai", Category::Productivity, 0.5),
            LexiconEntry::new("santai", Category::Social, 1.0),
        ])
        .expect("lexicon loads");
        let hits = score_tokens(&["santai", "santai"], &lexicon);
        assert_eq!(hits, CategoryScores::new(1.0, 2.0));
    }

    #[test]
    fn aggregation_sums_reviews() {
        let lexicon = cafe_lexicon();
        let reviews = vec![
            Review::new(["wifi", "vibe"]),
            Review::new(["outlet"]),
            Review::default(),
        ];
        let expected: CategoryScores = reviews
            .iter()
            .map(|review| score_review(review, &lexicon))
            .sum();
        let total = aggregate_reviews(&reviews, &lexicon);
        assert_eq!(total, expected);
        assert_eq!(total, CategoryScores::new(3.5, 1.0));
        assert_eq!(aggregate_reviews(&[], &lexicon), CategoryScores::ZERO);
    }
}
