use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub String);

impl VenueId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One review reduced to the cleaned tokens produced by upstream preprocessing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub tokens: Vec<String>,
}

impl Review {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits already cleaned review text on whitespace.
    pub fn from_cleaned_text(text: &str) -> Self {
        Self::new(text.split_whitespace())
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Validated venue metadata together with the reviews it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub rating: f64,
    pub review_count: u32,
    pub reviews: Vec<Review>,
}

impl Venue {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rating: f64,
        review_count: u32,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyVenueId);
        }
        let id = VenueId(id);
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange {
                venue_id: id,
                value: rating,
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            rating,
            review_count,
            reviews: Vec::new(),
        })
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }
}

/// Unvalidated venue row as supplied by callers (JSON payloads, CSV adapter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueInput {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<i64>,
}

impl TryFrom<VenueInput> for Venue {
    type Error = ValidationError;

    fn try_from(input: VenueInput) -> Result<Self, Self::Error> {
        let VenueInput {
            id,
            name,
            rating,
            review_count,
        } = input;

        let venue_id = VenueId(id.clone());
        let rating = rating.ok_or_else(|| ValidationError::MissingRating {
            venue_id: venue_id.clone(),
        })?;
        let review_count = review_count.ok_or_else(|| ValidationError::MissingReviewCount {
            venue_id: venue_id.clone(),
        })?;
        let review_count =
            u32::try_from(review_count).map_err(|_| ValidationError::MalformedReviewCount {
                venue_id,
                raw: review_count.to_string(),
            })?;

        Venue::new(id, name, rating, review_count)
    }
}

/// Review row keyed by the venue it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub venue_id: String,
    #[serde(default)]
    pub tokens: Vec<String>,
}

/// Attaches every review to its venue, preserving venue input order.
pub fn assemble_venues<I>(venues: Vec<Venue>, reviews: I) -> Result<Vec<Venue>, ValidationError>
where
    I: IntoIterator<Item = ReviewInput>,
{
    let mut index: HashMap<VenueId, usize> = HashMap::with_capacity(venues.len());
    for (position, venue) in venues.iter().enumerate() {
        if index.insert(venue.id.clone(), position).is_some() {
            return Err(ValidationError::DuplicateVenue {
                venue_id: venue.id.clone(),
            });
        }
    }

    let mut venues = venues;
    for review in reviews {
        let venue_id = VenueId(review.venue_id);
        let Some(&position) = index.get(&venue_id) else {
            return Err(ValidationError::UnknownVenue { venue_id });
        };
        if let Some(venue) = venues.get_mut(position) {
            venue.reviews.push(Review {
                tokens: review.tokens,
            });
        }
    }

    Ok(venues)
}

/// The four quadrants a venue can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    AllRounder,
    ProductivityHub,
    SocialHotspot,
    LowEngagement,
}

impl Segment {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ProductivityHub,
            Self::SocialHotspot,
            Self::AllRounder,
            Self::LowEngagement,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AllRounder => "All-Rounder",
            Self::ProductivityHub => "Productivity Hub",
            Self::SocialHotspot => "Social Hotspot",
            Self::LowEngagement => "Neither/Low-Engagement",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("venue id must not be empty")]
    EmptyVenueId,
    #[error("venue {venue_id} is missing a rating")]
    MissingRating { venue_id: VenueId },
    #[error("venue {venue_id} has unparseable rating '{raw}'")]
    MalformedRating { venue_id: VenueId, raw: String },
    #[error("venue {venue_id} has rating {value} outside 0-5")]
    RatingOutOfRange { venue_id: VenueId, value: f64 },
    #[error("venue {venue_id} is missing a review count")]
    MissingReviewCount { venue_id: VenueId },
    #[error("venue {venue_id} has invalid review count '{raw}'")]
    MalformedReviewCount { venue_id: VenueId, raw: String },
    #[error("venue {venue_id} appears more than once")]
    DuplicateVenue { venue_id: VenueId },
    #[error("review references unknown venue {venue_id}")]
    UnknownVenue { venue_id: VenueId },
}
