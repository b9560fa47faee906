//! Semicolon-delimited CSV adapter for venue metadata and cleaned reviews.

mod normalizer;
mod parser;

use crate::workflows::segmentation::{assemble_venues, ValidationError, Venue};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use parser::{parse_reviews, parse_venues, RowError};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn {
        column: &'static str,
    },
    InvalidVenue {
        row: usize,
        source: ValidationError,
    },
    Validation(ValidationError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read venue data: {}", err),
            ImportError::Csv(err) => write!(f, "invalid venue CSV data: {}", err),
            ImportError::MissingColumn { column } => {
                write!(f, "CSV header is missing required column '{}'", column)
            }
            ImportError::InvalidVenue { row, source } => {
                write!(f, "invalid venue on CSV row {}: {}", row, source)
            }
            ImportError::Validation(err) => write!(f, "venue data rejected: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::MissingColumn { .. } => None,
            ImportError::InvalidVenue { source, .. } => Some(source),
            ImportError::Validation(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<ValidationError> for ImportError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<RowError> for ImportError {
    fn from(err: RowError) -> Self {
        match err {
            RowError::Csv(err) => Self::Csv(err),
            RowError::MissingColumn { column } => Self::MissingColumn { column },
            RowError::Invalid { row, source } => Self::InvalidVenue { row, source },
        }
    }
}

pub struct VenueImporter;

impl VenueImporter {
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        venues: P,
        reviews: Q,
    ) -> Result<Vec<Venue>, ImportError> {
        let venues = std::fs::File::open(venues)?;
        let reviews = std::fs::File::open(reviews)?;
        Self::from_readers(venues, reviews)
    }

    /// Reads both tables and attaches each review to its venue. Venue order
    /// follows the venue table.
    pub fn from_readers<V: Read, R: Read>(
        venues: V,
        reviews: R,
    ) -> Result<Vec<Venue>, ImportError> {
        let validated = Self::from_venue_reader(venues)?;
        let reviews = parse_reviews(reviews)?;
        let review_count = reviews.len();
        let assembled = assemble_venues(validated, reviews)?;
        debug!(
            venues = assembled.len(),
            reviews = review_count,
            "imported venue tables"
        );

        Ok(assembled)
    }

    /// Reads the venue table alone; every venue starts without reviews.
    pub fn from_venue_reader<V: Read>(venues: V) -> Result<Vec<Venue>, ImportError> {
        let inputs = parse_venues(venues)?;
        let mut validated = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.into_iter().enumerate() {
            let venue = Venue::try_from(input).map_err(|source| ImportError::InvalidVenue {
                row: index + 2,
                source,
            })?;
            validated.push(venue);
        }
        Ok(validated)
    }
}
