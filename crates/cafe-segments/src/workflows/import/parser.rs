use super::normalizer::{normalize_id, parse_count, parse_decimal};
use crate::workflows::segmentation::{ReviewInput, ValidationError, VenueId, VenueInput};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const DELIMITER: u8 = b';';

#[derive(Debug)]
pub(crate) enum RowError {
    Csv(csv::Error),
    MissingColumn { column: &'static str },
    Invalid { row: usize, source: ValidationError },
}

impl From<csv::Error> for RowError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

const VENUE_ID_COLUMN: &str = "Id";
const VENUE_NAME_COLUMN: &str = "OrganizationName";
const VENUE_ADDRESS_COLUMN: &str = "OrganizationAddress";
const RATING_COLUMN: &str = "RateStars";
const REVIEW_COUNT_COLUMN: &str = "ReviewsTotalCount";
const REVIEW_VENUE_COLUMN: &str = "OrganizationId";
const REVIEW_TEXT_COLUMN: &str = "CleanedReview";

/// Name used when a row carries neither a name nor an address.
const UNKNOWN_VENUE_NAME: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct VenueRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(
        rename = "OrganizationName",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    name: Option<String>,
    #[serde(
        rename = "OrganizationAddress",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    address: Option<String>,
    #[serde(
        rename = "RateStars",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    rating: Option<String>,
    #[serde(
        rename = "ReviewsTotalCount",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    review_count: Option<String>,
}

impl VenueRow {
    fn into_input(self) -> Result<VenueInput, ValidationError> {
        let id = normalize_id(&self.id);
        let rating = match self.rating {
            Some(raw) => Some(parse_decimal(&raw).ok_or_else(|| ValidationError::MalformedRating {
                venue_id: VenueId::new(id.clone()),
                raw,
            })?),
            None => None,
        };
        let review_count = match self.review_count {
            Some(raw) => Some(parse_count(&raw).ok_or_else(|| {
                ValidationError::MalformedReviewCount {
                    venue_id: VenueId::new(id.clone()),
                    raw,
                }
            })?),
            None => None,
        };
        let name = display_name(self.name.as_deref(), self.address.as_deref());

        Ok(VenueInput {
            id,
            name,
            rating,
            review_count,
        })
    }
}

/// Explicit name first, else the leading segment of the address.
fn display_name(name: Option<&str>, address: Option<&str>) -> String {
    if let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    address
        .and_then(|address| address.split(',').next())
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .unwrap_or(UNKNOWN_VENUE_NAME)
        .to_string()
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    #[serde(rename = "OrganizationId")]
    venue_id: String,
    #[serde(rename = "CleanedReview", default)]
    text: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(DELIMITER).trim(csv::Trim::All);
    builder
}

fn has_column(headers: &csv::StringRecord, column: &str) -> bool {
    headers
        .iter()
        .any(|header| normalize_id(header) == column)
}

/// Fails on the first of `columns` absent from the header row.
fn require_columns(
    headers: &csv::StringRecord,
    columns: &[&'static str],
) -> Result<(), RowError> {
    match columns
        .iter()
        .copied()
        .find(|column| !has_column(headers, column))
    {
        Some(column) => Err(RowError::MissingColumn { column }),
        None => Ok(()),
    }
}

/// Data rows are numbered from 2; row 1 is the header.
fn data_row(index: usize) -> usize {
    index + 2
}

pub(crate) fn parse_venues<R: Read>(reader: R) -> Result<Vec<VenueInput>, RowError> {
    let mut csv_reader = reader_builder().from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    require_columns(&headers, &[VENUE_ID_COLUMN, RATING_COLUMN, REVIEW_COUNT_COLUMN])?;
    if !has_column(&headers, VENUE_NAME_COLUMN) && !has_column(&headers, VENUE_ADDRESS_COLUMN) {
        return Err(RowError::MissingColumn {
            column: VENUE_NAME_COLUMN,
        });
    }

    let mut venues = Vec::new();
    for (index, record) in csv_reader.deserialize::<VenueRow>().enumerate() {
        let row = record?;
        let input = row.into_input().map_err(|source| RowError::Invalid {
            row: data_row(index),
            source,
        })?;
        venues.push(input);
    }

    Ok(venues)
}

pub(crate) fn parse_reviews<R: Read>(reader: R) -> Result<Vec<ReviewInput>, RowError> {
    let mut csv_reader = reader_builder().from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    require_columns(&headers, &[REVIEW_VENUE_COLUMN, REVIEW_TEXT_COLUMN])?;

    let mut reviews = Vec::new();
    for record in csv_reader.deserialize::<ReviewRow>() {
        let row = record?;
        let tokens = row
            .text
            .as_deref()
            .map(|text| text.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        reviews.push(ReviewInput {
            venue_id: normalize_id(&row.venue_id),
            tokens,
        });
    }

    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_rows_parse_decimal_commas() {
        let csv = "Id;OrganizationName;RateStars;ReviewsTotalCount\n7;Kopi Klotok;4,6;1520\n";
        let venues = parse_venues(csv.as_bytes()).expect("venues parse");
        assert_eq!(
            venues,
            vec![VenueInput {
                id: "7".to_string(),
                name: "Kopi Klotok".to_string(),
                rating: Some(4.6),
                review_count: Some(1520),
            }]
        );
    }

    #[test]
    fn blank_rating_is_missing_not_zero() {
        let csv = "Id;OrganizationName;RateStars;ReviewsTotalCount\n7;Kopi;;12\n";
        let venues = parse_venues(csv.as_bytes()).expect("row parses");
        assert_eq!(venues[0].rating, None);
    }

    #[test]
    fn malformed_rating_reports_row_number() {
        let csv = "Id;OrganizationName;RateStars;ReviewsTotalCount\n1;A;4,1;3\n2;B;great;5\n";
        match parse_venues(csv.as_bytes()) {
            Err(RowError::Invalid { row, source }) => {
                assert_eq!(row, 3);
                assert!(matches!(source, ValidationError::MalformedRating { .. }));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn review_rows_split_cleaned_text() {
        let csv = "OrganizationId;CleanedReview\n7;wifi  kencang colok\n7;\n";
        let reviews = parse_reviews(csv.as_bytes()).expect("reviews parse");
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].tokens, vec!["wifi", "kencang", "colok"]);
        assert!(reviews[1].tokens.is_empty());
    }

    #[test]
    fn review_table_without_cleaned_text_is_rejected() {
        let csv = "OrganizationId;ReviewTextOriginal\n7;tempat nyaman buat kerja\n";
        match parse_reviews(csv.as_bytes()) {
            Err(RowError::MissingColumn { column }) => assert_eq!(column, "CleanedReview"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn venue_table_without_rating_column_is_rejected() {
        let csv = "Id;OrganizationName;ReviewsTotalCount\n7;Kopi;12\n";
        match parse_venues(csv.as_bytes()) {
            Err(RowError::MissingColumn { column }) => assert_eq!(column, "RateStars"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn venue_table_needs_a_name_or_address_column() {
        let csv = "Id;RateStars;ReviewsTotalCount\n7;4,2;12\n";
        assert!(matches!(
            parse_venues(csv.as_bytes()),
            Err(RowError::MissingColumn {
                column: "OrganizationName"
            })
        ));
    }

    #[test]
    fn name_falls_back_to_leading_address_segment() {
        let csv = "Id;OrganizationAddress;RateStars;ReviewsTotalCount\n\
1;Kopi Kalen, Jl. Kaliurang KM 5, Sleman;4,7;310\n\
2;;4,1;8\n";
        let venues = parse_venues(csv.as_bytes()).expect("venues parse");
        assert_eq!(venues[0].name, "Kopi Kalen");
        assert_eq!(venues[1].name, "Unknown");
    }

    #[test]
    fn explicit_name_wins_over_address() {
        let csv = "Id;OrganizationName;OrganizationAddress;RateStars;ReviewsTotalCount\n\
1;Blanco Coffee;Blanco, Jl. Cik Di Tiro;4,5;1200\n\
2;;Roastery Lab, Jl. Magelang;4,6;845\n";
        let venues = parse_venues(csv.as_bytes()).expect("venues parse");
        assert_eq!(venues[0].name, "Blanco Coffee");
        assert_eq!(venues[1].name, "Roastery Lab");
    }
}
