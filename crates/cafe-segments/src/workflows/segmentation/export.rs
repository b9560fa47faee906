use super::pipeline::ScoredVenue;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One row of the exported venue table.
#[derive(Debug, Serialize)]
struct VenueTableRow<'a> {
    id: &'a str,
    name: &'a str,
    rating: f64,
    review_count: u32,
    raw_productivity_score: f64,
    raw_social_score: f64,
    norm_productivity_score: f64,
    norm_social_score: f64,
    segment_label: &'static str,
}

impl<'a> From<&'a ScoredVenue> for VenueTableRow<'a> {
    fn from(venue: &'a ScoredVenue) -> Self {
        Self {
            id: venue.id.as_str(),
            name: &venue.name,
            rating: venue.rating,
            review_count: venue.review_count,
            raw_productivity_score: venue.raw_productivity_score,
            raw_social_score: venue.raw_social_score,
            norm_productivity_score: venue.norm_productivity_score,
            norm_social_score: venue.norm_social_score,
            segment_label: venue.segment.label(),
        }
    }
}

pub fn write_venue_table<W: Write>(writer: W, venues: &[ScoredVenue]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for venue in venues {
        csv_writer.serialize(VenueTableRow::from(venue))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_venue_table_to_path<P: AsRef<Path>>(
    path: P,
    venues: &[ScoredVenue],
) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_venue_table(std::io::BufWriter::new(file), venues)
}
