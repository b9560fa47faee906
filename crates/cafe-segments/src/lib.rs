//! Scores coffee-shop venues on productivity and social suitability from their
//! reviews, segments them into quadrants and ranks recommendations per segment.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
