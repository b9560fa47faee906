use super::lexicon::{Category, Lexicon};
use super::policy::ThresholdPolicy;
use super::recommender::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

pub const STANDARD_CONFIG_VERSION: &str = "2024.1";

/// Versioned rule set injected into the pipeline: lexicon, threshold policy and
/// recommendation depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    pub version: String,
    pub lexicon: Lexicon,
    #[serde(default)]
    pub thresholds: ThresholdPolicy,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SegmentationConfig {
    pub fn standard() -> Self {
        Self {
            version: STANDARD_CONFIG_VERSION.to_string(),
            lexicon: Lexicon::standard(),
            thresholds: ThresholdPolicy::default(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdPolicy) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn validate(&self) -> Result<(), SegmentationConfigError> {
        if self.version.trim().is_empty() {
            return Err(SegmentationConfigError::MissingVersion);
        }
        if self.top_n == 0 {
            return Err(SegmentationConfigError::InvalidTopN);
        }
        if let ThresholdPolicy::Fixed(thresholds) = &self.thresholds {
            if let Some((category, value)) = thresholds.out_of_range() {
                return Err(SegmentationConfigError::InvalidThreshold { category, value });
            }
        }
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SegmentationConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SegmentationConfigError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

/// Reads a JSON array of lexicon entries.
pub fn load_lexicon<P: AsRef<Path>>(path: P) -> Result<Lexicon, SegmentationConfigError> {
    let file = std::fs::File::open(path)?;
    let lexicon = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(lexicon)
}

#[derive(Debug, thiserror::Error)]
pub enum SegmentationConfigError {
    #[error("failed to read segmentation config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid segmentation config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("segmentation config must carry a version")]
    MissingVersion,
    #[error("{category} threshold {value} must lie within 0-1")]
    InvalidThreshold { category: Category, value: f64 },
    #[error("top_n must be at least 1")]
    InvalidTopN,
}
