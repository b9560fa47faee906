use super::lexicon::Category;
use super::scoring::CategoryScores;
use serde::Serialize;
use tracing::warn;

/// Observed bounds of one raw score column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn of(values: &[f64]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;
        Some(rest.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |range, &value| Self {
                min: range.min.min(value),
                max: range.max.max(value),
            },
        ))
    }

    /// Every value in the column is identical.
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    pub fn scale(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (value - self.min) / (self.max - self.min)
    }
}

/// Min-max scales a column into `[0, 1]`. A column whose values are all equal
/// maps to all zeros.
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    match ScoreRange::of(values) {
        Some(range) => values.iter().map(|&value| range.scale(value)).collect(),
        None => Vec::new(),
    }
}

/// Per-venue scores after batch normalization, each within `[0, 1]`. Only
/// these can be segmented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedScores(CategoryScores);

impl NormalizedScores {
    /// `None` unless both values lie within `[0, 1]`.
    pub fn new(productivity: f64, social: f64) -> Option<Self> {
        let unit = |value: f64| (0.0..=1.0).contains(&value);
        (unit(productivity) && unit(social))
            .then(|| Self(CategoryScores::new(productivity, social)))
    }

    pub const fn productivity(self) -> f64 {
        self.0.productivity
    }

    pub const fn social(self) -> f64 {
        self.0.social
    }

    pub const fn get(self, category: Category) -> f64 {
        self.0.get(category)
    }

    pub const fn scores(self) -> CategoryScores {
        self.0
    }
}

/// Normalizes raw venue totals column by column across the batch.
pub fn normalize_scores(raw: &[CategoryScores]) -> Vec<NormalizedScores> {
    let column = |category: Category| -> Vec<f64> {
        let values: Vec<f64> = raw.iter().map(|scores| scores.get(category)).collect();
        if ScoreRange::of(&values).is_some_and(|range| range.is_degenerate()) {
            warn!(
                category = %category,
                venues = values.len(),
                "all venues share one raw score; normalizing to zero"
            );
        }
        min_max_normalize(&values)
    };

    column(Category::Productivity)
        .into_iter()
        .zip(column(Category::Social))
        .map(|(productivity, social)| NormalizedScores(CategoryScores::new(productivity, social)))
        .collect()
}
