use super::domain::Segment;
use super::lexicon::Category;
use super::normalizer::NormalizedScores;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Per-axis cut-off on normalized scores. A score equal to its threshold meets it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub productivity: f64,
    pub social: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            productivity: DEFAULT_THRESHOLD,
            social: DEFAULT_THRESHOLD,
        }
    }
}

impl Thresholds {
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

    /// First axis whose threshold falls outside `[0, 1]`.
    pub fn out_of_range(&self) -> Option<(Category, f64)> {
        Category::ordered()
            .into_iter()
            .map(|category| (category, self.get(category)))
            .find(|(_, value)| !value.is_finite() || !(0.0..=1.0).contains(value))
    }
}

/// How the thresholds for a run are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ThresholdPolicy {
    Fixed(Thresholds),
    /// Split each axis at the median normalized score of the run.
    Median,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::Fixed(Thresholds::default())
    }
}

impl ThresholdPolicy {
    pub fn resolve(&self, normalized: &[NormalizedScores]) -> Thresholds {
        match self {
            Self::Fixed(thresholds) => *thresholds,
            Self::Median => {
                let column = |category: Category| {
                    normalized
                        .iter()
                        .map(|scores| scores.get(category))
                        .collect::<Vec<_>>()
                };
                Thresholds {
                    productivity: median(column(Category::Productivity)),
                    social: median(column(Category::Social)),
                }
            }
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Median => "median",
        }
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let middle = values.len() / 2;
    if values.len() % 2 == 1 {
        values[middle]
    } else {
        (values[middle - 1] + values[middle]) / 2.0
    }
}

/// The 2x2 quadrant table.
pub fn assign_segment(normalized: NormalizedScores, thresholds: Thresholds) -> Segment {
    let productive = normalized.productivity() >= thresholds.productivity;
    let social = normalized.social() >= thresholds.social;

    match (productive, social) {
        (true, true) => Segment::AllRounder,
        (true, false) => Segment::ProductivityHub,
        (false, true) => Segment::SocialHotspot,
        (false, false) => Segment::LowEngagement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(productivity: f64, social: f64) -> NormalizedScores {
        NormalizedScores::new(productivity, social).expect("scores within unit interval")
    }

    #[test]
    fn quadrant_table_covers_all_cases() {
        let thresholds = Thresholds::default();
        let cases = [
            (scores(0.9, 0.8), Segment::AllRounder),
            (scores(0.9, 0.1), Segment::ProductivityHub),
            (scores(0.1, 0.9), Segment::SocialHotspot),
            (scores(0.1, 0.2), Segment::LowEngagement),
        ];
        for (scores, expected) in cases {
            assert_eq!(assign_segment(scores, thresholds), expected);
        }
    }

    #[test]
    fn boundary_values_meet_the_threshold() {
        let thresholds = Thresholds::new(0.5, 0.5);
        assert_eq!(
            assign_segment(scores(0.5, 0.2), thresholds),
            Segment::ProductivityHub
        );
        assert_eq!(
            assign_segment(scores(0.5, 0.5), thresholds),
            Segment::AllRounder
        );
        assert_eq!(
            assign_segment(scores(0.0, 0.0), Thresholds::new(0.0, 0.0)),
            Segment::AllRounder
        );
    }

    #[test]
    fn median_policy_uses_middle_values() {
        let normalized = [
            scores(0.0, 1.0),
            scores(0.2, 0.0),
            scores(1.0, 0.4),
            scores(0.6, 0.3),
        ];
        let thresholds = ThresholdPolicy::Median.resolve(&normalized);
        assert!((thresholds.productivity - 0.4).abs() < 1e-12);
        assert!((thresholds.social - 0.35).abs() < 1e-12);

        let odd = [
            scores(0.0, 0.0),
            scores(1.0, 1.0),
            scores(0.3, 0.7),
        ];
        assert_eq!(
            ThresholdPolicy::Median.resolve(&odd),
            Thresholds::new(0.3, 0.7)
        );
        assert_eq!(
            ThresholdPolicy::Median.resolve(&[]),
            Thresholds::new(0.0, 0.0)
        );
    }

    #[test]
    fn fixed_policy_ignores_scores() {
        let policy = ThresholdPolicy::Fixed(Thresholds::new(0.25, 0.75));
        assert_eq!(
            policy.resolve(&[scores(1.0, 1.0)]),
            Thresholds::new(0.25, 0.75)
        );
    }

    #[test]
    fn out_of_range_thresholds_are_reported() {
        assert_eq!(Thresholds::default().out_of_range(), None);
        assert_eq!(
            Thresholds::new(0.5, 1.5).out_of_range(),
            Some((Category::Social, 1.5))
        );
        assert!(Thresholds::new(f64::NAN, 0.5).out_of_range().is_some());
    }

    #[test]
    fn policy_round_trips_through_json() {
        let json = r#"{"policy":"fixed","productivity":0.4,"social":0.6}"#;
        let policy: ThresholdPolicy = serde_json::from_str(json).expect("fixed policy parses");
        assert_eq!(policy, ThresholdPolicy::Fixed(Thresholds::new(0.4, 0.6)));

        let median: ThresholdPolicy =
            serde_json::from_str(r#"{"policy":"median"}"#).expect("median parses");
        assert_eq!(median, ThresholdPolicy::Median);
    }
}
