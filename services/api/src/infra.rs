use cafe_segments::config::SegmentationSettings;
use cafe_segments::error::AppError;
use cafe_segments::workflows::segmentation::{
    SegmentationConfig, SegmentationPipeline, ThresholdPolicy,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) pipeline: Arc<SegmentationPipeline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PolicyChoice {
    Fixed,
    Median,
}

pub(crate) fn parse_threshold_policy(raw: &str) -> Result<PolicyChoice, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "fixed" => Ok(PolicyChoice::Fixed),
        "median" => Ok(PolicyChoice::Median),
        other => Err(format!(
            "unknown threshold policy '{other}' (expected fixed or median)"
        )),
    }
}

pub(crate) fn parse_top_n(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(format!("'{raw}' is not a positive integer")),
    }
}

/// Builds the rule set for a run. A config file replaces the environment
/// defaults wholesale; the policy and depth overrides apply on top of either.
pub(crate) fn resolve_segmentation_config(
    settings: &SegmentationSettings,
    config_path: Option<&Path>,
    policy: Option<PolicyChoice>,
    top_n: Option<usize>,
) -> Result<SegmentationConfig, AppError> {
    let mut config = match config_path {
        Some(path) => SegmentationConfig::from_path(path)?,
        None => settings.segmentation_config()?,
    };

    match policy {
        Some(PolicyChoice::Median) => config.thresholds = ThresholdPolicy::Median,
        Some(PolicyChoice::Fixed) => {
            if config.thresholds == ThresholdPolicy::Median {
                config.thresholds = ThresholdPolicy::Fixed(settings.thresholds);
            }
        }
        None => {}
    }
    if let Some(top_n) = top_n {
        config.top_n = top_n;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_segments::workflows::segmentation::Thresholds;

    fn settings() -> SegmentationSettings {
        SegmentationSettings {
            thresholds: Thresholds::new(0.4, 0.6),
            top_n: 3,
            lexicon_path: None,
        }
    }

    #[test]
    fn parses_policy_names_case_insensitively() {
        assert_eq!(parse_threshold_policy("Median"), Ok(PolicyChoice::Median));
        assert_eq!(parse_threshold_policy(" fixed "), Ok(PolicyChoice::Fixed));
        assert!(parse_threshold_policy("quartile").is_err());
    }

    #[test]
    fn rejects_zero_top_n() {
        assert_eq!(parse_top_n("5"), Ok(5));
        assert!(parse_top_n("0").is_err());
        assert!(parse_top_n("three").is_err());
    }

    #[test]
    fn overrides_apply_to_environment_settings() {
        let config = resolve_segmentation_config(&settings(), None, None, Some(5))
            .expect("config resolves");
        assert_eq!(
            config.thresholds,
            ThresholdPolicy::Fixed(Thresholds::new(0.4, 0.6))
        );
        assert_eq!(config.top_n, 5);

        let median = resolve_segmentation_config(&settings(), None, Some(PolicyChoice::Median), None)
            .expect("config resolves");
        assert_eq!(median.thresholds, ThresholdPolicy::Median);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let error = resolve_segmentation_config(
            &settings(),
            Some(Path::new("./no-such-config.json")),
            None,
            None,
        )
        .expect_err("missing file rejected");
        assert!(matches!(error, AppError::Segmentation(_)));
    }
}
