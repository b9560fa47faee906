use crate::infra::{parse_threshold_policy, parse_top_n, resolve_segmentation_config, PolicyChoice};
use cafe_segments::config::AppConfig;
use cafe_segments::error::AppError;
use cafe_segments::telemetry;
use cafe_segments::workflows::import::VenueImporter;
use cafe_segments::workflows::segmentation::{
    write_venue_table_to_path, Category, SegmentationConfig, SegmentationPipeline,
    SegmentationReport, ThresholdPolicy,
};
use chrono::{SecondsFormat, Utc};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct SegmentArgs {
    /// Semicolon-delimited venue export (Id;OrganizationName;RateStars;ReviewsTotalCount)
    #[arg(long)]
    pub(crate) venues: PathBuf,
    /// Semicolon-delimited cleaned reviews (OrganizationId;CleanedReview)
    #[arg(long)]
    pub(crate) reviews: PathBuf,
    /// JSON segmentation config replacing the built-in rule set
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Threshold policy: fixed or median
    #[arg(long, value_parser = parse_threshold_policy)]
    pub(crate) threshold_policy: Option<PolicyChoice>,
    /// Recommendations per segment
    #[arg(long, value_parser = parse_top_n)]
    pub(crate) top_n: Option<usize>,
    /// Write the scored venue table to this CSV file
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Print the report as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LexiconArgs {
    /// JSON segmentation config to inspect instead of the built-in rule set
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
}

pub(crate) fn run_segment(args: SegmentArgs) -> Result<(), AppError> {
    let SegmentArgs {
        venues,
        reviews,
        config,
        threshold_policy,
        top_n,
        output,
        json,
    } = args;

    let app_config = AppConfig::load()?;
    telemetry::init(&app_config.telemetry)?;

    let segmentation = resolve_segmentation_config(
        &app_config.segmentation,
        config.as_deref(),
        threshold_policy,
        top_n,
    )?;
    let venues = VenueImporter::from_paths(&venues, &reviews)?;
    let run = SegmentationPipeline::new(segmentation).run(&venues)?;

    if let Some(path) = &output {
        write_venue_table_to_path(path, &run.venues)?;
        info!(path = %path.display(), venues = run.venues.len(), "wrote venue table");
    }

    let report = run.report(false);
    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn run_lexicon(args: LexiconArgs) -> Result<(), AppError> {
    let app_config = AppConfig::load()?;
    let config = resolve_segmentation_config(
        &app_config.segmentation,
        args.config.as_deref(),
        None,
        None,
    )?;
    render_lexicon(&config);
    Ok(())
}

fn render_report(report: &SegmentationReport) {
    println!(
        "Venue segmentation ({} venues, rule set {})",
        report.venue_count, report.config_version
    );
    println!(
        "Generated {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    println!(
        "Thresholds ({}): productivity {:.3} | social {:.3}",
        report.threshold_policy, report.thresholds.productivity, report.thresholds.social
    );

    println!("\nSegment counts:");
    for entry in &report.segment_counts {
        println!("- {}: {}", entry.segment_label, entry.venues);
    }

    for group in &report.recommendations {
        println!("\n{} (top {})", group.segment_label, report.top_n);
        if group.venues.is_empty() {
            println!("  No venues in this segment");
            continue;
        }
        for venue in &group.venues {
            println!(
                "  {}. {} | rating {:.1} | {} reviews | productivity {:.2} | social {:.2}",
                venue.rank,
                venue.name,
                venue.rating,
                venue.review_count,
                venue.norm_productivity_score,
                venue.norm_social_score
            );
        }
    }
}

fn render_lexicon(config: &SegmentationConfig) {
    println!(
        "Lexicon {} ({} keywords)",
        config.version,
        config.lexicon.len()
    );
    for category in Category::ordered() {
        println!("\n{category}:");
        for entry in config
            .lexicon
            .entries()
            .into_iter()
            .filter(|entry| entry.category == category.as_str())
        {
            println!("  - {} ({})", entry.keyword, entry.weight);
        }
    }

    println!();
    match config.thresholds {
        ThresholdPolicy::Fixed(thresholds) => println!(
            "Thresholds (fixed): productivity {:.3} | social {:.3}",
            thresholds.productivity, thresholds.social
        ),
        ThresholdPolicy::Median => {
            println!("Thresholds (median): resolved per run")
        }
    }
    println!("Recommendations per segment: {}", config.top_n);
}
