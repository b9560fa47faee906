use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use cafe_segments::error::AppError;
use cafe_segments::workflows::import::VenueImporter;
use cafe_segments::workflows::segmentation::{
    assemble_venues, ReviewInput, SegmentationReport, Venue, VenueInput,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

/// Venues either as JSON records or as the semicolon-delimited CSV exports.
/// `venues_csv` takes precedence; reviews then come from `reviews_csv`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SegmentationRequest {
    #[serde(default)]
    pub(crate) venues: Vec<VenueInput>,
    #[serde(default)]
    pub(crate) reviews: Vec<ReviewInput>,
    #[serde(default)]
    pub(crate) venues_csv: Option<String>,
    #[serde(default)]
    pub(crate) reviews_csv: Option<String>,
    #[serde(default)]
    pub(crate) include_venues: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct SegmentationResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) data_source: VenueDataSource,
    #[serde(flatten)]
    pub(crate) report: SegmentationReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum VenueDataSource {
    Json,
    Csv,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/segmentation",
            axum::routing::post(segmentation_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn segmentation_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<SegmentationRequest>, JsonRejection>,
) -> Result<Json<SegmentationResponse>, AppError> {
    let Json(payload) = payload?;
    let include_venues = payload.include_venues;
    let (venues, data_source) = load_venues(payload)?;

    let run = state.pipeline.run(&venues)?;

    Ok(Json(SegmentationResponse {
        generated_at: Utc::now(),
        data_source,
        report: run.report(include_venues),
    }))
}

fn load_venues(payload: SegmentationRequest) -> Result<(Vec<Venue>, VenueDataSource), AppError> {
    let SegmentationRequest {
        venues,
        reviews,
        venues_csv,
        reviews_csv,
        ..
    } = payload;

    if let Some(csv) = venues_csv {
        let venues = Cursor::new(csv.into_bytes());
        let venues = match reviews_csv {
            Some(reviews) => {
                VenueImporter::from_readers(venues, Cursor::new(reviews.into_bytes()))?
            }
            None => VenueImporter::from_venue_reader(venues)?,
        };
        return Ok((venues, VenueDataSource::Csv));
    }

    let venues = venues
        .into_iter()
        .map(Venue::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let venues = assemble_venues(venues, reviews)?;
    Ok((venues, VenueDataSource::Json))
}
