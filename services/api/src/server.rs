use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cafe_segments::config::AppConfig;
use cafe_segments::error::AppError;
use cafe_segments::telemetry;
use cafe_segments::workflows::segmentation::SegmentationPipeline;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let segmentation = config.segmentation.segmentation_config()?;
    info!(
        version = %segmentation.version,
        keywords = segmentation.lexicon.len(),
        policy = segmentation.thresholds.label(),
        top_n = segmentation.top_n,
        "loaded segmentation rule set"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        pipeline: Arc::new(SegmentationPipeline::new(segmentation)),
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "venue segmentation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
