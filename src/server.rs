//! Web server exposing the dashboard series as JSON.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::signal;

use crate::cli;
use crate::data::filter::{
    site_options, PayloadRange, SiteSelector, PAYLOAD_SLIDER_MARK_STEP, PAYLOAD_SLIDER_MAX,
    PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP,
};
use crate::data::model::Dataset;
use crate::error::SelectionError;
use crate::query::{aggregate_success_by_site, filter_payload_outcome, PieSeries, ScatterSeries};

// ---------------------------------------------------------------------------
// Control descriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
    /// Initial `[low, high]`.
    pub value: [f64; 2],
}

/// Everything a front end needs to build the two controls.
#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardOptions {
    pub sites: Vec<SiteOption>,
    pub payload_slider: SliderConfig,
}

impl DashboardOptions {
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let sites = site_options(dataset)
            .into_iter()
            .map(|s| SiteOption {
                label: s.label().to_string(),
                value: s.value().to_string(),
            })
            .collect();

        let mark_count = ((PAYLOAD_SLIDER_MAX - PAYLOAD_SLIDER_MIN) / PAYLOAD_SLIDER_MARK_STEP) as usize;
        let marks = (0..=mark_count)
            .map(|i| PAYLOAD_SLIDER_MIN + i as f64 * PAYLOAD_SLIDER_MARK_STEP)
            .collect();
        let default = PayloadRange::dataset_default(dataset);

        DashboardOptions {
            sites,
            payload_slider: SliderConfig {
                min: PAYLOAD_SLIDER_MIN,
                max: PAYLOAD_SLIDER_MAX,
                step: PAYLOAD_SLIDER_STEP,
                marks,
                value: [default.low(), default.high()],
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PieParams {
    #[serde(default)]
    site: SiteSelector,
}

#[derive(Debug, Deserialize)]
pub struct ScatterParams {
    #[serde(default)]
    site: SiteSelector,
    low: Option<f64>,
    high: Option<f64>,
}

impl ScatterParams {
    /// Missing bounds fall back to the dataset default range.
    fn payload_range(&self, dataset: &Dataset) -> Result<PayloadRange, SelectionError> {
        let default = PayloadRange::dataset_default(dataset);
        PayloadRange::new(
            self.low.unwrap_or(default.low()),
            self.high.unwrap_or(default.high()),
        )
    }
}

pub fn router(dataset: Arc<Dataset>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/options", get(options))
        .route("/api/success-pie", get(success_pie))
        .route("/api/payload-scatter", get(payload_scatter))
        .with_state(dataset)
}

async fn health() -> &'static str {
    "OK"
}

async fn options(State(dataset): State<Arc<Dataset>>) -> Json<DashboardOptions> {
    Json(DashboardOptions::for_dataset(&dataset))
}

async fn success_pie(
    State(dataset): State<Arc<Dataset>>,
    Query(params): Query<PieParams>,
) -> Json<PieSeries> {
    log::debug!("success-pie site={}", params.site);
    Json(aggregate_success_by_site(&dataset, &params.site))
}

async fn payload_scatter(
    State(dataset): State<Arc<Dataset>>,
    Query(params): Query<ScatterParams>,
) -> Result<Json<ScatterSeries>, SelectionError> {
    let range = params.payload_range(&dataset)?;
    log::debug!(
        "payload-scatter site={} range=[{}, {}]",
        params.site,
        range.low(),
        range.high()
    );
    Ok(Json(filter_payload_outcome(&dataset, &params.site, range)))
}

// ---------------------------------------------------------------------------
// Serving
// ---------------------------------------------------------------------------

/// Serve the dashboard API until Ctrl-C or SIGTERM.
///
/// # Arguments
///
/// * `args`: Command line arguments
/// * `dataset`: The dataset loaded at start-up
pub async fn serve(args: &cli::CommandLineArgs, dataset: Arc<Dataset>) -> anyhow::Result<()> {
    let ip: IpAddr = args
        .host
        .parse()
        .with_context(|| format!("invalid listen address '{}'", args.host))?;
    let addr = SocketAddr::new(ip, args.port);

    let server = axum::Server::try_bind(&addr)
        .with_context(|| format!("failed to bind {addr}"))?
        .serve(router(dataset).into_make_service());

    log::info!("Dashboard API listening on http://{addr}");
    server
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("web server failed")
}

/// Graceful shutdown handler
///
/// Resolves on Ctrl-C or SIGTERM. If a handler cannot be installed the
/// corresponding branch never resolves.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("signal received, shutting down");
}
