use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde_json::json;

use config::config::{Config, ReportConfig};
use fit_engine::estimator::{Estimator, LeastSquaresEstimator};
use fit_engine::{
    parse_points, DataPoint, ErrorReport, FitError, FitOptions, FitReport, FitResult, PlotSeries,
};

use crate::types::{FitPayload, FitResponse, PlotResponse};

#[derive(Debug, Clone)]
pub struct FitSettings {
    pub options: FitOptions,
    pub report: ReportConfig,
}

impl From<&Config> for FitSettings {
    fn from(config: &Config) -> Self {
        FitSettings { options: FitOptions::from(&config.fit), report: config.report.clone() }
    }
}

pub struct ServiceController {
    settings: Arc<FitSettings>,
}

impl ServiceController {
    pub fn new(settings: FitSettings) -> Self {
        Self { settings: Arc::new(settings) }
    }

    pub fn router(self) -> Router {
        let settings = self.settings.clone();

        Router::new()
            .route("/", get(ServiceController::status))
            .route("/api/health", get(ServiceController::status))
            .route(
                "/api/fit",
                post({
                    let settings = settings.clone();
                    move |Json(payload): Json<FitPayload>| async move {
                        ServiceController::fit(settings.clone(), payload).await
                    }
                }),
            )
            .route(
                "/api/plot",
                post({
                    let settings = settings.clone();
                    move |Json(payload): Json<FitPayload>| async move {
                        ServiceController::plot(settings.clone(), payload).await
                    }
                }),
            )
    }

    /// Health check endpoint
    pub async fn status() -> impl IntoResponse {
        let response = json!({
            "message": "Service is running...",
            "status": "ok"
        });
        (StatusCode::OK, Json(response))
    }

    /// Fit a line to the submitted rows
    pub async fn fit(settings: Arc<FitSettings>, payload: FitPayload) -> impl IntoResponse {
        match fit_payload(&settings, &payload) {
            Ok((points, result)) => {
                let response = FitResponse {
                    report: FitReport::from_config(&result, &settings.report),
                    residuals: result.residuals(&points),
                };
                (StatusCode::OK, Json(json!(response)))
            }
            Err(err) => rejection(&err),
        }
    }

    /// Fit a line and return the series needed to draw it
    pub async fn plot(settings: Arc<FitSettings>, payload: FitPayload) -> impl IntoResponse {
        match fit_payload(&settings, &payload) {
            Ok((points, result)) => {
                let response = PlotResponse {
                    fit: FitReport::from_config(&result, &settings.report),
                    plot: PlotSeries::build(&points, &result, settings.report.plot_label_precision),
                };
                (StatusCode::OK, Json(json!(response)))
            }
            Err(err) => rejection(&err),
        }
    }
}

fn fit_payload(
    settings: &FitSettings,
    payload: &FitPayload,
) -> Result<(Vec<DataPoint<f64, f64>>, FitResult), FitError> {
    info!("Fitting {} submitted rows", payload.points.len());
    let points = parse_points(&payload.points)?;
    let estimator = LeastSquaresEstimator::build(&points, &settings.options)?;
    Ok((points, *estimator.fit_result()))
}

fn rejection(err: &FitError) -> (StatusCode, Json<serde_json::Value>) {
    warn!("Rejected fit request: {}", err);
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": ErrorReport::from(err) })))
}
