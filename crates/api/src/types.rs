use serde::{Deserialize, Serialize};

use fit_engine::{FitReport, PlotSeries, RawPoint};

#[derive(Debug, Deserialize)]
pub struct FitPayload {
    pub points: Vec<RawPoint>,
}

#[derive(Debug, Serialize)]
pub struct FitResponse {
    #[serde(flatten)]
    pub report: FitReport,
    pub residuals: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct PlotResponse {
    pub fit: FitReport,
    pub plot: PlotSeries,
}
