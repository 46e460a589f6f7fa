use derive_more::Display;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use config::config::FitConfig;

use crate::estimator::{DataPoint, Estimator};

const MIN_POINTS: usize = 2;
const DEFAULT_DEGENERACY_TOLERANCE: f64 = 1e-12;

/// Coefficients of the fitted line `y = slope * x + intercept` and its RMSE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub rmse: f64,
}

impl FitResult {
    pub fn estimate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Observed minus predicted y, in the order the points are given.
    pub fn residuals(&self, points: &[DataPoint<f64, f64>]) -> Vec<f64> {
        points.iter().map(|&DataPoint { x, y }| y - self.estimate(x)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Axis {
    #[display("xi")]
    #[serde(rename = "xi")]
    X,
    #[display("yi")]
    #[serde(rename = "yi")]
    Y,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("Invalid value {value:?} for {axis} in row {row}: enter valid numeric values for all xi and yi")]
    InvalidInput { row: usize, axis: Axis, value: String },

    #[error("Insufficient data: {count} point(s) given, enter at least two data points")]
    InsufficientData { count: usize },

    #[error("Degenerate input: all xi values are the same, so the slope is undefined")]
    DegenerateInput,

    #[error("Numeric overflow: the values are too large to fit, rescale xi and yi")]
    NumericOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitErrorKind {
    #[display("invalid_input")]
    InvalidInput,
    #[display("insufficient_data")]
    InsufficientData,
    #[display("degenerate_input")]
    DegenerateInput,
    #[display("numeric_overflow")]
    NumericOverflow,
}

impl FitError {
    pub fn kind(&self) -> FitErrorKind {
        match self {
            FitError::InvalidInput { .. } => FitErrorKind::InvalidInput,
            FitError::InsufficientData { .. } => FitErrorKind::InsufficientData,
            FitError::DegenerateInput => FitErrorKind::DegenerateInput,
            FitError::NumericOverflow => FitErrorKind::NumericOverflow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub degeneracy_tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions { degeneracy_tolerance: DEFAULT_DEGENERACY_TOLERANCE }
    }
}

impl From<&FitConfig> for FitOptions {
    fn from(config: &FitConfig) -> Self {
        FitOptions { degeneracy_tolerance: config.degeneracy_tolerance }
    }
}

pub fn fit(points: &[DataPoint<f64, f64>]) -> Result<FitResult, FitError> {
    fit_with(points, &FitOptions::default())
}

/// Ordinary least-squares fit of `y = slope * x + intercept` in closed form.
///
/// Points are checked for finiteness first, then count, then the spread of x. The degeneracy
/// test compares the denominator with `n * Sxx`, so it does not depend on the scale of x.
/// The sums are accumulated in input order so results are reproducible.
pub fn fit_with(
    points: &[DataPoint<f64, f64>],
    options: &FitOptions,
) -> Result<FitResult, FitError> {
    if let Some(err) = find_non_finite(points) {
        debug!("Rejecting dataset: {}", err);
        return Err(err);
    }

    let count = points.len();
    if count < MIN_POINTS {
        debug!("Rejecting dataset with {} point(s)", count);
        return Err(FitError::InsufficientData { count });
    }

    let (sum_x, sum_y, sum_xx, sum_xy) = points.iter().fold(
        (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64),
        |(sx, sy, sxx, sxy), &DataPoint { x, y }| (sx + x, sy + y, sxx + x * x, sxy + x * y),
    );

    let n = count as f64;
    let denom = n * sum_xx - sum_x * sum_x;

    if !denom.is_finite() {
        debug!("Rejecting dataset of {} points: x sums overflow", count);
        return Err(FitError::NumericOverflow);
    }

    // All-zero x gives 0 <= 0 and is rejected too.
    if denom.abs() <= options.degeneracy_tolerance * n * sum_xx {
        debug!("Rejecting dataset of {} points: denominator {} is degenerate", count, denom);
        return Err(FitError::DegenerateInput);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;

    let sum_squared_residuals: f64 = points
        .iter()
        .map(|&DataPoint { x, y }| {
            let residual = y - (slope * x + intercept);
            residual * residual
        })
        .sum();
    let rmse = (sum_squared_residuals / n).sqrt();

    if !(slope.is_finite() && intercept.is_finite() && rmse.is_finite()) {
        debug!("Rejecting dataset of {} points: y sums or residuals overflow", count);
        return Err(FitError::NumericOverflow);
    }

    debug!(
        "Fitted {} points: slope = {}, intercept = {}, rmse = {}",
        count, slope, intercept, rmse
    );
    Ok(FitResult { slope, intercept, rmse })
}

fn find_non_finite(points: &[DataPoint<f64, f64>]) -> Option<FitError> {
    points.iter().enumerate().find_map(|(index, DataPoint { x, y })| {
        let invalid = |axis, value: &f64| FitError::InvalidInput {
            row: index + 1,
            axis,
            value: value.to_string(),
        };

        if !x.is_finite() {
            Some(invalid(Axis::X, x))
        } else if !y.is_finite() {
            Some(invalid(Axis::Y, y))
        } else {
            None
        }
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeastSquaresEstimator {
    result: FitResult,
}

impl LeastSquaresEstimator {
    pub fn fit_result(&self) -> &FitResult {
        &self.result
    }
}

impl<'de> Estimator<'de, f64, f64> for LeastSquaresEstimator {
    type Error = FitError;
    type Options = FitOptions;

    fn build(data: &[DataPoint<f64, f64>], options: &FitOptions) -> Result<Self, FitError> {
        let result = fit_with(data, options)?;
        Ok(Self { result })
    }

    fn estimate(&self, x: f64) -> f64 {
        self.result.estimate(x)
    }
}
