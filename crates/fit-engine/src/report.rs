use std::fmt;

use serde::Serialize;

use config::config::ReportConfig;

use crate::estimator::{FitError, FitErrorKind, FitResult};

/// Text rendering of a successful fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub slope: f64,
    pub intercept: f64,
    pub rmse: f64,
    pub equation: String,
    pub rmse_text: String,
}

impl FitReport {
    pub fn new(result: &FitResult, precision: usize) -> Self {
        FitReport {
            slope: result.slope,
            intercept: result.intercept,
            rmse: result.rmse,
            equation: format_equation(result, precision),
            rmse_text: format!("RMSE = {:.*}", precision, result.rmse),
        }
    }

    pub fn from_config(result: &FitResult, config: &ReportConfig) -> Self {
        Self::new(result, config.precision)
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Best Fit Line: {}  |  {}", self.equation, self.rmse_text)
    }
}

pub(crate) fn format_equation(result: &FitResult, precision: usize) -> String {
    format!("y = {:.*}x + {:.*}", precision, result.slope, precision, result.intercept)
}

/// User-facing diagnostic for a rejected dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: FitErrorKind,
    pub title: &'static str,
    pub message: String,
}

impl From<&FitError> for ErrorReport {
    fn from(err: &FitError) -> Self {
        let kind = err.kind();
        let title = match kind {
            FitErrorKind::InvalidInput => "Input Error",
            FitErrorKind::InsufficientData => "Insufficient Data",
            FitErrorKind::DegenerateInput => "Degenerate Input",
            FitErrorKind::NumericOverflow => "Numeric Overflow",
        };
        ErrorReport { kind, title, message: err.to_string() }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
