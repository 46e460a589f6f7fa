use serde::Serialize;

use crate::estimator::{DataPoint, FitResult};
use crate::report::format_equation;

const PLOT_TITLE: &str = "Least Squares Regression Line";
const X_LABEL: &str = "xi";
const Y_LABEL: &str = "yi";

/// Everything a renderer needs to draw the data as a scatter and the fitted line across the
/// observed x-range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<DataPoint<f64, f64>>,
    pub line: [DataPoint<f64, f64>; 2],
    pub label: String,
}

impl PlotSeries {
    pub fn build(
        points: &[DataPoint<f64, f64>],
        result: &FitResult,
        label_precision: usize,
    ) -> Self {
        let (x_min, x_max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        // A fit always has points, the fallback only covers an empty slice.
        let (x_min, x_max) = if x_min <= x_max { (x_min, x_max) } else { (0.0, 0.0) };

        PlotSeries {
            title: PLOT_TITLE,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            points: points.to_vec(),
            line: [
                DataPoint::new(x_min, result.estimate(x_min)),
                DataPoint::new(x_max, result.estimate(x_max)),
            ],
            label: format_equation(result, label_precision),
        }
    }
}
