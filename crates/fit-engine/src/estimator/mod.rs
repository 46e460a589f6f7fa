use std::error::Error;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

pub use least_squares_estimator::{
    fit, fit_with, Axis, FitError, FitErrorKind, FitOptions, FitResult, LeastSquaresEstimator,
};

pub mod least_squares_estimator;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint<Input, Output> {
    pub x: Input,
    pub y: Output,
}

impl<Input, Output> DataPoint<Input, Output> {
    pub fn new(x: Input, y: Output) -> Self {
        DataPoint { x, y }
    }
}

impl<Input, Output> From<(Input, Output)> for DataPoint<Input, Output> {
    fn from((x, y): (Input, Output)) -> Self {
        DataPoint { x, y }
    }
}

pub trait Estimator<'de, Input, Output>: Serialize + Deserialize<'de> + Debug {
    type Error: Error + Debug;
    type Options;

    fn build(
        data: &[DataPoint<Input, Output>],
        options: &Self::Options,
    ) -> Result<Self, Self::Error>;

    fn estimate(&self, x: Input) -> Output;
}
