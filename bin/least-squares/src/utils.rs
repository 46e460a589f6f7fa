use std::io::Read;

use thiserror::Error;

use config::Config;
use fit_engine::estimator::{Estimator, LeastSquaresEstimator};
use fit_engine::{
    parse_delimited, DataTable, DatasetError, ErrorReport, FitError, FitOptions, FitReport,
};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse input: {0}")]
    Dataset(#[from] DatasetError),

    #[error("{}", ErrorReport::from(.0))]
    Fit(#[from] FitError),
}

pub fn read_input(input: Option<&str>) -> Result<String, RunError> {
    match input {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

pub fn fit_text(text: &str, config: &Config) -> Result<FitReport, RunError> {
    let table = DataTable::from(parse_delimited(text)?);
    let points = table.to_points()?;
    let estimator = LeastSquaresEstimator::build(&points, &FitOptions::from(&config.fit))?;
    Ok(FitReport::from_config(estimator.fit_result(), &config.report))
}
