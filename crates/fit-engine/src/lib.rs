pub use dataset::{fit_raw, parse_delimited, parse_points, Coordinate, DatasetError, RawPoint};
pub use estimator::{fit, fit_with, Axis, DataPoint, FitError, FitErrorKind, FitOptions, FitResult};
pub use plot::PlotSeries;
pub use report::{ErrorReport, FitReport};
pub use table::{DataTable, TableError};

pub mod dataset;
pub mod estimator;
pub mod plot;
pub mod report;
pub mod table;
