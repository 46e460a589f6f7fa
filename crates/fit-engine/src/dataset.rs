use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::estimator::{fit_with, Axis, DataPoint, FitError, FitOptions, FitResult};

/// A coordinate as entered by the user: already numeric, raw text, or any other JSON value
/// (`null`, booleans, ...) which is kept so it can be reported as invalid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Coordinate {
    fn parse(&self, row: usize, axis: Axis) -> Result<f64, FitError> {
        let value = match self {
            Coordinate::Number(value) => Some(*value),
            Coordinate::Text(text) => text.trim().parse::<f64>().ok(),
            Coordinate::Other(_) => None,
        };

        match value {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(FitError::InvalidInput { row, axis, value: self.to_string() }),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coordinate::Number(value) => write!(f, "{}", value),
            Coordinate::Text(text) => write!(f, "{}", text),
            Coordinate::Other(value) => write!(f, "{}", value),
        }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Coordinate::Text(String::new())
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

impl From<&str> for Coordinate {
    fn from(text: &str) -> Self {
        Coordinate::Text(text.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(text: String) -> Self {
        Coordinate::Text(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(default)]
    pub x: Coordinate,
    #[serde(default)]
    pub y: Coordinate,
}

impl RawPoint {
    pub fn new(x: impl Into<Coordinate>, y: impl Into<Coordinate>) -> Self {
        RawPoint { x: x.into(), y: y.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("Line {line} must hold exactly two values, found {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// Converts user rows into numeric points, failing on the first row that is not a pair of
/// finite numbers.
pub fn parse_points(rows: &[RawPoint]) -> Result<Vec<DataPoint<f64, f64>>, FitError> {
    rows.iter()
        .enumerate()
        .map(|(index, RawPoint { x, y })| {
            let row = index + 1;
            Ok(DataPoint { x: x.parse(row, Axis::X)?, y: y.parse(row, Axis::Y)? })
        })
        .collect()
}

pub fn fit_raw(rows: &[RawPoint], options: &FitOptions) -> Result<FitResult, FitError> {
    let points = parse_points(rows)?;
    fit_with(&points, options)
}

/// Reads one `x,y` pair per line. Commas, semicolons, tabs and spaces all separate values.
/// Blank lines and `#` comments are skipped, as is a leading `x,y` or `xi,yi` header.
pub fn parse_delimited(text: &str) -> Result<Vec<RawPoint>, DatasetError> {
    let mut rows = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = content
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();

        let [x, y] = fields[..] else {
            return Err(DatasetError::MalformedLine {
                line: index + 1,
                content: content.to_string(),
            });
        };

        if rows.is_empty() && is_header(x, y) {
            debug!("Skipping header line {}: {}", index + 1, content);
            continue;
        }

        rows.push(RawPoint::new(x, y));
    }

    Ok(rows)
}

const X_HEADERS: [&str; 3] = ["x", "xi", "x_i"];
const Y_HEADERS: [&str; 3] = ["y", "yi", "y_i"];

fn is_header(x: &str, y: &str) -> bool {
    let matches =
        |names: &[&str], field: &str| names.iter().any(|name| name.eq_ignore_ascii_case(field));
    matches(&X_HEADERS, x) && matches(&Y_HEADERS, y)
}

#[cfg(test)]
mod tests {
    use crate::dataset::{
        fit_raw, parse_delimited, parse_points, Coordinate, DatasetError, RawPoint,
    };
    use crate::estimator::{Axis, DataPoint, FitError, FitOptions};

    #[test]
    fn test_should_parse_text_and_numbers() {
        let rows = vec![RawPoint::new(" 1 ", "2.5"), RawPoint::new(3.0, "-4e1")];

        assert_eq!(
            parse_points(&rows).unwrap(),
            vec![DataPoint::new(1.0, 2.5), DataPoint::new(3.0, -40.0)]
        );
    }

    #[test]
    fn test_should_reject_non_numeric_coordinate() {
        let rows = vec![RawPoint::new("1", "1"), RawPoint::new("a", "2")];

        assert_eq!(
            fit_raw(&rows, &FitOptions::default()).unwrap_err(),
            FitError::InvalidInput { row: 2, axis: Axis::X, value: "a".to_string() }
        );
    }

    #[test]
    fn test_should_reject_missing_and_non_finite_coordinates() {
        let missing = vec![RawPoint::new("1", "1"), RawPoint::new("2", "")];
        let infinite = vec![RawPoint::new("inf", "1"), RawPoint::new("2", "2")];
        let not_a_number = vec![RawPoint::new("1", "1"), RawPoint::new(2.0, f64::NAN)];

        assert_eq!(
            parse_points(&missing).unwrap_err(),
            FitError::InvalidInput { row: 2, axis: Axis::Y, value: String::new() }
        );
        assert_eq!(
            parse_points(&infinite).unwrap_err(),
            FitError::InvalidInput { row: 1, axis: Axis::X, value: "inf".to_string() }
        );
        assert_eq!(
            parse_points(&not_a_number).unwrap_err(),
            FitError::InvalidInput { row: 2, axis: Axis::Y, value: "NaN".to_string() }
        );
    }

    #[test]
    fn test_should_report_invalid_input_before_insufficient_data() {
        let rows = vec![RawPoint::new("x", "1")];

        assert!(matches!(
            fit_raw(&rows, &FitOptions::default()).unwrap_err(),
            FitError::InvalidInput { row: 1, .. }
        ));
    }

    #[test]
    fn test_should_fit_raw_rows() {
        let rows = vec![RawPoint::new("0", "1"), RawPoint::new("1", "3"), RawPoint::new("2", "5")];
        let result = fit_raw(&rows, &FitOptions::default()).unwrap();

        assert_eq!(result.slope, 2.0);
        assert_eq!(result.intercept, 1.0);
    }

    #[test]
    fn test_should_deserialize_mixed_coordinates() {
        let rows: Vec<RawPoint> =
            serde_json::from_str(r#"[{"x": 1.5, "y": "2"}, {"x": "", "y": 3}]"#).unwrap();

        assert_eq!(rows[0].x, Coordinate::Number(1.5));
        assert_eq!(rows[0].y, Coordinate::Text("2".to_string()));
        assert_eq!(rows[1].x, Coordinate::Text(String::new()));
        assert_eq!(rows[1].y, Coordinate::Number(3.0));
    }

    #[test]
    fn test_should_read_delimited_lines() {
        let text = "\
# measurements
xi,yi
1,2
2; 3

3\t5
4 7
";
        assert_eq!(
            parse_delimited(text).unwrap(),
            vec![
                RawPoint::new("1", "2"),
                RawPoint::new("2", "3"),
                RawPoint::new("3", "5"),
                RawPoint::new("4", "7"),
            ]
        );
    }

    #[test]
    fn test_should_keep_non_numeric_rows_after_first_point() {
        let rows = parse_delimited("1,2\na,2\n").unwrap();

        assert_eq!(rows, vec![RawPoint::new("1", "2"), RawPoint::new("a", "2")]);
    }

    #[test]
    fn test_should_reject_malformed_line() {
        assert_eq!(
            parse_delimited("1,2\n3,4,5\n").unwrap_err(),
            DatasetError::MalformedLine { line: 2, content: "3,4,5".to_string() }
        );
    }

    #[test]
    fn test_should_only_skip_known_headers() {
        assert_eq!(parse_delimited("X,Y\n1,2\n").unwrap(), vec![RawPoint::new("1", "2")]);
        assert_eq!(
            parse_delimited("a,b\n1,2\n").unwrap(),
            vec![RawPoint::new("a", "b"), RawPoint::new("1", "2")]
        );
    }

    #[test]
    fn test_should_report_unknown_first_line_as_invalid_input() {
        let rows = parse_delimited("a,b\n1,2\n2,3\n").unwrap();

        assert_eq!(
            fit_raw(&rows, &FitOptions::default()).unwrap_err(),
            FitError::InvalidInput { row: 1, axis: Axis::X, value: "a".to_string() }
        );
    }

    #[test]
    fn test_should_treat_null_and_missing_values_as_invalid_input() {
        let rows: Vec<RawPoint> =
            serde_json::from_str(r#"[{"x": null, "y": 2}, {"x": 2}, {"x": true, "y": 1}]"#)
                .unwrap();

        assert_eq!(rows[0].x, Coordinate::Other(serde_json::Value::Null));
        assert_eq!(rows[1].y, Coordinate::Text(String::new()));
        assert_eq!(
            parse_points(&rows).unwrap_err(),
            FitError::InvalidInput { row: 1, axis: Axis::X, value: "null".to_string() }
        );
        assert_eq!(
            parse_points(&rows[1..]).unwrap_err(),
            FitError::InvalidInput { row: 1, axis: Axis::Y, value: String::new() }
        );
        assert_eq!(
            parse_points(&rows[2..]).unwrap_err(),
            FitError::InvalidInput { row: 1, axis: Axis::X, value: "true".to_string() }
        );
    }
}
