use thiserror::Error;

use crate::dataset::{parse_points, Coordinate, RawPoint};
use crate::estimator::{Axis, DataPoint, FitError};

/// Rows of a data-entry table. Rows are only appended or removed from the end, so a row is
/// identified by its 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    rows: Vec<RawPoint>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("Row {0} does not exist")]
    RowNotFound(usize),
}

impl DataTable {
    pub fn new() -> Self {
        DataTable { rows: Vec::new() }
    }

    /// Appends an empty row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(RawPoint::default());
        self.rows.len()
    }

    pub fn delete_last_row(&mut self) -> Option<RawPoint> {
        self.rows.pop()
    }

    pub fn set(
        &mut self,
        row: usize,
        axis: Axis,
        text: impl Into<Coordinate>,
    ) -> Result<(), TableError> {
        let entry = row
            .checked_sub(1)
            .and_then(|index| self.rows.get_mut(index))
            .ok_or(TableError::RowNotFound(row))?;

        match axis {
            Axis::X => entry.x = text.into(),
            Axis::Y => entry.y = text.into(),
        }
        Ok(())
    }

    pub fn rows(&self) -> &[RawPoint] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_points(&self) -> Result<Vec<DataPoint<f64, f64>>, FitError> {
        parse_points(&self.rows)
    }
}

// A fresh table opens with a single empty row.
impl Default for DataTable {
    fn default() -> Self {
        let mut table = DataTable::new();
        table.add_row();
        table
    }
}

impl From<Vec<RawPoint>> for DataTable {
    fn from(rows: Vec<RawPoint>) -> Self {
        DataTable { rows }
    }
}

#[cfg(test)]
mod tests {
    use crate::dataset::RawPoint;
    use crate::estimator::{fit, Axis, DataPoint, FitError};
    use crate::table::{DataTable, TableError};

    #[test]
    fn test_should_start_with_one_empty_row() {
        let table = DataTable::default();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows(), &[RawPoint::default()]);
        assert!(DataTable::new().is_empty());
    }

    #[test]
    fn test_should_number_rows_by_position() {
        let mut table = DataTable::new();

        assert_eq!(table.add_row(), 1);
        assert_eq!(table.add_row(), 2);
        assert_eq!(table.add_row(), 3);
        assert!(table.delete_last_row().is_some());
        assert_eq!(table.add_row(), 3);
    }

    #[test]
    fn test_should_ignore_delete_on_empty_table() {
        let mut table = DataTable::new();

        assert_eq!(table.delete_last_row(), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_should_reject_unknown_rows() {
        let mut table = DataTable::default();

        assert_eq!(table.set(0, Axis::X, "1"), Err(TableError::RowNotFound(0)));
        assert_eq!(table.set(2, Axis::Y, "1"), Err(TableError::RowNotFound(2)));
        assert_eq!(table.set(1, Axis::Y, "1"), Ok(()));
    }

    #[test]
    fn test_should_fit_entered_rows() {
        let mut table = DataTable::default();
        table.add_row();
        table.add_row();
        for (row, (x, y)) in [("0", "1"), ("1", "3"), ("2", "5")].into_iter().enumerate() {
            table.set(row + 1, Axis::X, x).unwrap();
            table.set(row + 1, Axis::Y, y).unwrap();
        }

        let points = table.to_points().unwrap();
        assert_eq!(points[2], DataPoint::new(2.0, 5.0));
        assert_eq!(fit(&points).unwrap().slope, 2.0);
    }

    #[test]
    fn test_should_flag_empty_cells() {
        let mut table = DataTable::default();
        table.set(1, Axis::X, "4").unwrap();

        assert!(matches!(
            table.to_points().unwrap_err(),
            FitError::InvalidInput { row: 1, axis: Axis::Y, .. }
        ));
    }
}
