use std::{fmt, fs::File, io::Read, path::Path};

use crate::{ModelErr, Result};

/// Spellings read as a missing value, besides the empty cell.
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL"];

/// A single typed value of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Types a raw textual value: integer first, then float, otherwise text.
    ///
    /// # Arguments
    /// * `raw` - The raw value as read from a file.
    ///
    /// # Returns
    /// The inferred cell.
    pub fn infer(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || MISSING_MARKERS.contains(&raw) {
            return Cell::Missing;
        }

        if let Ok(v) = raw.parse::<i64>() {
            return Cell::Int(v);
        }

        if let Ok(v) = raw.parse::<f64>() {
            return Cell::Float(v);
        }

        Cell::Text(raw.to_string())
    }

    /// Returns the numeric value of this cell, if it holds one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Text(_) | Cell::Missing => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Missing => Ok(()),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Row oriented tabular data with named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates a new empty `Table`.
    ///
    /// # Arguments
    /// * `columns` - The column names, in order.
    ///
    /// # Returns
    /// A table with the given columns and no rows.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// # Errors
    /// Returns `ModelErr::RowWidth` if the row does not have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ModelErr::RowWidth {
                row: self.rows.len(),
                got: row.len(),
                expected: self.columns.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the position of the named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the cell at `row` in the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Sets a column, replacing it if it already exists or appending it otherwise.
    ///
    /// # Arguments
    /// * `name` - The column name.
    /// * `values` - One value per row.
    ///
    /// # Returns
    /// The updated table or `ModelErr::RowWidth` if `values` has the wrong length.
    pub fn with_column(mut self, name: &str, values: Vec<Cell>) -> Result<Self> {
        if values.len() != self.rows.len() {
            return Err(ModelErr::RowWidth {
                row: values.len().min(self.rows.len()),
                got: values.len(),
                expected: self.rows.len(),
            });
        }

        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }

        Ok(self)
    }

    /// Reads comma separated data with a header row.
    ///
    /// Cells are typed with [`Cell::infer`]; no schema is enforced.
    ///
    /// # Errors
    /// Returns `ModelErr::EmptyData` if there is no header row and `ModelErr::Csv` for
    /// malformed records, including rows with a different number of fields.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(ModelErr::EmptyData);
        }

        let mut table = Table::new(headers.iter());
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Cell::infer).collect())?;
        }

        Ok(table)
    }

    /// Reads a CSV file from disk, see [`Table::from_csv_reader`].
    ///
    /// # Errors
    /// Returns `ModelErr::Io` if the file cannot be opened.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_cell_types() {
        assert_eq!(Cell::infer("30"), Cell::Int(30));
        assert_eq!(Cell::infer(" 25.5 "), Cell::Float(25.5));
        assert_eq!(Cell::infer("male"), Cell::Text("male".into()));
        assert_eq!(Cell::infer(""), Cell::Missing);
        assert_eq!(Cell::infer("NaN"), Cell::Missing);
    }

    #[test]
    fn reads_csv_with_header() {
        let data = "age,sex,bmi\n19,female,27.9\n18,male,\n";
        let table = Table::from_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(table.columns(), ["age", "sex", "bmi"]);
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.get(0, "bmi"), Some(&Cell::Float(27.9)));
        assert_eq!(table.get(1, "bmi"), Some(&Cell::Missing));
    }

    #[test]
    fn ragged_csv_is_an_error() {
        let data = "age,sex\n19,female,extra\n";
        let err = Table::from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelErr::Csv(_)));
    }

    #[test]
    fn empty_input_has_no_columns() {
        let err = Table::from_csv_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, ModelErr::EmptyData));
    }

    #[test]
    fn with_column_appends_then_replaces() {
        let mut table = Table::new(["a"]);
        table.push_row(vec![Cell::Int(1)]).unwrap();
        table.push_row(vec![Cell::Int(2)]).unwrap();

        let table = table
            .with_column("b", vec![Cell::Float(0.5), Cell::Float(1.5)])
            .unwrap();
        assert_eq!(table.columns(), ["a", "b"]);

        let table = table
            .with_column("a", vec![Cell::Int(7), Cell::Int(8)])
            .unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(table.get(1, "a"), Some(&Cell::Int(8)));
    }

    #[test]
    fn push_row_checks_width() {
        let mut table = Table::new(["a", "b"]);
        let err = table.push_row(vec![Cell::Int(1)]).unwrap_err();
        assert!(matches!(
            err,
            ModelErr::RowWidth {
                got: 1,
                expected: 2,
                ..
            }
        ));
    }
}
