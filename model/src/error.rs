use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used in the entire model module.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// Failures raised while loading a model artifact or predicting with it.
#[derive(Debug)]
pub enum ModelErr {
    /// There is no artifact at the expected location.
    NotFound { path: PathBuf },
    /// The artifact exists but could not be deserialized or is structurally invalid.
    Corrupt { reason: String },
    /// The artifact was written with a format this build does not understand.
    UnsupportedFormat { version: u64 },
    /// The estimator backend links against a native library that is not installed.
    MissingNativeLibrary { library: String },
    /// The input table lacks a column the pipeline encodes.
    MissingColumn { column: String },
    /// A cell could not be encoded for its column.
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    /// A row does not have as many cells as the table has columns.
    RowWidth {
        row: usize,
        got: usize,
        expected: usize,
    },
    /// The tabular source had no header row.
    EmptyData,
    Csv(csv::Error),
    Io(io::Error),
}

impl Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::NotFound { path } => {
                write!(f, "no model artifact found at '{}'", path.display())
            }
            ModelErr::Corrupt { reason } => write!(f, "corrupt model artifact: {reason}"),
            ModelErr::UnsupportedFormat { version } => {
                write!(f, "unsupported model format version {version}")
            }
            ModelErr::MissingNativeLibrary { library } => write!(
                f,
                "native library 'lib{library}' required by the model backend could not be found"
            ),
            ModelErr::MissingColumn { column } => {
                write!(f, "input data is missing the '{column}' column")
            }
            ModelErr::InvalidValue { row, column, value } => write!(
                f,
                "row {row}: cannot encode '{value}' for column '{column}'"
            ),
            ModelErr::RowWidth { row, got, expected } => {
                write!(f, "row {row}: expected {expected} cells, got {got}")
            }
            ModelErr::EmptyData => write!(f, "no columns to parse from the input"),
            ModelErr::Csv(e) => write!(f, "csv error: {e}"),
            ModelErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for ModelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelErr::Csv(e) => Some(e),
            ModelErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ModelErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ModelErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for ModelErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Corrupt {
            reason: value.to_string(),
        }
    }
}
