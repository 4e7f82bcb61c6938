use std::{error::Error, fmt, io, path::PathBuf};

use model::ModelErr;

/// The application's result type.
pub type Result<T> = std::result::Result<T, AppErr>;

/// All errors that can occur while building a page.
#[derive(Debug)]
pub enum AppErr {
    /// The settings file could not be read or parsed.
    Settings { path: PathBuf, reason: String },
    /// A branding image could not be read.
    Asset { path: PathBuf, source: io::Error },
    /// The uploaded batch file could not be turned into a table.
    Upload { path: PathBuf, source: ModelErr },
    /// The prediction routine rejected the input.
    Prediction(ModelErr),
    /// The scored table has no usable prediction in its first row.
    MissingPrediction,
}

impl fmt::Display for AppErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings { path, reason } => {
                write!(f, "invalid settings in {}: {reason}", path.display())
            }
            Self::Asset { path, source } => {
                write!(f, "cannot open image {}: {source}", path.display())
            }
            Self::Upload { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::Prediction(e) => write!(f, "prediction failed: {e}"),
            Self::MissingPrediction => write!(f, "the model returned no prediction"),
        }
    }
}

impl Error for AppErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Asset { source, .. } => Some(source),
            Self::Upload { source, .. } => Some(source),
            Self::Prediction(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelErr> for AppErr {
    fn from(e: ModelErr) -> Self {
        Self::Prediction(e)
    }
}
