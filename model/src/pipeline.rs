use ndarray::{Array2, ArrayViewMut1};
use serde::{Deserialize, Serialize};

use crate::{Cell, ModelErr, Result, Table, estimator::Estimator};

/// Name of the column holding the predictions in a scored table.
pub const PREDICTION_COLUMN: &str = "prediction_label";

/// The only artifact layout this build reads and writes.
pub const FORMAT_VERSION: u32 = 1;

const DEFAULT_ROUND: u32 = 4;
/// Beyond this many decimals an `f64` has nothing left to round.
const MAX_ROUND: u32 = 15;

/// A fitted regression model able to score tabular data.
pub trait Regressor {
    /// The name the model was persisted under.
    fn name(&self) -> &str;

    /// Scores every row of `data`.
    ///
    /// # Returns
    /// One prediction per row, in row order, or an error if the data cannot be encoded.
    fn predict(&self, data: &Table) -> Result<Vec<f64>>;
}

/// How one input column turns into encoded features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSpec {
    /// A numeric column, missing values imputed with `fill`.
    Numeric {
        column: String,
        #[serde(default)]
        fill: f64,
    },
    /// A categorical column expanded into one indicator per category.
    ///
    /// Categories match case-insensitively; an unknown category encodes as all zeros.
    OneHot {
        column: String,
        categories: Vec<String>,
        #[serde(default)]
        fill: Option<String>,
    },
}

impl FeatureSpec {
    pub fn column(&self) -> &str {
        match self {
            FeatureSpec::Numeric { column, .. } | FeatureSpec::OneHot { column, .. } => column,
        }
    }

    /// Returns the amount of encoded features this column produces.
    pub fn width(&self) -> usize {
        match self {
            FeatureSpec::Numeric { .. } => 1,
            FeatureSpec::OneHot { categories, .. } => categories.len(),
        }
    }

    fn encode(&self, row: usize, cell: &Cell, mut out: ArrayViewMut1<f64>) -> Result<()> {
        match self {
            FeatureSpec::Numeric { column, fill } => {
                out[0] = match cell {
                    Cell::Missing => *fill,
                    other => other.as_f64().ok_or_else(|| ModelErr::InvalidValue {
                        row,
                        column: column.clone(),
                        value: other.to_string(),
                    })?,
                };
            }
            FeatureSpec::OneHot {
                categories, fill, ..
            } => {
                out.fill(0.0);

                let value = match cell {
                    Cell::Missing => match fill {
                        Some(fill) => fill.clone(),
                        None => return Ok(()),
                    },
                    other => other.to_string(),
                };

                if let Some(idx) = categories
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(&value))
                {
                    out[idx] = 1.0;
                }
            }
        }

        Ok(())
    }
}

/// A persisted preprocessing + estimator pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub format_version: u32,
    pub name: String,
    #[serde(default = "default_target")]
    pub target: String,
    /// Native libraries the estimator backend links against, without the `lib` prefix.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Decimals kept in the predictions.
    #[serde(default = "default_round")]
    pub round: u32,
    pub features: Vec<FeatureSpec>,
    pub estimator: Estimator,
}

fn default_target() -> String {
    "charges".to_string()
}

fn default_round() -> u32 {
    DEFAULT_ROUND
}

impl Pipeline {
    /// Returns the total amount of encoded features.
    pub fn width(&self) -> usize {
        self.features.iter().map(FeatureSpec::width).sum()
    }

    /// Checks the pipeline is usable.
    ///
    /// # Errors
    /// Returns `ModelErr::UnsupportedFormat` for an unknown version and `ModelErr::Corrupt`
    /// if there are no features, `round` is out of range or the estimator doesn't fit them.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelErr::UnsupportedFormat {
                version: u64::from(self.format_version),
            });
        }

        if self.round > MAX_ROUND {
            return Err(ModelErr::Corrupt {
                reason: format!(
                    "predictions rounded to {} decimals, at most {MAX_ROUND} are supported",
                    self.round
                ),
            });
        }

        if self.features.is_empty() {
            return Err(ModelErr::Corrupt {
                reason: "pipeline has no features".into(),
            });
        }

        self.estimator.validate(self.width())
    }

    /// Encodes `data` into the estimator's feature matrix.
    ///
    /// Columns no feature reads are ignored.
    ///
    /// # Errors
    /// Returns `ModelErr::MissingColumn` or `ModelErr::InvalidValue`.
    pub fn encode(&self, data: &Table) -> Result<Array2<f64>> {
        let indices = self
            .features
            .iter()
            .map(|spec| {
                data.column_index(spec.column())
                    .ok_or_else(|| ModelErr::MissingColumn {
                        column: spec.column().to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut x = Array2::zeros((data.nrows(), self.width()));

        for (i, (row, mut out)) in data.rows().iter().zip(x.rows_mut()).enumerate() {
            let mut offset = 0;
            for (spec, &col) in self.features.iter().zip(&indices) {
                let width = spec.width();
                let slot = out.slice_mut(ndarray::s![offset..offset + width]);
                spec.encode(i, &row[col], slot)?;
                offset += width;
            }
        }

        Ok(x)
    }

    fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.round as i32);
        (value * scale).round() / scale
    }
}

impl Regressor for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, data: &Table) -> Result<Vec<f64>> {
        self.validate()?;
        let x = self.encode(data)?;
        let y = self.estimator.predict(x.view());
        Ok(y.iter().map(|&v| self.round(v)).collect())
    }
}
