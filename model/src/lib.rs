pub mod error;
pub mod estimator;
mod native;
pub mod pipeline;
pub mod store;
pub mod table;

pub use error::{ModelErr, Result};
pub use estimator::{Estimator, Node};
pub use pipeline::{FORMAT_VERSION, FeatureSpec, PREDICTION_COLUMN, Pipeline, Regressor};
pub use store::{DiskStore, ModelSource, load_model, save_model};
pub use table::{Cell, Table};

/// Scores `data` with `model`.
///
/// # Arguments
/// * `model` - A loaded model.
/// * `data` - The rows to score; columns the model doesn't use are carried along.
///
/// # Returns
/// A copy of `data` with a [`PREDICTION_COLUMN`] column holding one prediction per row.
///
/// # Errors
/// Returns whatever the model raised while encoding the data.
pub fn predict_model(model: &dyn Regressor, data: &Table) -> Result<Table> {
    let predictions = model.predict(data)?;
    if predictions.len() != data.nrows() {
        return Err(ModelErr::Corrupt {
            reason: format!(
                "model '{}' returned {} predictions for {} rows",
                model.name(),
                predictions.len(),
                data.nrows()
            ),
        });
    }

    log::debug!("scored {} row(s) with '{}'", data.nrows(), model.name());
    data.clone().with_column(
        PREDICTION_COLUMN,
        predictions.into_iter().map(Cell::Float).collect(),
    )
}
