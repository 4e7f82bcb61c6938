use model::{Regressor, Table, PREDICTION_COLUMN};

use crate::{record::PatientRecord, AppErr, Result};

/// Predicts the charge for a single patient.
///
/// # Arguments
/// * `model` - A loaded model.
/// * `record` - The patient entered in the form.
///
/// # Returns
/// The predicted charge or the error raised by the prediction routine.
pub fn predict(model: &dyn Regressor, record: &PatientRecord) -> Result<f64> {
    let input = record.to_table()?;
    let scored = model::predict_model(model, &input)?;

    scored
        .get(0, PREDICTION_COLUMN)
        .and_then(|cell| cell.as_f64())
        .ok_or(AppErr::MissingPrediction)
}

/// Scores every row of an uploaded table.
///
/// # Returns
/// The input table with the prediction column appended.
pub fn predict_batch(model: &dyn Regressor, data: &Table) -> Result<Table> {
    let scored = model::predict_model(model, data)?;
    log::info!("scored a batch of {} row(s)", scored.nrows());
    Ok(scored)
}
