use std::path::Path;

use model::Table;

use crate::{AppErr, Result};

/// Only files with this extension are accepted by the upload box.
pub const UPLOAD_EXTENSION: &str = "csv";

/// Whether `path` looks like a file the upload box accepts.
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(UPLOAD_EXTENSION))
}

/// Reads an uploaded batch file.
///
/// No schema is checked here; columns the model needs are enforced when predicting.
///
/// # Errors
/// Returns `AppErr::Upload` if the file cannot be read or is not well formed CSV.
pub fn read_upload(path: &Path) -> Result<Table> {
    let table = Table::from_csv_path(path).map_err(|source| AppErr::Upload {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "read {} row(s) with {} column(s) from {}",
        table.nrows(),
        table.ncols(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn only_csv_extensions_are_accepted() {
        assert!(is_csv(Path::new("batch.csv")));
        assert!(is_csv(Path::new("dir/BATCH.CSV")));
        assert!(!is_csv(Path::new("batch.xlsx")));
        assert!(!is_csv(Path::new("batch")));
    }

    #[test]
    fn reads_rows_without_checking_the_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anything.csv");
        fs::write(&path, "foo,bar\n1,2\n3,4\n").unwrap();

        let table = read_upload(&path).unwrap();
        assert_eq!(table.columns(), ["foo", "bar"]);
        assert_eq!(table.nrows(), 2);
    }

    #[test]
    fn unreadable_upload_is_an_error() {
        let err = read_upload(Path::new("/no/such/upload.csv")).unwrap_err();
        assert!(matches!(err, AppErr::Upload { .. }));
    }
}
