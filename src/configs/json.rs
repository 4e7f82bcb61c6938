use std::{fs, path::Path};

use super::Settings;
use crate::{AppErr, Result};

/// Looked up in the working directory when no settings file is given.
pub const DEFAULT_SETTINGS_PATH: &str = "insurance_app.json";

/// Loads [`Settings`] from a JSON file.
///
/// # Errors
/// Returns `AppErr::Settings` if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| AppErr::Settings {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| AppErr::Settings {
        path: path.to_path_buf(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Loads the settings the application should run with.
///
/// An explicit path must exist. Without one, `./insurance_app.json` is used when present
/// and the defaults otherwise.
///
/// # Errors
/// Returns `AppErr::Settings` if the chosen file cannot be read or parsed.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load(path);
    }

    let fallback = Path::new(DEFAULT_SETTINGS_PATH);
    if fallback.is_file() {
        return load(fallback);
    }

    Ok(Settings::default())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "model": { "dir": "/srv/models" } }"#).unwrap();

        let settings = load(&path).unwrap();
        assert_eq!(settings.model.dir, PathBuf::from("/srv/models"));
        assert_eq!(settings.model.name, "dt_insurance_charges_model");
        assert_eq!(settings.branding, crate::configs::BrandingSettings::default());
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ model: ").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, AppErr::Settings { .. }));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_or_default(Some(Path::new("/no/such/settings.json"))).unwrap_err();
        assert!(matches!(err, AppErr::Settings { .. }));
    }
}
