use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the model artifact lives and what it is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub name: String,
    pub dir: PathBuf,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: "dt_insurance_charges_model".into(),
            dir: PathBuf::from("models"),
        }
    }
}

/// The two images shown on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingSettings {
    pub logo: PathBuf,
    pub hospital: PathBuf,
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self {
            logo: PathBuf::from("assets/logo.png"),
            hospital: PathBuf::from("assets/hospital.jpeg"),
        }
    }
}

/// Application settings; every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: ModelSettings,
    pub branding: BrandingSettings,
    /// File the log records are appended to while the terminal UI owns the screen.
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: ModelSettings::default(),
            branding: BrandingSettings::default(),
            log_file: PathBuf::from("insurance_app.log"),
        }
    }
}
