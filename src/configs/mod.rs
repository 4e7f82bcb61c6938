mod json;
mod settings;

pub use json::{load, load_or_default, DEFAULT_SETTINGS_PATH};
pub use settings::{BrandingSettings, ModelSettings, Settings};
