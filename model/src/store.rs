use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{FORMAT_VERSION, ModelErr, Pipeline, Regressor, Result, native};

const ARTIFACT_EXTENSION: &str = "json";

/// Something that can hand out a model by name.
pub trait ModelSource {
    /// Loads the model persisted under `name`.
    ///
    /// # Errors
    /// Returns the reason the model is not usable.
    fn load(&self, name: &str) -> Result<Box<dyn Regressor>>;
}

/// Loads pipeline artifacts from a directory on the local disk.
#[derive(Debug, Clone)]
pub struct DiskStore {
    dir: PathBuf,
    library_dirs: Vec<PathBuf>,
}

impl DiskStore {
    /// Creates a new `DiskStore` probing the system library directories.
    ///
    /// # Arguments
    /// * `dir` - The directory holding `<name>.json` artifacts.
    ///
    /// # Returns
    /// A new `DiskStore` instance.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            library_dirs: native::search_dirs(),
        }
    }

    /// Replaces the directories searched for native libraries.
    pub fn with_library_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.library_dirs = dirs;
        self
    }

    /// Returns where the artifact for `name` lives.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{ARTIFACT_EXTENSION}"))
    }

    /// Loads and validates the pipeline persisted under `name`.
    ///
    /// # Errors
    /// Returns `NotFound`, `Io`, `Corrupt`, `UnsupportedFormat` or `MissingNativeLibrary`.
    pub fn load_pipeline(&self, name: &str) -> Result<Pipeline> {
        let path = self.path_for(name);
        log::debug!("reading model artifact {}", path.display());

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ModelErr::NotFound { path: path.clone() },
            _ => ModelErr::Io(e),
        })?;

        let value: serde_json::Value = serde_json::from_str(&content)?;
        if let Some(version) = value["format_version"].as_u64() {
            if version != u64::from(FORMAT_VERSION) {
                return Err(ModelErr::UnsupportedFormat { version });
            }
        }

        let pipeline: Pipeline = serde_json::from_value(value)?;
        pipeline.validate()?;

        for library in &pipeline.requires {
            match native::find_library(library, &self.library_dirs) {
                Some(found) => log::debug!("resolved lib{library} at {}", found.display()),
                None => {
                    return Err(ModelErr::MissingNativeLibrary {
                        library: library.clone(),
                    });
                }
            }
        }

        log::info!(
            "loaded model '{}' with {} encoded features",
            pipeline.name,
            pipeline.width()
        );
        Ok(pipeline)
    }
}

impl ModelSource for DiskStore {
    fn load(&self, name: &str) -> Result<Box<dyn Regressor>> {
        Ok(Box::new(self.load_pipeline(name)?))
    }
}

/// Loads the pipeline persisted as `<dir>/<name>.json`.
///
/// # Errors
/// See [`DiskStore::load_pipeline`].
pub fn load_model<P: AsRef<Path>>(dir: P, name: &str) -> Result<Pipeline> {
    DiskStore::new(dir.as_ref()).load_pipeline(name)
}

/// Writes `pipeline` as `<dir>/<pipeline.name>.json`.
///
/// # Errors
/// Returns `ModelErr::Io` if the file cannot be written.
pub fn save_model<P: AsRef<Path>>(pipeline: &Pipeline, dir: P) -> Result<PathBuf> {
    let path = DiskStore::new(dir.as_ref()).path_for(&pipeline.name);
    let content = serde_json::to_string_pretty(pipeline)?;
    fs::write(&path, content)?;
    Ok(path)
}
