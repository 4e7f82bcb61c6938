use model::{ModelErr, ModelSource, Regressor};

/// Shown instead of a prediction when there is no model to call.
pub const MODEL_NOT_LOADED: &str =
    "Model is not loaded. See the sidebar for details and install instructions.";

/// Why the model could not be loaded for this render.
#[derive(Debug)]
pub struct LoadFailure {
    pub error: ModelErr,
}

impl LoadFailure {
    /// The sidebar message: what failed and the most likely way to fix it.
    pub fn remediation(&self) -> String {
        match &self.error {
            ModelErr::MissingNativeLibrary { library } => native_remediation(library),
            ModelErr::NotFound { path } => format!(
                "Model failed to load: there is no model artifact at '{}'. Export the trained \
                 model there or point `model.dir` in the settings at it. Full error printed in \
                 the main area.",
                path.display()
            ),
            ModelErr::Corrupt { .. } | ModelErr::UnsupportedFormat { .. } => {
                "Model failed to load: the model artifact is damaged or was written by an \
                 incompatible version. Re-export the trained model. Full error printed in the \
                 main area."
                    .to_string()
            }
            _ => native_remediation("omp"),
        }
    }

    /// The main area message carrying the full error.
    pub fn detail(&self) -> String {
        format!("Model load error: {}", self.error)
    }
}

fn native_remediation(library: &str) -> String {
    format!(
        "Model failed to load. If you see an error mentioning 'lib{library}', install \
         lib{library} (Homebrew: `brew install lib{library}`) or use conda: \
         `conda install -c conda-forge lib{library}`. Full error printed in the main area."
    )
}

/// The outcome of loading the model for one render.
pub enum ModelState {
    Loaded(Box<dyn Regressor>),
    Unavailable(LoadFailure),
}

impl ModelState {
    /// Loads the model named `name` from `source`, never failing.
    ///
    /// # Returns
    /// `Loaded` with the handle, or `Unavailable` with the reason.
    pub fn load(source: &dyn ModelSource, name: &str) -> Self {
        match source.load(name) {
            Ok(handle) => {
                log::debug!("model '{name}' ready");
                Self::Loaded(handle)
            }
            Err(error) => {
                log::warn!("model '{name}' unavailable: {error}");
                Self::Unavailable(LoadFailure { error })
            }
        }
    }

    /// Returns the handle if the model loaded.
    pub fn handle(&self) -> Option<&dyn Regressor> {
        match self {
            Self::Loaded(handle) => Some(handle.as_ref()),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}
