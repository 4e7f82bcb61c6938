use std::path::PathBuf;

use insurance_app::{
    configs::Settings,
    form::PatientForm,
    page::PageView,
    render, Mode, RenderFault, Request,
};
use model::DiskStore;

/// Everything that survives between interactions, plus the page the last one produced.
///
/// Each interaction re-runs the whole render; nothing from a previous page is reused.
pub struct Session {
    pub settings: Settings,
    store: DiskStore,
    pub form: PatientForm,
    pub mode: Mode,
    pub upload: Option<PathBuf>,
    outcome: Result<PageView, RenderFault>,
}

impl Session {
    /// Creates a new `Session` and renders the first page.
    ///
    /// # Args
    /// * `settings` - Model and branding locations.
    /// * `store` - Where the model is loaded from on every render.
    pub fn new(settings: Settings, store: DiskStore) -> Self {
        let form = PatientForm::default();
        let request = Request {
            mode: Mode::Online,
            record: form.collect(),
            predict: false,
            upload: None,
        };
        let outcome = render(&request, &settings, &store);

        Self {
            settings,
            store,
            form,
            mode: Mode::Online,
            upload: None,
            outcome,
        }
    }

    /// Re-runs the render with the current inputs.
    ///
    /// `predict` only applies to this render; the next one starts untriggered.
    pub fn rerender(&mut self, predict: bool) {
        let request = Request {
            mode: self.mode,
            record: self.form.collect(),
            predict,
            upload: self.upload.clone(),
        };

        log::debug!("rendering {} page (predict: {predict})", self.mode.label());
        self.outcome = render(&request, &self.settings, &self.store);
    }

    /// Switches the workflow and renders it.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.rerender(false);
    }

    /// Chooses a batch file and renders the page with it.
    pub fn choose_upload(&mut self, path: PathBuf) {
        self.upload = Some(path);
        self.rerender(false);
    }

    /// Leaves the error surface, dropping the upload that may have caused it.
    pub fn dismiss_fault(&mut self) {
        self.upload = None;
        self.rerender(false);
    }

    pub fn page(&self) -> Option<&PageView> {
        self.outcome.as_ref().ok()
    }

    pub fn fault(&self) -> Option<&RenderFault> {
        self.outcome.as_ref().err()
    }
}
