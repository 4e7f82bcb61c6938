use std::{error::Error, fmt, path::PathBuf};

use model::ModelSource;

use crate::{
    batch,
    branding::ImageAsset,
    configs::Settings,
    invoker,
    loader::{ModelState, MODEL_NOT_LOADED},
    page::{Element, PageView},
    record::PatientRecord,
    AppErr,
};

pub const TITLE: &str = "Insurance Charges Prediction App";
pub const SIDEBAR_HEADER: &str = "Input Features";
pub const ABOUT: &str = "This app is created to predict patient hospital charges";
pub const MODE_PROMPT: &str = "How would you like to predict?";

/// The two prediction workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Online,
    Batch,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Online, Mode::Batch];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Online => "Online",
            Mode::Batch => "Batch",
        }
    }
}

/// Everything the user has entered at the time of a render.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub mode: Mode,
    /// The record collected from the form controls.
    pub record: PatientRecord,
    /// Set only for the render triggered by pressing Predict.
    pub predict: bool,
    /// The uploaded batch file, kept across renders once chosen.
    pub upload: Option<PathBuf>,
}

/// The part of a render where an unhandled error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Branding,
    Upload,
    Prediction,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Branding => "loading images",
            Stage::Upload => "reading the uploaded file",
            Stage::Prediction => "predicting",
        };
        write!(f, "{s}")
    }
}

/// An error nothing on the page handles; the host shows it in place of the page.
#[derive(Debug)]
pub struct RenderFault {
    pub stage: Stage,
    pub error: AppErr,
}

impl RenderFault {
    fn at(stage: Stage) -> impl FnOnce(AppErr) -> Self {
        move |error| {
            log::error!("render failed while {stage}: {error}");
            Self { stage, error }
        }
    }
}

impl fmt::Display for RenderFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error while {}: {}", self.stage, self.error)
    }
}

impl Error for RenderFault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Builds the page for one interaction, top to bottom.
///
/// The model is loaded afresh from `source` on every call and dropped when the call returns.
/// A failed load degrades the page instead of failing it; the prediction routine is only
/// reached with a loaded model.
///
/// # Arguments
/// * `request` - What the user has entered.
/// * `settings` - Model and branding locations.
/// * `source` - Where the model is loaded from.
///
/// # Errors
/// Returns a `RenderFault` for failures nothing on the page handles: unreadable images,
/// malformed uploads and data the prediction routine rejects.
pub fn render(
    request: &Request,
    settings: &Settings,
    source: &dyn ModelSource,
) -> Result<PageView, RenderFault> {
    let mut page = PageView::new(TITLE);
    page.sidebar.push(Element::Header(SIDEBAR_HEADER.into()));

    let logo = ImageAsset::open(&settings.branding.logo).map_err(RenderFault::at(Stage::Branding))?;
    let hospital =
        ImageAsset::open(&settings.branding.hospital).map_err(RenderFault::at(Stage::Branding))?;

    page.main.push(Element::Image(logo));
    page.sidebar.push(Element::Info(ABOUT.into()));
    page.sidebar.push(Element::Image(hospital));

    let model = ModelState::load(source, &settings.model.name);
    if let ModelState::Unavailable(failure) = &model {
        page.sidebar.push(Element::Error(failure.remediation()));
        page.main.push(Element::Error(failure.detail()));
    }

    match request.mode {
        Mode::Online => render_online(&mut page, request, &model)?,
        Mode::Batch => render_batch(&mut page, request, &model)?,
    }

    Ok(page)
}

fn render_online(
    page: &mut PageView,
    request: &Request,
    model: &ModelState,
) -> Result<(), RenderFault> {
    page.sidebar.push(Element::Subheader("Patient Data".into()));

    if !request.predict {
        return Ok(());
    }

    match model.handle() {
        None => page.main.push(Element::Error(MODEL_NOT_LOADED.into())),
        Some(handle) => {
            let output = invoker::predict(handle, &request.record)
                .map_err(RenderFault::at(Stage::Prediction))?;
            log::info!("predicted a charge of {output}");
            page.main.push(Element::Success(format!(
                "The predicted insurance charge is: {output}"
            )));
        }
    }

    Ok(())
}

fn render_batch(
    page: &mut PageView,
    request: &Request,
    model: &ModelState,
) -> Result<(), RenderFault> {
    page.main.push(Element::Subheader("Batch Prediction".into()));

    let Some(upload) = &request.upload else {
        return Ok(());
    };

    let data = batch::read_upload(upload).map_err(RenderFault::at(Stage::Upload))?;

    match model.handle() {
        None => page.main.push(Element::Error(MODEL_NOT_LOADED.into())),
        Some(handle) => {
            let predictions = invoker::predict_batch(handle, &data)
                .map_err(RenderFault::at(Stage::Prediction))?;
            page.main.push(Element::Success("Predictions:".into()));
            page.main.push(Element::Table(predictions));
        }
    }

    Ok(())
}
