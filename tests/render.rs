use std::{
    cell::Cell as Counter,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use approx::assert_relative_eq;
use insurance_app::{
    configs::Settings,
    form::PatientForm,
    loader::MODEL_NOT_LOADED,
    page::Element,
    record::{PatientRecord, Region, Sex, Smoker},
    render, AppErr, Mode, Request, Stage, TITLE,
};
use model::{Cell, DiskStore, ModelErr, ModelSource, Regressor, Table, PREDICTION_COLUMN};
use tempfile::TempDir;

const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR\x00\x00\x00\x10\x00\x00\x00\x10";
const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

fn repo() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Settings with branding images in a scratch directory and the demo model.
fn settings(assets: &TempDir) -> Settings {
    let logo = assets.path().join("logo.png");
    let hospital = assets.path().join("hospital.jpeg");
    fs::write(&logo, PNG_HEADER).unwrap();
    fs::write(&hospital, JPEG_HEADER).unwrap();

    let mut settings = Settings::default();
    settings.branding.logo = logo;
    settings.branding.hospital = hospital;
    settings.model.dir = repo().join("models");
    settings
}

fn demo_store() -> DiskStore {
    DiskStore::new(repo().join("models")).with_library_dirs(Vec::new())
}

fn scenario_record() -> PatientRecord {
    PatientRecord {
        age: 30,
        sex: Sex::Male,
        bmi: 25.0,
        children: 0,
        smoker: Smoker::No,
        region: Region::Northeast,
    }
}

fn online(predict: bool) -> Request {
    Request {
        mode: Mode::Online,
        record: scenario_record(),
        predict,
        upload: None,
    }
}

fn batch(upload: &Path) -> Request {
    Request {
        mode: Mode::Batch,
        record: PatientForm::default().collect(),
        predict: false,
        upload: Some(upload.to_path_buf()),
    }
}

/// A source whose load always fails with the error built by `make`.
struct Broken(fn() -> ModelErr);

impl ModelSource for Broken {
    fn load(&self, _name: &str) -> model::Result<Box<dyn Regressor>> {
        Err((self.0)())
    }
}

/// A source handing out a model that counts how often it is asked to predict.
struct Probe {
    calls: Rc<Counter<usize>>,
}

struct ProbeModel {
    calls: Rc<Counter<usize>>,
}

impl Regressor for ProbeModel {
    fn name(&self) -> &str {
        "probe"
    }

    fn predict(&self, data: &Table) -> model::Result<Vec<f64>> {
        self.calls.set(self.calls.get() + 1);
        Ok(vec![1.0; data.nrows()])
    }
}

impl ModelSource for Probe {
    fn load(&self, _name: &str) -> model::Result<Box<dyn Regressor>> {
        Ok(Box::new(ProbeModel {
            calls: Rc::clone(&self.calls),
        }))
    }
}

#[test]
fn online_prediction_with_loaded_model() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);

    let page = render(&online(true), &settings, &demo_store()).unwrap();

    assert_eq!(page.title, TITLE);
    assert!(page.errors().is_empty());
    let successes = page.successes();
    assert_eq!(successes.len(), 1);
    assert_eq!(
        successes[0],
        "The predicted insurance charge is: 4528.1375"
    );
}

#[test]
fn online_without_trigger_shows_no_prediction() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let calls = Rc::new(Counter::new(0));

    let page = render(&online(false), &settings, &Probe { calls: calls.clone() }).unwrap();

    assert!(page.successes().is_empty());
    assert_eq!(calls.get(), 0);
    assert!(page
        .sidebar
        .contains(&Element::Subheader("Patient Data".into())));
}

#[test]
fn every_valid_record_yields_one_prediction() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let store = demo_store();

    for age in [18u8, 42, 43, 100] {
        for bmi in [10.0, 30.0, 30.01, 50.0] {
            for children in [0u8, 2, 10] {
                for smoker in [Smoker::Yes, Smoker::No] {
                    let request = Request {
                        record: PatientRecord {
                            age,
                            sex: Sex::Female,
                            bmi,
                            children,
                            smoker,
                            region: Region::Southwest,
                        },
                        ..online(true)
                    };

                    let page = render(&request, &settings, &store).unwrap();
                    assert_eq!(page.successes().len(), 1);
                }
            }
        }
    }
}

#[test]
fn missing_native_dependency_degrades_both_modes() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let source = Broken(|| ModelErr::MissingNativeLibrary {
        library: "omp".into(),
    });

    let page = render(&online(true), &settings, &source).unwrap();

    let sidebar_errors: Vec<_> = page
        .sidebar
        .iter()
        .filter_map(|e| match e {
            Element::Error(msg) => Some(msg),
            _ => None,
        })
        .collect();
    assert_eq!(sidebar_errors.len(), 1);
    assert!(sidebar_errors[0].contains("libomp"));
    assert!(page.main.contains(&Element::Error(MODEL_NOT_LOADED.into())));
    assert!(page
        .main
        .iter()
        .any(|e| matches!(e, Element::Error(msg) if msg.starts_with("Model load error:"))));
    assert!(page.successes().is_empty());

    let upload = repo().join("demos/batch_sample.csv");
    let page = render(&batch(&upload), &settings, &source).unwrap();
    assert!(page.main.contains(&Element::Error(MODEL_NOT_LOADED.into())));
    assert!(page.table().is_none());
}

#[test]
fn missing_artifact_is_named_in_the_sidebar() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);

    let mut missing = settings.clone();
    missing.model.name = "not_there".into();
    let source = demo_store();

    let page = render(&online(true), &missing, &source).unwrap();
    assert!(page.errors().contains(&MODEL_NOT_LOADED));
    assert!(page
        .sidebar
        .iter()
        .any(|e| matches!(e, Element::Error(msg) if msg.contains("not_there.json"))));
}

#[test]
fn batch_of_five_rows_gains_a_prediction_column() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let upload = repo().join("demos/batch_sample.csv");
    let input = Table::from_csv_path(&upload).unwrap();

    let page = render(&batch(&upload), &settings, &demo_store()).unwrap();

    assert!(page.successes().contains(&"Predictions:"));
    let table = page.table().unwrap();
    assert_eq!(table.nrows(), 5);
    assert_eq!(table.ncols(), input.ncols() + 1);
    assert_eq!(&table.columns()[..input.ncols()], input.columns());
    assert_eq!(table.rows()[0][..input.ncols()], input.rows()[0][..]);

    let first = table.get(0, PREDICTION_COLUMN).and_then(Cell::as_f64).unwrap();
    assert_relative_eq!(first, 17263.8812);
    let third = table.get(2, PREDICTION_COLUMN).and_then(Cell::as_f64).unwrap();
    assert_relative_eq!(third, 6893.4872);
}

#[test]
fn batch_without_upload_only_shows_the_uploader() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let calls = Rc::new(Counter::new(0));

    let request = Request {
        upload: None,
        ..batch(Path::new("unused.csv"))
    };
    let page = render(&request, &settings, &Probe { calls: calls.clone() }).unwrap();

    assert!(page
        .main
        .contains(&Element::Subheader("Batch Prediction".into())));
    assert!(page.table().is_none());
    assert_eq!(calls.get(), 0);
}

#[test]
fn batch_n_rows_keep_every_column() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let calls = Rc::new(Counter::new(0));

    let upload = assets.path().join("wide.csv");
    let mut content = String::from("id,age,sex,bmi,children,smoker,region,note\n");
    for i in 0..12 {
        content.push_str(&format!("{i},{},male,25.0,0,no,northeast,row {i}\n", 20 + i));
    }
    fs::write(&upload, content).unwrap();

    let page = render(&batch(&upload), &settings, &Probe { calls: calls.clone() }).unwrap();
    let table = page.table().unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(table.nrows(), 12);
    assert_eq!(table.ncols(), 9);
    assert_eq!(table.columns()[7], "note");
    assert_eq!(table.columns()[8], PREDICTION_COLUMN);
}

#[test]
fn batch_missing_columns_fault_at_prediction() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let upload = assets.path().join("partial.csv");
    fs::write(&upload, "age,sex\n30,male\n").unwrap();

    let fault = render(&batch(&upload), &settings, &demo_store()).unwrap_err();

    assert_eq!(fault.stage, Stage::Prediction);
    assert!(matches!(
        fault.error,
        AppErr::Prediction(ModelErr::MissingColumn { .. })
    ));
}

#[test]
fn malformed_upload_faults_before_the_model_check() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let upload = assets.path().join("ragged.csv");
    fs::write(&upload, "age,sex\n30,male,extra\n").unwrap();
    let source = Broken(|| ModelErr::NotFound {
        path: PathBuf::from("models/x.json"),
    });

    let fault = render(&batch(&upload), &settings, &source).unwrap_err();

    assert_eq!(fault.stage, Stage::Upload);
    assert!(matches!(fault.error, AppErr::Upload { .. }));
}

#[test]
fn missing_branding_image_is_a_fault() {
    let assets = tempfile::tempdir().unwrap();
    let mut settings = settings(&assets);
    settings.branding.hospital = assets.path().join("missing.jpeg");

    let fault = render(&online(false), &settings, &demo_store()).unwrap_err();

    assert_eq!(fault.stage, Stage::Branding);
    assert!(fault.to_string().contains("missing.jpeg"));
}

#[test]
fn images_are_placed_like_the_page_layout() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);

    let page = render(&online(false), &settings, &demo_store()).unwrap();

    assert!(matches!(&page.main[0], Element::Image(img) if img.path.ends_with("logo.png")));
    assert!(page
        .sidebar
        .iter()
        .any(|e| matches!(e, Element::Image(img) if img.path.ends_with("hospital.jpeg"))));
}

#[test]
fn same_form_values_render_the_same_page() {
    let assets = tempfile::tempdir().unwrap();
    let settings = settings(&assets);
    let store = demo_store();
    let form = PatientForm::default();

    let request = Request {
        record: form.collect(),
        ..online(true)
    };
    let again = Request {
        record: form.collect(),
        ..online(true)
    };

    assert_eq!(request, again);
    assert_eq!(
        render(&request, &settings, &store).unwrap(),
        render(&again, &settings, &store).unwrap()
    );
}
