use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};

use eframe::egui::{self, Color32, RichText};
use orange_sorter_common::{analyze_image, sort_folder, Error, OnnxClassifier, SortSummary};

use crate::model::{AppState, Selection};

const LOGO_BYTES: &[u8] = include_bytes!("../assets/logo.png");

const NO_SELECTION_MESSAGE: &str = "Please select a folder or an image to analyze.";
const UNDECODABLE_MESSAGE: &str = "Could not analyze the image";

pub struct DesktopApp {
    state: AppState,
    classifier: Option<Arc<Mutex<OnnxClassifier>>>,
    model_error: Option<String>,
    task_rx: Option<Receiver<UiMessage>>,
    analyzing: bool,
    logo: Option<egui::TextureHandle>,
}

enum UiMessage {
    SortDone {
        message: String,
        summary: Option<SortSummary>,
    },
    AnalyzeDone {
        message: String,
    },
}

impl DesktopApp {
    pub fn new(cc: &eframe::CreationContext<'_>, classifier: Result<OnnxClassifier, Error>) -> Self {
        let (classifier, model_error) = match classifier {
            Ok(classifier) => (Some(Arc::new(Mutex::new(classifier))), None),
            Err(err) => (None, Some(format!("Classifier unavailable: {err}"))),
        };

        Self {
            state: AppState::default(),
            classifier,
            model_error,
            task_rx: None,
            analyzing: false,
            logo: load_logo(&cc.egui_ctx),
        }
    }

    fn select_folder(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            self.state.select_folder(path);
        }
    }

    fn select_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image files", &["png", "jpg", "jpeg"])
            .pick_file()
        {
            self.state.select_file(path);
        }
    }

    fn start_analysis(&mut self) {
        if self.analyzing {
            return;
        }

        match self.state.selection.clone() {
            Selection::None => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Error")
                    .set_description(NO_SELECTION_MESSAGE)
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            Selection::Folder(folder) => self.run_sort(folder),
            Selection::File(path) => self.run_analyze(path),
        }
    }

    /// The classifier is handed to one worker thread at a time; `analyzing`
    /// keeps a second run from starting while one is in flight. There is no
    /// cancellation once started.
    fn run_sort(&mut self, folder: PathBuf) {
        let Some(classifier) = self.classifier.clone() else {
            self.report_model_unavailable();
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.task_rx = Some(rx);
        self.analyzing = true;
        self.state.status = "Analysis running...".to_string();
        self.state.summary = None;

        std::thread::spawn(move || {
            let mut guard = classifier.lock().unwrap();
            let message = match sort_folder(&mut *guard, &folder) {
                Ok(summary) => UiMessage::SortDone {
                    message: format!(
                        "Images analyzed: {}\nImages with oranges: {}\nImages without oranges: {}",
                        summary.total, summary.oranges, summary.not_oranges
                    ),
                    summary: Some(summary),
                },
                Err(err) => UiMessage::SortDone {
                    message: format!("Analysis failed: {err}"),
                    summary: None,
                },
            };
            let _ = tx.send(message);
        });
    }

    fn run_analyze(&mut self, path: PathBuf) {
        let Some(classifier) = self.classifier.clone() else {
            self.report_model_unavailable();
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.task_rx = Some(rx);
        self.analyzing = true;
        self.state.status = "Analysis running...".to_string();
        self.state.summary = None;

        std::thread::spawn(move || {
            let mut guard = classifier.lock().unwrap();
            let message = match analyze_image(&mut *guard, &path) {
                Ok(Some(verdict)) => UiMessage::AnalyzeDone { message: verdict },
                Ok(None) => UiMessage::AnalyzeDone {
                    message: UNDECODABLE_MESSAGE.to_string(),
                },
                Err(err) => UiMessage::AnalyzeDone {
                    message: format!("Analysis failed: {err}"),
                },
            };
            let _ = tx.send(message);
        });
    }

    fn report_model_unavailable(&mut self) {
        self.state.result_text = self
            .model_error
            .clone()
            .unwrap_or_else(|| "Classifier unavailable".to_string());
    }

    fn poll_messages(&mut self) {
        let Some(rx) = &self.task_rx else {
            return;
        };

        if let Ok(msg) = rx.try_recv() {
            match msg {
                UiMessage::SortDone { message, summary } => {
                    self.state.result_text = message;
                    self.state.summary = summary;
                }
                UiMessage::AnalyzeDone { message } => {
                    self.state.result_text = message;
                }
            }
            self.analyzing = false;
            self.task_rx = None;
            self.state.status.clear();
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.analyzing {
            ctx.request_repaint();
        }
        self.poll_messages();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("ORANGE DETECTOR").strong());
                ui.add_space(12.0);

                if let Some(logo) = &self.logo {
                    ui.add(egui::Image::new(logo).fit_to_exact_size(egui::vec2(100.0, 100.0)));
                    ui.add_space(12.0);
                }

                ui.label("Select the folder of images to analyze");
                if ui.button("Select folder").clicked() {
                    self.select_folder();
                }
                ui.add_space(10.0);

                ui.label("Select a single image to analyze (optional)");
                if ui.button("Select image").clicked() {
                    self.select_image();
                }
                ui.add_space(10.0);

                match &self.state.selection {
                    Selection::None => {}
                    Selection::Folder(path) => {
                        ui.label(
                            RichText::new(format!("Folder: {}", path.display()))
                                .color(Color32::from_gray(170))
                                .size(12.0),
                        );
                    }
                    Selection::File(path) => {
                        ui.label(
                            RichText::new(format!("Image: {}", path.display()))
                                .color(Color32::from_gray(170))
                                .size(12.0),
                        );
                    }
                }
                ui.add_space(10.0);

                if ui
                    .add_enabled(!self.analyzing, egui::Button::new("Start analysis"))
                    .clicked()
                {
                    self.start_analysis();
                }

                ui.add_space(16.0);
                ui.separator();
                ui.heading(RichText::new("Results").size(16.0));
                ui.add_space(6.0);

                if !self.state.status.is_empty() {
                    ui.label(RichText::new(&self.state.status).color(Color32::from_gray(170)));
                }
                if !self.state.result_text.is_empty() {
                    ui.label(&self.state.result_text);
                }

                if let Some(summary) = self.state.summary.clone() {
                    ui.add_space(10.0);
                    if ui.button("Open images with oranges").clicked() {
                        open_folder(&summary.oranges_dir, &mut self.state.status);
                    }
                    if ui.button("Open images without oranges").clicked() {
                        open_folder(&summary.not_oranges_dir, &mut self.state.status);
                    }
                }
            });
        });
    }
}

fn load_logo(ctx: &egui::Context) -> Option<egui::TextureHandle> {
    let image = image::load_from_memory(LOGO_BYTES).ok()?;
    let size = [image.width() as usize, image.height() as usize];
    let pixels = image.to_rgba8().into_raw();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
    Some(ctx.load_texture("logo", color_image, egui::TextureOptions::default()))
}

fn open_folder(path: &Path, status: &mut String) {
    if let Err(err) = open::that(path) {
        *status = format!("Could not open {}: {err}", path.display());
    }
}
