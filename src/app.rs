use std::path::PathBuf;

use futures::StreamExt;
use iced::Task;

use crate::api::ApiClient;
use crate::application::{ConversionCoordinator, DownloadEvent};
use crate::domain::{AppError, ConversionOutcome, ConversionPlan};
use crate::ui::transitions::{self, VisualChange};
use crate::ui::{ConverterMessage, ConverterView, CONVERTING_LABEL, CONVERT_LABEL};

pub struct ConverterApp {
    view: ConverterView,
    coordinator: ConversionCoordinator,
}

impl Default for ConverterApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterApp {
    pub fn new() -> Self {
        let coordinator = ConversionCoordinator::new(ApiClient::new(Default::default()));
        let view = ConverterView::default();

        Self { view, coordinator }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(ConverterMessage),
    FileSelected(Option<PathBuf>),
    ConversionFinished(Result<ConversionOutcome, AppError>),
    /// One step of a button transition sequence
    Transition(Vec<VisualChange>),
    /// (Selected Path, Download URL)
    SavePathSelected(Option<PathBuf>, String),
    /// Download progress (0.0 to 1.0)
    DownloadProgress(f32),
    /// Final result after downloading and saving
    DownloadCompleted(Result<PathBuf, AppError>),
    AlertClosed,
}

pub fn update(app: &mut ConverterApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                ConverterMessage::PickFilePressed => {
                    return Task::perform(
                        async move {
                            rfd::AsyncFileDialog::new()
                                .pick_file()
                                .await
                                .map(|handle| handle.path().to_path_buf())
                        },
                        Message::FileSelected,
                    );
                }
                ConverterMessage::ConvertPressed => return handle_convert_pressed(app),
                ConverterMessage::DownloadPressed => return handle_download_pressed(app),
                ConverterMessage::TargetFormatSelected(_) => {}
            }
        }
        Message::FileSelected(path_opt) => {
            if let Some(path) = path_opt {
                app.view.status_message = format!("Fichier : {}", path.display());
                app.view.input_file = Some(path);
            }
        }
        Message::ConversionFinished(result) => {
            // The convert button always comes back enabled, whatever happened.
            app.view.is_converting = false;
            app.view.convert_enabled = true;
            app.view.convert_label = CONVERT_LABEL.to_string();

            match result {
                Ok(ConversionOutcome::Success { download_url }) => {
                    app.view.status_message = "Conversion terminée".to_string();
                    return Task::stream(
                        transitions::run(transitions::reveal(download_url))
                            .map(Message::Transition),
                    );
                }
                Ok(ConversionOutcome::Failure { message }) => {
                    app.view.visuals.apply(VisualChange::ConvertShrunk(false));
                    app.view.status_message = "La conversion a échoué".to_string();
                    return alert(format!("Erreur : {}", message));
                }
                Err(e) => {
                    // Transport or malformed reply: logged, not alerted.
                    log::error!("Erreur pendant la conversion : {}", e);
                    app.view.visuals.apply(VisualChange::ConvertShrunk(false));
                    app.view.status_message = "La conversion a échoué".to_string();
                }
            }
        }
        Message::Transition(changes) => {
            app.view.visuals.apply_all(changes);
        }
        Message::SavePathSelected(path_opt, url) => match path_opt {
            Some(path) => {
                app.view.is_downloading = true;
                app.view.download_progress = 0.0;
                app.view.status_message = format!("Téléchargement vers : {}", path.display());

                let stream = app.coordinator.download_stream(url, path);
                return Task::stream(stream.map(|event| match event {
                    DownloadEvent::Progress(progress) => Message::DownloadProgress(progress),
                    DownloadEvent::Completed(path) => Message::DownloadCompleted(Ok(path)),
                    DownloadEvent::Failed(e) => Message::DownloadCompleted(Err(e)),
                }));
            }
            None => {
                app.view.status_message = "Téléchargement annulé".to_string();
            }
        },
        Message::DownloadProgress(progress) => {
            app.view.download_progress = progress;
            if progress >= 1.0 {
                app.view.status_message = "Téléchargement terminé, finalisation...".to_string();
            } else {
                app.view.status_message = format!("Téléchargement : {:.1}%", progress * 100.0);
            }
        }
        Message::DownloadCompleted(result) => {
            app.view.is_downloading = false;
            app.view.download_progress = 0.0;
            match result {
                Ok(path) => {
                    app.view.status_message = format!("Enregistré : {}", path.display());
                }
                Err(e) => {
                    log::error!("Erreur pendant le téléchargement : {}", e);
                    app.view.status_message = format!("Échec du téléchargement : {}", e);
                }
            }
        }
        Message::AlertClosed => {}
    }
    Task::none()
}

/// Start one conversion cycle: tear down a leftover download button, lock
/// the convert button, and send the upload. Overlapping cycles are refused.
fn handle_convert_pressed(app: &mut ConverterApp) -> Task<Message> {
    if app.view.is_converting {
        return Task::none();
    }

    let Some(input_file) = app.view.input_file.clone() else {
        app.view.status_message = AppError::NoInputFile.to_string();
        return Task::none();
    };

    let plan = ConversionPlan {
        input_file,
        target_format: app.view.target_format,
    };

    app.view.is_converting = true;
    app.view.convert_enabled = false;
    app.view.convert_label = CONVERTING_LABEL.to_string();
    app.view.status_message = "Envoi du fichier...".to_string();

    let mut tasks = Vec::new();

    // A download button left over from the previous cycle is retired first.
    if app.view.visuals.download_visible {
        tasks.push(Task::stream(
            transitions::run(transitions::teardown()).map(Message::Transition),
        ));
    }

    let coordinator = app.coordinator.clone();
    tasks.push(Task::perform(
        async move { coordinator.convert(plan).await },
        Message::ConversionFinished,
    ));

    Task::batch(tasks)
}

fn handle_download_pressed(app: &mut ConverterApp) -> Task<Message> {
    let Some(url) = app.view.visuals.download_url.clone() else {
        return alert("Aucune URL de téléchargement n'est disponible !".to_string());
    };

    if app.view.is_downloading {
        return Task::none();
    }

    let suggested_filename = match &app.view.input_file {
        Some(input) => crate::utils::suggested_output_filename(input, app.view.target_format),
        None => "converted".to_string(),
    };

    let coordinator = app.coordinator.clone();
    Task::perform(
        async move {
            let path = coordinator.choose_save_path(suggested_filename).await;
            (path, url)
        },
        |(path, url)| Message::SavePathSelected(path, url),
    )
}

fn alert(description: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title("Convertisseur de fichiers")
                .set_description(description)
                .show()
                .await;
        },
        |_| Message::AlertClosed,
    )
}

pub fn view(app: &ConverterApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
