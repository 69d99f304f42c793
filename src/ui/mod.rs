pub mod transitions;

use std::path::PathBuf;

use iced::{
    widget::{button, column, pick_list, progress_bar, text, Space},
    Element, Length,
};

use crate::domain::TargetFormat;
use self::transitions::ButtonVisuals;

pub const CONVERT_LABEL: &str = "Convertir";
pub const CONVERTING_LABEL: &str = "Conversion...";
pub const DOWNLOAD_LABEL: &str = "Télécharger";

const BUTTON_FULL_WIDTH: f32 = 220.0;
const BUTTON_COLLAPSED_WIDTH: f32 = 48.0;

/// Main view state
pub struct ConverterView {
    pub input_file: Option<PathBuf>,
    pub target_format: TargetFormat,
    pub status_message: String,
    pub convert_label: String,
    pub convert_enabled: bool,
    pub is_converting: bool,
    pub is_downloading: bool,
    pub download_progress: f32,
    pub visuals: ButtonVisuals,
}

impl Default for ConverterView {
    fn default() -> Self {
        Self {
            input_file: None,
            target_format: TargetFormat::Pdf,
            status_message: "Choisissez un fichier à convertir".to_string(),
            convert_label: CONVERT_LABEL.to_string(),
            convert_enabled: true,
            is_converting: false,
            is_downloading: false,
            download_progress: 0.0,
            visuals: ButtonVisuals::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConverterMessage {
    PickFilePressed,
    TargetFormatSelected(TargetFormat),
    ConvertPressed,
    DownloadPressed,
}

impl ConverterView {
    pub fn update(&mut self, message: ConverterMessage) {
        match message {
            ConverterMessage::TargetFormatSelected(format) => {
                self.target_format = format;
            }
            ConverterMessage::PickFilePressed
            | ConverterMessage::ConvertPressed
            | ConverterMessage::DownloadPressed => {
                // Handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, ConverterMessage> {
        let input_label = self
            .input_file
            .as_deref()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .unwrap_or("Aucun fichier sélectionné");

        let convert_width = if self.visuals.convert_shrunk {
            Length::Fixed(BUTTON_COLLAPSED_WIDTH)
        } else {
            Length::Fixed(BUTTON_FULL_WIDTH)
        };

        let convert_button = button(text(&self.convert_label).size(16))
            .on_press_maybe(
                self.convert_enabled
                    .then_some(ConverterMessage::ConvertPressed),
            )
            .width(convert_width)
            .padding([10, 20]);

        let mut content = column![
            text("Convertisseur de fichiers").size(32),
            Space::new().height(Length::Fixed(20.0)),
            button("Choisir un fichier...")
                .on_press(ConverterMessage::PickFilePressed)
                .padding(10),
            text(input_label).size(14),
            Space::new().height(Length::Fixed(10.0)),
            text("Format cible :").size(16),
            pick_list(
                TargetFormat::ALL,
                Some(self.target_format),
                ConverterMessage::TargetFormatSelected,
            )
            .padding(10),
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
            Space::new().height(Length::Fixed(20.0)),
            convert_button,
        ];

        if self.visuals.download_visible {
            let download_width = if self.visuals.download_grown {
                Length::Fixed(BUTTON_FULL_WIDTH)
            } else {
                Length::Fixed(BUTTON_COLLAPSED_WIDTH)
            };

            content = content
                .push(Space::new().height(Length::Fixed(10.0)))
                .push(
                    button(text(DOWNLOAD_LABEL).size(16))
                        .on_press(ConverterMessage::DownloadPressed)
                        .width(download_width)
                        .padding([10, 20]),
                );
        }

        if self.is_downloading {
            content = content
                .push(Space::new().height(Length::Fixed(10.0)))
                .push(progress_bar(0.0..=1.0, self.download_progress));
        }

        content.padding(20).spacing(10).into()
    }
}
