mod api;
mod app;
mod application;
mod domain;
mod ui;
mod utils;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(app::ConverterApp::default, app::update, app::view)
        .title("Convertisseur de fichiers")
        .run()
}
