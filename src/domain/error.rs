use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Aucun fichier sélectionné")]
    NoInputFile,

    #[error("Les formats source et cible sont identiques")]
    SameFormat,

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(String),
}
