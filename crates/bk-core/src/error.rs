use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Theme slug not part of the closed catalogue.
    #[error("Thème inconnu : {slug}")]
    UnknownTheme {
        /// The slug that failed to parse.
        slug: String,
    },

    /// Referenced file does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },
}
