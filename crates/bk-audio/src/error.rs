use thiserror::Error;

/// Errors originating from the audio module.
#[derive(Error, Debug)]
pub enum AudioError {
    /// The platform declined to start playback. The only failure kind the
    /// toggle recognizes: on the resume path it downgrades the persisted
    /// flag, on the manual path it is logged and dropped.
    #[error("Lecture refusée par la plateforme : {0}")]
    PlaybackRefused(String),

    /// No audio output device found.
    #[error("Aucun périphérique audio de sortie trouvé")]
    NoOutputDevice,

    /// Audio decode error.
    #[error("Erreur de décodage : {0}")]
    Decode(String),

    /// Audio stream error.
    #[error("Erreur de stream audio : {0}")]
    Stream(String),
}
