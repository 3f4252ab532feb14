use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Media not found: {0}")]
    MediaNotFound(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}
