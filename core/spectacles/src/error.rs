use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpectaclesError {
    #[error("unknown frame color: {0}")]
    UnknownColor(String),

    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("no face detector configured")]
    MissingFaceDetector,

    #[error("no eye detector configured")]
    MissingEyeDetector,

    #[error("failed to load face model: {0}")]
    ModelLoad(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SpectaclesError {
    /// Whether this error means the candidate image itself is unusable.
    ///
    /// The selector skips such candidates instead of failing the whole run.
    pub fn is_malformed_image(&self) -> bool {
        matches!(self, Self::DecodeError(_) | Self::ZeroDimensions)
    }
}
