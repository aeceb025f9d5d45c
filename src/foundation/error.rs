/// Convenience result type used across plotanim.
pub type AnimResult<T> = Result<T, AnimError>;

/// Top-level error taxonomy used by the animation APIs.
#[derive(thiserror::Error, Debug)]
pub enum AnimError {
    /// Missing or inconsistent frame-source configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Output container extension outside the supported set.
    #[error("animation extension not recognized: '{0}'")]
    UnsupportedFormat(String),

    /// Malformed caller-provided data (shapes, frame rates, frame sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures reported by an output encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Image decoding/encoding error, passed through unchanged.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// GIF encoder error, passed through unchanged.
    #[error(transparent)]
    Gif(::gif::EncodingError),

    /// IO error, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<::gif::EncodingError> for AnimError {
    fn from(err: ::gif::EncodingError) -> Self {
        match err {
            ::gif::EncodingError::Io(io) => Self::Io(io),
            other => Self::Gif(other),
        }
    }
}

impl AnimError {
    /// Build an [`AnimError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`AnimError::UnsupportedFormat`] value.
    pub fn unsupported_format(ext: impl Into<String>) -> Self {
        Self::UnsupportedFormat(ext.into())
    }

    /// Build an [`AnimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AnimError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
