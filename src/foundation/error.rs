/// Convenience result type used across the compositing engine.
pub type PhotoboothResult<T> = Result<T, PhotoboothError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Template and photo decode problems are normally recovered inside the engine (fallback
/// template, placeholder slot) and only surface here from the low-level decode helpers.
#[derive(thiserror::Error, Debug)]
pub enum PhotoboothError {
    /// Invalid caller-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoded image bytes could not be turned into pixels.
    #[error("decode error: {0}")]
    Decode(String),

    /// The final composite could not be encoded. No artifact is produced.
    #[error("encode error: {0}")]
    Encode(String),

    /// The caller cancelled the compose operation.
    #[error("compose cancelled")]
    Cancelled,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotoboothError {
    /// Build a [`PhotoboothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotoboothError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PhotoboothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PhotoboothError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
