/// Convenience result type used across posterframe.
pub type PosterframeResult<T> = Result<T, PosterframeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Geometry resolution never fails; errors only come from boundary inputs
/// (image dimensions, persisted metadata, configuration).
#[derive(thiserror::Error, Debug)]
pub enum PosterframeError {
    /// Natural image dimensions were non-finite or non-positive.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions {
        /// Width as reported by the dimension probe.
        width: f64,
        /// Height as reported by the dimension probe.
        height: f64,
    },

    /// Invalid user-provided metadata or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterframeError {
    /// Build a [`PosterframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PosterframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
