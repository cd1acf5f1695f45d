/// Convenience result type used across kvcompose.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degenerate geometry is never an error: layers with unusable boxes are dropped and recorded
/// in the [`crate::RenderReport`]. Errors are reserved for caller data that makes a whole render
/// impossible.
#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    /// Invalid caller-provided canvas, descriptor or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The rasterizer could not honour a request (e.g. canvas exceeds backend limits).
    #[error("render error: {0}")]
    Render(String),

    /// A font file existed but could not be read or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Errors when serializing or deserializing descriptors and configs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposeError {
    /// Build a [`ComposeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ComposeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ComposeError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ComposeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
