/// Convenience result type used across Glissade.
pub type GlissadeResult<T> = Result<T, GlissadeError>;

/// Top-level error taxonomy used by orchestrator APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlissadeError {
    /// Invalid user-provided configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while validating or sampling animation descriptors.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while registering or evaluating watched regions.
    #[error("trigger error: {0}")]
    Trigger(String),

    /// Errors from scroll-source commands.
    #[error("scroll error: {0}")]
    Scroll(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlissadeError {
    /// Build a [`GlissadeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlissadeError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GlissadeError::Trigger`] value.
    pub fn trigger(msg: impl Into<String>) -> Self {
        Self::Trigger(msg.into())
    }

    /// Build a [`GlissadeError::Scroll`] value.
    pub fn scroll(msg: impl Into<String>) -> Self {
        Self::Scroll(msg.into())
    }

    /// Build a [`GlissadeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
