/// Convenience result type used across heatveil.
pub type HeatResult<T> = Result<T, HeatError>;

/// Error taxonomy for the fallible edges of the crate.
///
/// Heatmap operations themselves never fail: lookups that miss return `None` and mutations
/// on unknown keys are no-ops. Errors only surface while loading options or collections.
#[derive(thiserror::Error, Debug)]
pub enum HeatError {
    /// Invalid user-provided options or entries.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when deserializing options or collections.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeatError {
    /// Build a [`HeatError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeatError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for HeatError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
