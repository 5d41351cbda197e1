pub type StradaResult<T> = Result<T, StradaError>;

/// Error categories follow the crate layers: `Validation` for page models and
/// viewports, `Animation` for timeline construction, `Evaluation` for
/// choreography assembly against a solved layout, `Serde` for page and
/// snapshot JSON. Frame decode failures are not errors; the preloader counts
/// them as completions and leaves the slot empty.
#[derive(thiserror::Error, Debug)]
pub enum StradaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StradaError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
