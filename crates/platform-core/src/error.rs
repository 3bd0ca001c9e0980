use thiserror::Error;

/// Validation errors for declared `Domain` state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid domain id: {0}")]
    InvalidId(String),

    #[error("Domain {0} declares no environments")]
    NoEnvironments(String),

    #[error("Domain {id} declares a blank environment at position {index}")]
    BlankEnvironment { id: String, index: usize },
}

impl CoreError {
    /// Create a new InvalidId error
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
