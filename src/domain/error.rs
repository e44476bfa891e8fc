//! Domain error types.
//!
//! Missing indicator history is not an error: indicators return `None`
//! and the decision rules branch on it. Only invalid input, invalid
//! configuration and I/O problems surface here.

/// Top-level error type for candlesim.
#[derive(Debug, thiserror::Error)]
pub enum CandlesimError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid configuration {key}: {reason}")]
    InvalidConfiguration { key: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("candle data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CandlesimError {
    pub fn invalid_config(key: &str, reason: impl Into<String>) -> Self {
        CandlesimError::InvalidConfiguration {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error family.
    pub fn exit_status(&self) -> u8 {
        match self {
            CandlesimError::Io(_) | CandlesimError::Json(_) => 1,
            CandlesimError::ConfigParse { .. } | CandlesimError::InvalidConfiguration { .. } => 2,
            CandlesimError::Data { .. } => 3,
            CandlesimError::InvalidInput { .. } => 5,
        }
    }
}

impl From<&CandlesimError> for std::process::ExitCode {
    fn from(err: &CandlesimError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
