use crate::provider::Provider;

/// Reason string shown to the user for any comparison-path failure.
///
/// Fetch and decode failures are kept as distinct variants for diagnostics,
/// but the presentation layer only ever sees this one message.
pub const COMPARISON_FAILED_MSG: &str = "Failed to fetch comparison data";

/// Reason string used when a comparison request exceeds its deadline.
pub const COMPARISON_TIMEOUT_MSG: &str = "Comparison request timed out";

/// Engine error types
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A provider's instance catalog could not be retrieved. Non-fatal:
    /// the provider's selector is left empty and the others proceed.
    #[error("Catalog unavailable for {provider}: {reason}")]
    CatalogUnavailable { provider: Provider, reason: String },

    /// Network failure or non-success status on the comparison request
    #[error("Fetch error{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Fetch { status: Option<u16>, message: String },

    /// Comparison payload could not be parsed as the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request rejected before any fetch was issued
    #[error("Validation error: {0}")]
    Validation(String),

    /// Comparison request exceeded its deadline
    #[error("Request timed out")]
    Timeout,

    /// Configuration load or validation failure
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Collapse into the single human-readable reason consumed by
    /// `RequestState::Failed`.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::Fetch { .. } | EngineError::Decode(_) => {
                COMPARISON_FAILED_MSG.to_string()
            }
            EngineError::Timeout => COMPARISON_TIMEOUT_MSG.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return EngineError::Timeout;
        }
        if err.is_decode() {
            return EngineError::Decode(err.to_string());
        }
        EngineError::Fetch {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Decode(err.to_string())
    }
}
