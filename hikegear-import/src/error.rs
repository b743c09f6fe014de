use thiserror::Error;

/// Errors from an import call. Any error means nothing was applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Bad, oversized or missing input.
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },

    /// The remote list could not be retrieved or parsed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requester may not read the source record.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl ImportError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// HTTP status a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
        }
    }
}
