use thiserror::Error;

/// Why an identifier could not be rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The identifier violates the symbology's character set or length limits.
    #[error("cannot encode `{identifier}`: {reason}")]
    InvalidSymbolInput { identifier: String, reason: String },

    #[error("invalid render parameters: {0}")]
    InvalidParams(String),
}

impl RenderError {
    pub fn invalid_input(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSymbolInput {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Short reason suitable for summaries and log fields.
    pub fn reason(&self) -> &str {
        match self {
            RenderError::InvalidSymbolInput { reason, .. } => reason,
            RenderError::InvalidParams(msg) => msg,
        }
    }
}
