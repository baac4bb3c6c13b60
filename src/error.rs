use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or setting that caused the error (e.g., "endpoint", "NESSIE_HTTP_TIMEOUT_SECS")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config_resolver", "keyed_factory_cache")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the tree client.
///
/// Construction-side failures (`Configuration`, `Construction`) come out of the
/// keyed caches; request-side failures (`Transport`, `Remote`, `Serialization`)
/// are relayed from the HTTP layer untouched.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Client construction error: {message}{}", format_context(.context))]
    Construction {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote error: HTTP {status}: {message}")]
    Remote { status: u16, message: String },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new construction error with structured context
    pub fn construction_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Construction {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Construction { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = Error::configuration_with_context(
            "endpoint is not an absolute URL",
            ErrorContext::new()
                .with_field_path("endpoint")
                .with_source("config_resolver"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error: endpoint is not an absolute URL"));
        assert!(msg.contains("field: endpoint"));
        assert!(msg.contains("source: config_resolver"));
    }

    #[test]
    fn test_display_without_context() {
        let err = Error::construction_with_context("boom", ErrorContext::default());
        assert_eq!(err.to_string(), "Client construction error: boom");
    }

    #[test]
    fn test_remote_has_no_context() {
        let err = Error::Remote {
            status: 404,
            message: "not found".into(),
        };
        assert!(err.context().is_none());
    }
}
