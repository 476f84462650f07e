use thiserror::Error;

/// Main error type for the scraping engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Render service credential missing or blank
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Render service returned non-2xx, or the request never completed
    #[error("{}", upstream_message(.status, .message))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Cache backend unreachable or rejected the command
    #[error("Cache transport error: {0}")]
    CacheTransport(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

fn upstream_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Render service returned {}: {}", code, message),
        None => format!("Render service request failed: {}", message),
    }
}

impl EngineError {
    /// Failure coming from the render service (status or transport)
    pub fn is_upstream(&self) -> bool {
        matches!(self, EngineError::Upstream { .. })
    }

    /// HTTP status reported by the render service, if any
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            EngineError::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::Other(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display() {
        let err = EngineError::Upstream {
            status: Some(503),
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Render service returned 503: Service Unavailable");
        assert!(err.is_upstream());
        assert_eq!(err.upstream_status(), Some(503));

        let err = EngineError::Upstream {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Render service request failed: connection refused");
        assert_eq!(err.upstream_status(), None);
    }

    #[test]
    fn test_from_str() {
        let err: EngineError = "boom".into();
        assert!(!err.is_upstream());
        assert_eq!(err.to_string(), "boom");
    }
}
