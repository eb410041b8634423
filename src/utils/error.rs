use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream {service} returned status {status}: {message}")]
    UpstreamStatus {
        service: String,
        status: u16,
        message: String,
    },

    #[error("Upstream {service} rate limited the request")]
    RateLimited { service: String },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidation { field: String, message: String },

    /// A fetch failure handed to every caller waiting on the same cache key.
    #[error(transparent)]
    Shared(Arc<ContentError>),
}

impl ContentError {
    /// Takes the error back out of a cache failure, wrapping it only while
    /// other waiters still hold it.
    pub fn from_shared(err: Arc<ContentError>) -> Self {
        Arc::try_unwrap(err).unwrap_or_else(ContentError::Shared)
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            ContentError::NotFound { .. } => true,
            ContentError::Shared(inner) => inner.is_not_found(),
            _ => false,
        }
    }

    /// Failures that a later request cycle may not hit again.
    pub fn is_transient(&self) -> bool {
        match self {
            ContentError::Http(_) | ContentError::RateLimited { .. } => true,
            ContentError::UpstreamStatus { status, .. } => *status >= 500,
            ContentError::Shared(inner) => inner.is_transient(),
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ContentError::Http(_) | ContentError::UpstreamStatus { .. } => {
                "Could not reach the content API. Check your network and try again.".to_string()
            }
            ContentError::RateLimited { .. } => {
                "The content API is rate limiting requests. Wait a moment and retry.".to_string()
            }
            ContentError::Authentication { .. } => {
                "The content API rejected the API key. Check notion.api_key.".to_string()
            }
            ContentError::NotFound { resource } => format!("{} does not exist", resource),
            ContentError::Io(e) => format!("Could not read or write a file: {}", e),
            ContentError::Serialization(_) => {
                "The content API returned data in an unexpected format.".to_string()
            }
            ContentError::Config { .. }
            | ContentError::MissingConfig { .. }
            | ContentError::InvalidConfigValue { .. }
            | ContentError::ConfigValidation { .. } => format!("Invalid configuration: {}", self),
            ContentError::Shared(inner) => inner.user_friendly_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let not_found = ContentError::NotFound {
            resource: "Page abc".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_transient());

        let server_error = ContentError::UpstreamStatus {
            service: "Notion".to_string(),
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert!(server_error.is_transient());
        assert!(!server_error.is_not_found());

        let client_error = ContentError::UpstreamStatus {
            service: "Notion".to_string(),
            status: 400,
            message: "validation_error".to_string(),
        };
        assert!(!client_error.is_transient());
    }

    #[test]
    fn test_shared_error_keeps_classification() {
        let sole = ContentError::from_shared(Arc::new(ContentError::RateLimited {
            service: "Notion".to_string(),
        }));
        assert!(matches!(sole, ContentError::RateLimited { .. }));

        let original = Arc::new(ContentError::NotFound {
            resource: "Page abc".to_string(),
        });
        let _other_waiter = Arc::clone(&original);
        let shared = ContentError::from_shared(original);
        assert!(matches!(shared, ContentError::Shared(_)));
        assert!(shared.is_not_found());
        assert_eq!(shared.to_string(), "Not found: Page abc");
    }

    #[test]
    fn test_user_friendly_message_for_config() {
        let err = ContentError::MissingConfig {
            field: "notion.api_key".to_string(),
        };
        assert!(err.user_friendly_message().contains("notion.api_key"));
    }
}
