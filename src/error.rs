//! Error types for locweb

use thiserror::Error;

/// Errors raised by the site, the domain checker and the billing client
#[derive(Error, Debug, Clone)]
pub enum LocwebError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Definite "no such host" answer; the only lookup outcome read as available
    #[error("No DNS records for '{domain}'")]
    NameNotFound { domain: String },

    #[error("Lookup of '{domain}' failed: {message}")]
    Lookup { domain: String, message: String },

    #[error("HTTP error: {message}")]
    Http { message: String, url: Option<String> },

    #[error("Payment provider error: {message}")]
    Payment { message: String, code: Option<String> },

    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    #[error("Could not decode response: {message}")]
    Decode { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Template rendering failed: {message}")]
    Template { message: String },

    #[error("IO error: {message}")]
    Io { message: String, path: Option<String> },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LocwebError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn name_not_found(domain: impl Into<String>) -> Self {
        Self::NameNotFound {
            domain: domain.into(),
        }
    }

    pub fn lookup(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>, url: Option<String>) -> Self {
        Self::Http {
            message: message.into(),
            url,
        }
    }

    pub fn payment(message: impl Into<String>, code: Option<String>) -> Self {
        Self::Payment {
            message: message.into(),
            code,
        }
    }

    pub fn timeout(operation: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            secs,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Bad visitor input; surfaces as a 400 with the message shown verbatim
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether a failed lookup means the name is unregistered.
    ///
    /// Timeouts, refused connections and resolver errors all count as taken.
    pub fn suggests_available(&self) -> bool {
        matches!(self, Self::NameNotFound { .. })
    }

    /// Caused by the request rather than by the server
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Message with a hint, for the command line
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration error: {}\n💡 Check your .env file and LOCWEB_* variables", message)
            }
            Self::Lookup { domain, message } => format!("⚠️  Could not check '{}': {}", domain, message),
            Self::Timeout { operation, secs } => {
                format!("⏱️  {} timed out after {}s\n💡 Raise LOCWEB_LOOKUP_TIMEOUT_SECS on slow networks", operation, secs)
            }
            Self::Http { message, .. } | Self::Payment { message, .. } => {
                format!("❌ {}\n💡 Check your internet connection and Stripe keys", message)
            }
            Self::Io { message, path } => {
                let path = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}", path, message)
            }
            other => format!("❌ {}", other),
        }
    }
}

impl From<reqwest::Error> for LocwebError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string());
        if err.is_timeout() {
            Self::timeout("HTTP request", 30)
        } else if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::http(err.to_string(), url)
        }
    }
}

impl From<serde_json::Error> for LocwebError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<std::io::Error> for LocwebError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<askama::Error> for LocwebError {
    fn from(err: askama::Error) -> Self {
        Self::Template {
            message: err.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LocwebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_name_not_found_suggests_available() {
        assert!(LocwebError::name_not_found("free.com").suggests_available());
        assert!(!LocwebError::timeout("DNS lookup", 5).suggests_available());
        assert!(!LocwebError::http("refused", None).suggests_available());
        assert!(!LocwebError::lookup("x.com", "not found").suggests_available());
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = LocwebError::validation("sessionId or customerId is required");
        assert_eq!(err.to_string(), "sessionId or customerId is required");
        assert!(err.is_client_error());
        assert!(!LocwebError::config("missing key").is_client_error());
    }

    #[test]
    fn user_message_carries_hint() {
        let message = LocwebError::timeout("DNS lookup", 5).user_message();
        assert!(message.contains("DNS lookup timed out after 5s"));
        assert!(message.contains("LOCWEB_LOOKUP_TIMEOUT_SECS"));
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: LocwebError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, LocwebError::Decode { .. }));
    }
}
