use thiserror::Error;

/// Failure of a backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No connectivity, CORS rejection, aborted fetch
    #[error("Network error: {0}")]
    Network(String),
    /// Backend answered with a non-2xx status
    #[error("HTTP {status}{}", .message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Http { status: u16, message: Option<String> },
    #[error("Parse error: {0}")]
    Decode(String),
    #[error("Serialization error: {0}")]
    Encode(String),
    /// The view that started the request went away before it resolved
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Message supplied by the backend error body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the operator: the backend's message, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// The record targeted by fetch-one/update does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_display_includes_server_message_when_present() {
        let with = ApiError::Http { status: 400, message: Some("Email taken".into()) };
        let without = ApiError::Http { status: 502, message: None };
        assert_eq!(with.to_string(), "HTTP 400: Email taken");
        assert_eq!(without.to_string(), "HTTP 502");
    }

    #[test]
    fn user_message_prefers_backend_text() {
        let http = ApiError::Http { status: 401, message: Some("Wrong password".into()) };
        assert_eq!(http.user_message("Login failed"), "Wrong password");
        assert!(http.is_unauthorized());

        let network = ApiError::Network("offline".into());
        assert_eq!(network.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn not_found_is_detected_from_status() {
        assert!(ApiError::Http { status: 404, message: None }.is_not_found());
        assert!(!ApiError::Decode("eof".into()).is_not_found());
        assert!(ApiError::Cancelled.is_cancelled());
    }
}
