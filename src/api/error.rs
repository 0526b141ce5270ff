use std::fmt;

/// Fetch errors with user-friendly messages.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Network-level failure (connection, timeout, DNS)
    Network(String),
    /// HTTP error response (4xx, 5xx)
    HttpStatus(u16, String),
    /// Body was not valid JSON
    Parse(String),
}

impl FetchError {
    /// Short text for the status bar or a failed reel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(details) if details.contains("timed out") => {
                "Request timed out. Please try again.".into()
            }
            Self::Network(details) => format!("Network error: {details}"),
            Self::HttpStatus(404, _) => "Video not found.".into(),
            Self::HttpStatus(429, _) => "Rate limited. Please wait a moment.".into(),
            Self::HttpStatus(500..=599, _) => "Server error. Please try again later.".into(),
            Self::HttpStatus(code, reason) if reason.is_empty() => format!("HTTP error {code}"),
            Self::HttpStatus(code, reason) => format!("HTTP error {code}: {reason}"),
            Self::Parse(details) => format!("Unexpected response from server: {details}"),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::HttpStatus(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default().to_string(),
            ),
            None if err.is_timeout() => Self::Network("request timed out".into()),
            None if err.is_connect() => Self::Network("could not connect".into()),
            None if err.is_decode() => Self::Parse(err.to_string()),
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_share_one_message() {
        let a = FetchError::HttpStatus(500, "Internal Server Error".into());
        let b = FetchError::HttpStatus(503, "Service Unavailable".into());
        assert_eq!(a.user_message(), b.user_message());
    }

    #[test]
    fn timeout_is_recognised() {
        let err = FetchError::Network("request timed out".into());
        assert_eq!(err.user_message(), "Request timed out. Please try again.");
    }

    #[test]
    fn other_status_includes_code() {
        let err = FetchError::HttpStatus(418, "I'm a teapot".into());
        assert_eq!(err.to_string(), "HTTP error 418: I'm a teapot");
    }
}
