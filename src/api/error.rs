use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received (DNS failure, refused connection, reset, timeout)
    Transport { url: String, message: String },

    /// The service answered with a non-success status code
    Status { status: u16, detail: Option<String> },

    /// A success response whose body could not be read as JSON
    Decode { context: String, message: String },
}

impl ApiError {
    pub fn transport(url: &str, err: &reqwest::Error) -> Self {
        ApiError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Build a `Status` error from a failed response body.
    ///
    /// The body is expected to carry `{"detail": "..."}`; anything else
    /// (empty, not JSON, non-string detail) leaves `detail` unset.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .filter(|d| !d.is_empty());

        ApiError::Status { status, detail }
    }

    /// The message shown to the user when a submission fails.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when no response reached the client.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport { url, message } => {
                write!(f, "request to {} failed: {}", url, message)
            }
            ApiError::Status { detail: Some(detail), .. } => write!(f, "{}", detail),
            ApiError::Status { status, detail: None } => {
                write!(f, "HTTP error! status: {}", status)
            }
            ApiError::Decode { context, message } => {
                write!(f, "invalid response body ({}): {}", context, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}
