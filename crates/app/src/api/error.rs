use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Pinning Service API failure body: `{"error": {"reason": .., "details": ..}}`
#[derive(Debug, Deserialize)]
struct ServiceFailure {
    error: ServiceFailureDetails,
}

#[derive(Debug, Deserialize)]
struct ServiceFailureDetails {
    reason: String,
    #[serde(default)]
    details: Option<String>,
}

/// Kubo RPC failure body: `{"Message": .., "Code": .., "Type": "error"}`
#[derive(Debug, Deserialize)]
struct NodeFailure {
    #[serde(rename = "Message")]
    message: String,
}

impl ApiError {
    /// Build an error from a non-success response, pulling the message out of
    /// either error shape we talk to and falling back to the raw body.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = if let Ok(failure) = serde_json::from_str::<ServiceFailure>(body) {
            match failure.error.details {
                Some(details) if !details.is_empty() => {
                    format!("{} ({})", failure.error.reason, details)
                }
                _ => failure.error.reason,
            }
        } else if let Ok(failure) = serde_json::from_str::<NodeFailure>(body) {
            failure.message
        } else {
            body.trim().to_string()
        };
        ApiError::HttpStatus(status, message)
    }
}
