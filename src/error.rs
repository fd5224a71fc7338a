use thiserror::Error;

/// The client's error type.
///
/// Every response the gateway classifies lands in exactly one of these
/// variants; interceptors only observe, so the classified error always
/// reaches the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request was rejected by the service (bad credentials, validation).
    #[error("Request rejected: {}", .detail.as_deref().unwrap_or("bad request"))]
    BadRequest {
        /// Human-readable message from the error payload, if any.
        detail: Option<String>,
    },

    /// The session is no longer valid (401). The sole trigger for forced
    /// session teardown and redirect to the login route.
    #[error("Session expired: {}", .detail.as_deref().unwrap_or("unauthorized"))]
    SessionExpired { detail: Option<String> },

    /// The authenticated user is not allowed to perform the operation (403).
    #[error("Forbidden: {}", .detail.as_deref().unwrap_or("forbidden"))]
    Forbidden { detail: Option<String> },

    /// The resource does not exist (404).
    #[error("Resource not found: {}", .detail.as_deref().unwrap_or("not found"))]
    NotFound { detail: Option<String> },

    /// The service failed (5xx).
    #[error("Server error ({status}): {}", .detail.as_deref().unwrap_or("server error"))]
    Server { status: u16, detail: Option<String> },

    /// No response was received at all, so the UI can suggest a network check.
    #[error("Connectivity error: {0}")]
    Connectivity(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A `Result` type that uses `ApiError` as the error type.
pub type Result<T> = std::result::Result<T, ApiError>;

/// The error payload shape exposed by the remote service.
#[derive(serde::Deserialize, Debug, Default)]
pub struct ErrorPayload {
    pub detail: Option<String>,
}

impl ApiError {
    /// Classifies a non-success HTTP status plus its decoded payload.
    pub fn classify(status: u16, payload: ErrorPayload) -> Self {
        let detail = payload.detail;
        match status {
            401 => ApiError::SessionExpired { detail },
            403 => ApiError::Forbidden { detail },
            404 => ApiError::NotFound { detail },
            500..=599 => ApiError::Server { status, detail },
            _ => ApiError::BadRequest { detail },
        }
    }

    /// The service-provided `detail` message, when one was decoded.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { detail }
            | ApiError::SessionExpired { detail }
            | ApiError::Forbidden { detail }
            | ApiError::NotFound { detail }
            | ApiError::Server { detail, .. } => detail.as_deref(),
            ApiError::Connectivity(_) | ApiError::Decode(_) => None,
        }
    }

    /// Whether this failure forces session teardown.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired { .. })
    }
}
