//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Megaverse REST client and domain types."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---

/// Uniform error returned by every Megaverse API call.
#[derive(Debug, thiserror::Error)]
pub enum MegaverseError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, parsed as JSON when possible.
        body: Option<serde_json::Value>,
        /// Human readable summary.
        message: String,
    },
    /// The request never produced a status (connect, timeout, decode).
    #[error("transport error: {message}")]
    Transport {
        /// Underlying client error rendered as text.
        message: String,
    },
    /// Anything else, including malformed responses.
    #[error("an unexpected error occurred: {message}")]
    Unexpected {
        /// Description of the failure.
        message: String,
    },
}

impl MegaverseError {
    /// Status code of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            MegaverseError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Body of the failed response, when one was received.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            MegaverseError::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn unexpected(message: impl Into<String>) -> Self {
        MegaverseError::Unexpected {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for MegaverseError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => MegaverseError::Http {
                status: status.as_u16(),
                body: None,
                message: err.to_string(),
            },
            None => MegaverseError::Transport {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_exposes_status_and_body() {
        let err = MegaverseError::Http {
            status: 429,
            body: Some(serde_json::json!({ "error": "Too Many Requests" })),
            message: "request failed with status code 429".into(),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.body().unwrap()["error"], "Too Many Requests");
        assert_eq!(err.to_string(), "request failed with status code 429");
    }

    #[test]
    fn non_http_errors_have_no_status() {
        let err = MegaverseError::unexpected("boom");
        assert_eq!(err.status(), None);
        assert!(err.body().is_none());
        assert!(err.to_string().contains("boom"));
    }
}
