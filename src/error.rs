use thiserror::Error;

use crate::endpoints::Endpoint;

/// Failures of the sports-data API layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("request to {} failed: {source}", .endpoint.path())]
    Request {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{} responded with status {status}", .endpoint.path())]
    Status { endpoint: Endpoint, status: u16 },

    #[error("could not decode {} response: {source}", .endpoint.path())]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not load translation file {url}: {reason}")]
    Translation { url: String, reason: String },
}

impl ApiError {
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            ApiError::Request { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_names_endpoint() {
        let err = ApiError::Status {
            endpoint: Endpoint::TeamStatistics,
            status: 503,
        };
        assert_eq!(err.to_string(), "teams/statistics responded with status 503");
        assert_eq!(err.endpoint(), Some(Endpoint::TeamStatistics));
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Decode {
            endpoint: Endpoint::Fixtures,
            source,
        };
        assert!(err.to_string().starts_with("could not decode fixtures response"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
