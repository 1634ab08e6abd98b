//! Error inspection helpers.

use super::types::ClientError;

impl ClientError {
    /// HTTP status of a raised error response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ErrorResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Normalized error payload of a raised error response.
    pub fn error_body(&self) -> Option<&serde_json::Value> {
        match self {
            ClientError::ErrorResponse { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether the failure happened in the transport (network error or abort).
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Aborted)
    }

    /// Whether the call failed before anything was sent.
    pub fn is_request_construction_error(&self) -> bool {
        matches!(
            self,
            ClientError::MissingPathParam(_)
                | ClientError::InvalidHeader(_)
                | ClientError::Serialization(_)
        )
    }
}
