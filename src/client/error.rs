use crate::models::{EnvelopeRejection, FieldError};
use thiserror::Error;

/// Errors returned by [`super::CampusClient`]
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request rejected: {}", join_errors(.0))]
    Rejected(Vec<FieldError>),

    #[error("Response carried no data")]
    MissingData,
}

impl ClientError {
    /// Classify a transport error the same way for every call
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(e)
        }
    }

    /// True when the request never got an answer from the backend
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::Unavailable | ClientError::Timeout | ClientError::Request(_)
        )
    }

    /// Field errors reported by the backend, if any
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Rejected(errors) => errors,
            _ => &[],
        }
    }
}

impl From<EnvelopeRejection> for ClientError {
    fn from(rejection: EnvelopeRejection) -> Self {
        match rejection {
            EnvelopeRejection::Errors(errors) => ClientError::Rejected(errors),
            EnvelopeRejection::MissingData => ClientError::MissingData,
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return "no details".to_string();
    }
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = ClientError::Rejected(vec![
            FieldError { property: "name".into(), message: "Required".into() },
            FieldError { property: String::new(), message: "Duplicate".into() },
        ]);
        assert_eq!(err.to_string(), "Request rejected: name: Required; Duplicate");
        assert_eq!(err.field_errors().len(), 2);
        assert!(!err.is_network());
    }

    #[test]
    fn test_envelope_rejection_conversion() {
        let err: ClientError = EnvelopeRejection::MissingData.into();
        assert!(matches!(err, ClientError::MissingData));
        assert!(ClientError::Unavailable.is_network());
    }
}
