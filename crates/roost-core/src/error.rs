// ── Core error types ──
//
// User-facing failures from roost-core. Consumers never see reqwest errors
// or raw response bodies: `from_api` folds transport-layer errors into this
// taxonomy, and every variant carries its messages as an ordered list.
// `Clone` so the store can keep the last failure in its state.

use thiserror::Error;

use crate::validation::Violation;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Local errors ─────────────────────────────────────────────────
    /// Client-side field rules failed; no request was sent.
    #[error("Validation failed: {}", messages.join("; "))]
    ValidationFailed { messages: Vec<String> },

    /// The edit target is not in the in-memory collection (it was removed
    /// since the caller looked at it); no request was sent.
    #[error("Apartment {id} is not in the current collection")]
    NotInCollection { id: String },

    // ── Remote errors ────────────────────────────────────────────────
    /// No response was received.
    #[error("Cannot reach the apartment service: {reason}")]
    NetworkUnreachable { reason: String },

    /// A response arrived with an error status. May originate from
    /// server-side validation, in which case there is one message per field.
    #[error("Request rejected by server (HTTP {status}): {}", messages.join("; "))]
    ServerRejected { status: u16, messages: Vec<String> },

    /// The target apartment no longer exists remotely.
    #[error("Apartment not found: {id}")]
    NotFound { id: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Everything else ──────────────────────────────────────────────
    #[error("Unexpected failure: {message}")]
    Unknown { message: String },
}

impl CoreError {
    /// Every distinct message, in order, for individual display.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed { messages } | Self::ServerRejected { messages, .. } => {
                messages.clone()
            }
            other => vec![other.to_string()],
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotInCollection { .. })
    }

    /// Translate a transport-layer error. `id` names the target apartment
    /// for item requests so a 404 can say which one is gone. Collection
    /// requests have no target, so their 404 stays a rejection and keeps
    /// the server's messages.
    pub fn from_api(err: roost_api::Error, id: Option<&str>) -> Self {
        if err.is_unreachable() {
            return Self::NetworkUnreachable {
                reason: err.to_string(),
            };
        }
        if let Some(id) = id.filter(|_| err.is_not_found()) {
            return Self::NotFound { id: id.to_owned() };
        }

        match err {
            roost_api::Error::Api { status, messages } => Self::ServerRejected { status, messages },
            roost_api::Error::Transport(e) => match e.status() {
                Some(status) => Self::ServerRejected {
                    status: status.as_u16(),
                    messages: vec![e.to_string()],
                },
                None => Self::Unknown {
                    message: e.to_string(),
                },
            },
            roost_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            roost_api::Error::Tls(message) => Self::Config { message },
            roost_api::Error::Deserialization { message, body: _ } => Self::Unknown {
                message: format!("Unreadable server response: {message}"),
            },
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<roost_api::Error> for CoreError {
    fn from(err: roost_api::Error) -> Self {
        Self::from_api(err, None)
    }
}

impl From<Vec<Violation>> for CoreError {
    fn from(violations: Vec<Violation>) -> Self {
        Self::ValidationFailed {
            messages: violations.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_price, validate_rooms};

    #[test]
    fn validation_messages_stay_separate() {
        let violations: Vec<Violation> = [validate_rooms(0), validate_price(0.0)]
            .into_iter()
            .flatten()
            .collect();
        let err = CoreError::from(violations);
        assert!(err.is_validation());
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn api_404_becomes_not_found_with_id() {
        let api = roost_api::Error::Api {
            status: 404,
            messages: vec!["gone".into()],
        };
        assert_eq!(
            CoreError::from_api(api, Some("42")),
            CoreError::NotFound { id: "42".into() }
        );
    }

    #[test]
    fn collection_404_is_a_rejection_with_messages() {
        let api = roost_api::Error::Api {
            status: 404,
            messages: vec!["Cannot GET /apartments".into()],
        };
        assert_eq!(
            CoreError::from(api),
            CoreError::ServerRejected {
                status: 404,
                messages: vec!["Cannot GET /apartments".into()],
            }
        );
    }

    #[test]
    fn api_400_keeps_every_server_message() {
        let api = roost_api::Error::Api {
            status: 400,
            messages: vec!["a".into(), "b".into()],
        };
        let err = CoreError::from(api);
        assert_eq!(err.messages(), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn undecodable_body_is_unknown() {
        let api = roost_api::Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        };
        assert!(matches!(CoreError::from(api), CoreError::Unknown { .. }));
    }

    #[test]
    fn single_message_variants_render_themselves() {
        let err = CoreError::NotInCollection { id: "x".into() };
        assert_eq!(
            err.messages(),
            vec!["Apartment x is not in the current collection".to_owned()]
        );
    }
}
