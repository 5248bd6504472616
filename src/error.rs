//! Error types for modal orchestration

use serde_json::Value;

/// Errors surfaced by context and host operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    /// A show/hide/remove was dispatched before any host attached its store
    #[error("no modal host is mounted; create a ModalHost before dispatching modal actions")]
    HostNotMounted,

    /// A second host tried to attach to a context that already has one
    #[error("a modal host is already mounted on this context")]
    HostAlreadyMounted,
}

/// Rejection payload produced by `ModalHandle::reject`
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("modal rejected: {0}")]
pub struct Rejected(pub Value);

/// How a shown modal settled: the resolved value, or the rejection payload
pub type ModalOutcome = Result<Value, Rejected>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_messages_are_actionable() {
        let msg = ModalError::HostNotMounted.to_string();
        assert!(msg.contains("ModalHost"));
        assert!(ModalError::HostAlreadyMounted.to_string().contains("already"));
    }

    #[test]
    fn rejection_displays_payload() {
        let rejected = Rejected(json!({"reason": "cancelled"}));
        assert!(rejected.to_string().contains("cancelled"));
    }
}
