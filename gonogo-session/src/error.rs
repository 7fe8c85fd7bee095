use thiserror::Error;

use crate::state::SessionPhase;

/// Contract violations of the session state machine. These indicate a bug
/// in the calling presentation layer, not a user-recoverable condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {event} while session is {from}")]
    InvalidTransition {
        from: SessionPhase,
        event: &'static str,
    },
}
