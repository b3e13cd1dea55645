//! Audit session: what the user currently sees
//!
//! Owns the contract text, the last audit result and the expanded section.
//! Overlapping actions are ordered by `RequestTicket`; only the latest
//! ticket may change state.

mod errors;
mod session_state;

// Re-export public API
pub use errors::SessionError;
pub use session_state::{AuditSession, PendingAction, RequestTicket, SessionState};
