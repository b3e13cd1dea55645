//! LLM integration: prompt contracts, adapter layer, extraction, session
//!
//! Flow: contracts build the prompt, an adapter makes one model call,
//! extract turns the reply into an `AuditResult` or source code, and the
//! session tracks what the user currently sees.

pub mod adapters;
pub mod contracts;
pub mod extract;
pub mod session;
pub mod types;

// Re-export main types
pub use types::{
    AuditResult, AuditSection, FixedContract, MetricScore, SectionName, ShapeError, MAX_SCORE,
    METRIC_NAMES,
};

// Re-export contract functions
pub use contracts::{analyze_prompt, fix_prompt};

// Re-export extraction
pub use extract::{
    extract_code, extract_json_array, parse_audit_result, parse_json_array, strip_fences,
    MalformedReason, MalformedResponse,
};

// Re-export session
pub use session::{AuditSession, PendingAction, RequestTicket, SessionError, SessionState};

// Re-export adapters
pub use adapters::{create_adapter, Adapter, GatewayError, LlmAdapter};
