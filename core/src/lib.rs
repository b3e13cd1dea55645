//! Auditor core: prompt contract, model gateway, response extraction and
//! the audit session state machine.
//!
//! All auditing intelligence lives in the external model. This crate only
//! builds the prompt, moves text over the wire, and turns the reply back
//! into typed values.

pub mod config;
pub mod error;
pub mod llm;
pub mod service;
pub mod source;

pub use config::{AuditorConfig, ConfigError};
pub use error::{AuditError, ErrorKind};
pub use llm::extract::{MalformedReason, MalformedResponse};
pub use llm::session::{AuditSession, PendingAction, RequestTicket, SessionError, SessionState};
pub use llm::types::{AuditResult, AuditSection, FixedContract, MetricScore, SectionName};
pub use llm::GatewayError;
pub use service::AuditService;
pub use source::{ContractSource, SourceError, ValidationError};
