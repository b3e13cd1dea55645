//! Session state machine
//!
//! `Idle -> Loading -> {Ready, Failed}`; `Ready -> Loading` on fix.
//! Entering `Loading` clears the result, the error and the expanded section.

use std::fmt;
use std::path::Path;

use crate::error::{AuditError, ErrorKind};
use crate::llm::session::errors::SessionError;
use crate::llm::types::{AuditResult, FixedContract, SectionName};
use crate::service::AuditService;
use crate::source::ContractSource;

/// Action a `Loading` session is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingAction {
    Analyze,
    Fix,
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::Analyze => f.write_str("analyze"),
            PendingAction::Fix => f.write_str("fix"),
        }
    }
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading(PendingAction),
    Ready,
    Failed(ErrorKind),
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => f.write_str("idle"),
            SessionState::Loading(action) => write!(f, "loading ({})", action),
            SessionState::Ready => f.write_str("ready"),
            SessionState::Failed(kind) => write!(f, "failed ({})", kind),
        }
    }
}

/// Handle for one started action
///
/// Sequence numbers grow monotonically per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    action: PendingAction,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn action(&self) -> PendingAction {
        self.action
    }
}

/// Audit session
///
/// Owned exclusively by one surface; no locks, no background work.
#[derive(Debug)]
pub struct AuditSession {
    contract: ContractSource,
    state: SessionState,
    result: Option<AuditResult>,
    expanded: Option<SectionName>,
    last_error: Option<String>,
    next_seq: u64,
    latest: Option<RequestTicket>,
}

impl Default for AuditSession {
    fn default() -> Self {
        Self::new(ContractSource::default())
    }
}

impl AuditSession {
    pub fn new(contract: ContractSource) -> Self {
        Self {
            contract,
            state: SessionState::Idle,
            result: None,
            expanded: None,
            last_error: None,
            next_seq: 0,
            latest: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading(_))
    }

    pub fn contract(&self) -> &ContractSource {
        &self.contract
    }

    pub fn result(&self) -> Option<&AuditResult> {
        self.result.as_ref()
    }

    pub fn expanded(&self) -> Option<SectionName> {
        self.expanded
    }

    /// Message of the failure behind `SessionState::Failed`
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the contract text (user edit)
    pub fn set_contract(&mut self, contract: impl Into<ContractSource>) {
        self.contract = contract.into();
    }

    /// Import a `.sol` / `.txt` file; on error the session is untouched
    pub fn load_file(&mut self, path: &Path) -> Result<(), SessionError> {
        let contract = ContractSource::from_file(path).inspect_err(|e| {
            tracing::warn!(error = %e, "Contract import failed");
        })?;
        self.contract = contract;
        Ok(())
    }

    /// Start an analyze request
    ///
    /// Rejects contracts that fail the Solidity heuristic without changing
    /// state. Allowed from any state; an in-flight request becomes stale.
    pub fn begin_analyze(&mut self) -> Result<RequestTicket, SessionError> {
        self.contract.validate().inspect_err(|e| {
            tracing::info!(error = %e, "Contract rejected before submission");
        })?;
        Ok(self.enter_loading(PendingAction::Analyze))
    }

    /// Start a fix request; returns the ticket and the suggestions to send
    pub fn begin_fix(&mut self) -> Result<(RequestTicket, String), SessionError> {
        if self.state != SessionState::Ready {
            return Err(SessionError::InvalidTransition {
                action: PendingAction::Fix,
                state: self.state.to_string(),
            });
        }
        let suggestions = self
            .result
            .as_ref()
            .map(|r| r.suggestions().to_string())
            .ok_or(SessionError::NoResult)?;
        Ok((self.enter_loading(PendingAction::Fix), suggestions))
    }

    fn enter_loading(&mut self, action: PendingAction) -> RequestTicket {
        let ticket = RequestTicket {
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.latest = Some(ticket);
        self.state = SessionState::Loading(action);
        self.result = None;
        self.last_error = None;
        self.expanded = None;
        tracing::debug!(seq = ticket.seq, %action, "Session loading");
        ticket
    }

    fn accepts(&self, ticket: RequestTicket) -> bool {
        self.latest == Some(ticket) && self.state == SessionState::Loading(ticket.action)
    }

    fn fail(&mut self, err: &AuditError) {
        tracing::warn!(kind = %err.kind(), error = %err, "Session action failed");
        self.state = SessionState::Failed(err.kind());
        self.result = None;
        self.last_error = Some(err.to_string());
    }

    /// Apply an analyze outcome; `false` when the ticket is stale
    pub fn complete_analyze(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<AuditResult, AuditError>,
    ) -> bool {
        if ticket.action != PendingAction::Analyze || !self.accepts(ticket) {
            tracing::debug!(seq = ticket.seq, "Dropping stale analyze completion");
            return false;
        }
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.state = SessionState::Ready;
            }
            Err(err) => self.fail(&err),
        }
        true
    }

    /// Apply a fix outcome; `false` when the ticket is stale
    ///
    /// Success replaces the contract text with the fixed source.
    pub fn complete_fix(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<FixedContract, AuditError>,
    ) -> bool {
        if ticket.action != PendingAction::Fix || !self.accepts(ticket) {
            tracing::debug!(seq = ticket.seq, "Dropping stale fix completion");
            return false;
        }
        match outcome {
            Ok(fixed) => {
                self.contract = ContractSource::new(fixed.into_string());
                self.state = SessionState::Ready;
            }
            Err(err) => self.fail(&err),
        }
        true
    }

    /// Validate, call the model and record the outcome
    pub async fn analyze(&mut self, service: &AuditService) -> Result<SessionState, SessionError> {
        let ticket = self.begin_analyze()?;
        let outcome = service.analyze(self.contract.as_str()).await;
        self.complete_analyze(ticket, outcome);
        Ok(self.state)
    }

    /// Rewrite the contract using the current suggestions
    pub async fn fix(&mut self, service: &AuditService) -> Result<SessionState, SessionError> {
        let (ticket, suggestions) = self.begin_fix()?;
        let outcome = service.fix(self.contract.as_str(), &suggestions).await;
        self.complete_fix(ticket, outcome);
        Ok(self.state)
    }

    /// Expand `name`, or collapse it when already expanded
    pub fn toggle_section(&mut self, name: SectionName) -> Result<Option<SectionName>, SessionError> {
        if self.state != SessionState::Ready || self.result.is_none() {
            return Err(SessionError::NoResult);
        }
        self.expanded = if self.expanded == Some(name) {
            None
        } else {
            Some(name)
        };
        Ok(self.expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::adapters::stub::StubAdapter;
    use crate::llm::adapters::{Adapter, GatewayError};
    use crate::llm::extract::parse_audit_result;
    use crate::source::ValidationError;

    const VALID: &str = "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;\ncontract A {}";

    fn sample_result() -> AuditResult {
        parse_audit_result(&StubAdapter::default_audit_response()).unwrap()
    }

    fn stub_service() -> AuditService {
        AuditService::new(Adapter::Stub(StubAdapter::new()))
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = AuditSession::new(VALID.into());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
        assert!(session.expanded().is_none());
    }

    #[test]
    fn test_begin_analyze_rejects_invalid_contract() {
        let mut session = AuditSession::new("contract A {}".into());
        let err = session.begin_analyze().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::MissingLicense)
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_analyze_success_then_ready() {
        let mut session = AuditSession::new(VALID.into());
        let ticket = session.begin_analyze().unwrap();
        assert_eq!(session.state(), SessionState::Loading(PendingAction::Analyze));
        assert!(session.complete_analyze(ticket, Ok(sample_result())));
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.result().is_some());
    }

    #[test]
    fn test_analyze_failure_keeps_kind() {
        let mut session = AuditSession::new(VALID.into());
        let ticket = session.begin_analyze().unwrap();
        let err = AuditError::from(GatewayError::Network("refused".to_string()));
        assert!(session.complete_analyze(ticket, Err(err)));
        assert_eq!(session.state(), SessionState::Failed(ErrorKind::Transport));
        assert!(session.result().is_none());
        assert!(session.last_error().unwrap().contains("refused"));
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut session = AuditSession::new(VALID.into());
        let first = session.begin_analyze().unwrap();
        let second = session.begin_analyze().unwrap();
        assert!(second.seq() > first.seq());

        assert!(!session.complete_analyze(first, Ok(sample_result())));
        assert_eq!(session.state(), SessionState::Loading(PendingAction::Analyze));
        assert!(session.result().is_none());

        let err = AuditError::from(GatewayError::Network("late".to_string()));
        assert!(session.complete_analyze(second, Err(err)));
        assert_eq!(session.state(), SessionState::Failed(ErrorKind::Transport));

        assert!(!session.complete_analyze(first, Ok(sample_result())));
        assert_eq!(session.state(), SessionState::Failed(ErrorKind::Transport));
    }

    #[test]
    fn test_completion_for_other_action_is_dropped() {
        let mut session = AuditSession::new(VALID.into());
        let analyze = session.begin_analyze().unwrap();
        assert!(!session.complete_fix(analyze, Ok(FixedContract::new("x"))));
        assert_eq!(session.contract().as_str(), VALID);
    }

    #[test]
    fn test_fix_requires_ready_with_result() {
        let mut session = AuditSession::new(VALID.into());
        let err = session.begin_fix().unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_fix_replaces_contract() {
        let mut session = AuditSession::new(VALID.into());
        let ticket = session.begin_analyze().unwrap();
        session.complete_analyze(ticket, Ok(sample_result()));

        let (ticket, suggestions) = session.begin_fix().unwrap();
        assert_eq!(suggestions, sample_result().suggestions());
        assert!(session.result().is_none());

        assert!(session.complete_fix(ticket, Ok(FixedContract::new("contract B {}"))));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.contract().as_str(), "contract B {}");
    }

    #[test]
    fn test_toggle_section() {
        let mut session = AuditSession::new(VALID.into());
        assert!(matches!(
            session.toggle_section(SectionName::AuditReport),
            Err(SessionError::NoResult)
        ));

        let ticket = session.begin_analyze().unwrap();
        session.complete_analyze(ticket, Ok(sample_result()));

        assert_eq!(
            session.toggle_section(SectionName::AuditReport).unwrap(),
            Some(SectionName::AuditReport)
        );
        assert_eq!(
            session.toggle_section(SectionName::MetricScores).unwrap(),
            Some(SectionName::MetricScores)
        );
        assert_eq!(session.toggle_section(SectionName::MetricScores).unwrap(), None);
    }

    #[test]
    fn test_loading_clears_expanded_section() {
        let mut session = AuditSession::new(VALID.into());
        let ticket = session.begin_analyze().unwrap();
        session.complete_analyze(ticket, Ok(sample_result()));
        session.toggle_section(SectionName::Suggestions).unwrap();

        session.begin_analyze().unwrap();
        assert!(session.expanded().is_none());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_load_file_error_leaves_session_untouched() {
        let mut session = AuditSession::new(VALID.into());
        let err = session
            .load_file(Path::new("/nonexistent/contract.rs"))
            .unwrap_err();
        assert!(matches!(err, SessionError::Source(_)));
        assert_eq!(session.contract().as_str(), VALID);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_async_analyze_and_fix_with_stub() {
        let service = stub_service();
        let mut session = AuditSession::new(VALID.into());

        assert_eq!(session.analyze(&service).await.unwrap(), SessionState::Ready);
        assert_eq!(session.result().unwrap().sections().len(), 3);

        assert_eq!(session.fix(&service).await.unwrap(), SessionState::Ready);
        assert!(session.contract().as_str().contains("contract Fixed"));
    }
}
