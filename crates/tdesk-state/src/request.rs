//! # Travel Request State Machine
//!
//! Models the fulfillment lifecycle of a travel request from submission
//! through booking and financial close-out.
//!
//! ## States
//!
//! ```text
//! Submitted ──▶ Approved ──▶ Booked ──▶ Closed (terminal)
//!     │
//!     ├──▶ Rejected  (terminal)
//!     └──▶ Cancelled (terminal)
//! ```
//!
//! ## Violation Snapshot
//!
//! The notice-period evaluation is captured once, at submission, in a
//! [`NoticeSnapshot`] and never recomputed. It is an audit record of what
//! policy required at the moment the employee submitted — editing the
//! policy later must not rewrite history. The snapshot field has no
//! mutator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tdesk_core::{RequestId, Timestamp, TravelMode, UserId};

// ─── Request Status ──────────────────────────────────────────────────

/// The fulfillment state of a travel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted by an employee, awaiting a decision.
    Submitted,
    /// Approved; awaiting booking by the PNC desk.
    Approved,
    /// Refused (terminal).
    Rejected,
    /// Withdrawn by the employee before a decision (terminal).
    Cancelled,
    /// Ticket booked by the PNC desk; awaiting reconciliation.
    Booked,
    /// Reconciled and closed by finance (terminal).
    Closed,
}

impl RequestStatus {
    /// Whether this state accepts no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Closed)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Booked => "BOOKED",
            Self::Closed => "CLOSED",
        };
        f.write_str(s)
    }
}

// ─── Notice Snapshot ─────────────────────────────────────────────────

/// The notice-period evaluation captured at submission time.
///
/// `days_notice` and `required_days` are `None` when the check did not run
/// (no policy configured for the mode). `flagged` is the violation verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeSnapshot {
    /// Whether the request violated the notice policy at submission.
    pub flagged: bool,
    /// Calendar days between submission and travel, when evaluated.
    pub days_notice: Option<i64>,
    /// The minimum advance days the policy required, when one existed.
    pub required_days: Option<u32>,
}

impl NoticeSnapshot {
    /// Snapshot for a request whose mode had no configured policy.
    pub fn not_evaluated() -> Self {
        Self {
            flagged: false,
            days_notice: None,
            required_days: None,
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during request submission or lifecycle transitions.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Attempted transition is not valid from the current status.
    #[error("invalid request transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Attempted target status.
        to: String,
    },

    /// Request is in a terminal state.
    #[error("request is in terminal state {state}")]
    TerminalState {
        /// The terminal state.
        state: String,
    },

    /// A policy-violating submission must carry a justification.
    #[error("a notice-policy violation requires a non-empty justification")]
    JustificationRequired,

    /// A required submission field was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// The offending field name.
        field: &'static str,
    },
}

// ─── Transition Record ───────────────────────────────────────────────

/// Record of a request status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestTransitionRecord {
    /// Status before the transition.
    pub from_status: RequestStatus,
    /// Status after the transition.
    pub to_status: RequestStatus,
    /// When the transition occurred.
    pub timestamp: Timestamp,
    /// Reason for the transition.
    pub reason: String,
}

// ─── Submission Parameters ───────────────────────────────────────────

/// Everything an employee supplies when submitting a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequestParams {
    /// The submitting employee.
    pub employee_id: UserId,
    /// Mode of travel.
    pub mode: TravelMode,
    /// Calendar date of travel.
    pub date_of_travel: NaiveDate,
    /// Departure city.
    pub origin: String,
    /// Destination city.
    pub destination: String,
    /// Estimated cost in minor currency units. Never a float.
    pub estimated_cost_minor: u64,
    /// Free-text justification; mandatory only when the submission
    /// violates the notice policy.
    pub justification: Option<String>,
}

// ─── TravelRequest ───────────────────────────────────────────────────

/// A travel request with its fulfillment state and transition history.
///
/// Constructed only through [`TravelRequest::submit`], which fixes the
/// violation snapshot. The snapshot and justification are private with
/// read-only accessors: no lifecycle event recomputes or clears them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// The submitting employee.
    pub employee_id: UserId,
    /// Mode of travel.
    pub mode: TravelMode,
    /// Calendar date of travel.
    pub date_of_travel: NaiveDate,
    /// Departure city.
    pub origin: String,
    /// Destination city.
    pub destination: String,
    /// Estimated cost in minor currency units.
    pub estimated_cost_minor: u64,
    /// Current fulfillment status.
    pub status: RequestStatus,
    /// When the request was submitted.
    pub created_at: Timestamp,
    /// Ordered log of all status transitions.
    pub transitions: Vec<RequestTransitionRecord>,
    // Fixed at submission; no mutators exist.
    violation: NoticeSnapshot,
    justification: Option<String>,
}

impl TravelRequest {
    /// Submit a new travel request.
    ///
    /// The caller supplies the already-evaluated notice snapshot (policy
    /// evaluation lives in `tdesk-policy`; this crate only records the
    /// verdict). When the snapshot is flagged, a non-empty justification is
    /// mandatory. When `auto_approve` is set, the request moves straight to
    /// Approved with an audit transition.
    ///
    /// # Errors
    ///
    /// - [`RequestError::EmptyField`] for blank origin/destination.
    /// - [`RequestError::JustificationRequired`] for a flagged submission
    ///   without a justification.
    pub fn submit(
        params: SubmitRequestParams,
        snapshot: NoticeSnapshot,
        auto_approve: bool,
    ) -> Result<Self, RequestError> {
        if params.origin.trim().is_empty() {
            return Err(RequestError::EmptyField { field: "origin" });
        }
        if params.destination.trim().is_empty() {
            return Err(RequestError::EmptyField { field: "destination" });
        }

        let justification = params
            .justification
            .filter(|j| !j.trim().is_empty());
        if snapshot.flagged && justification.is_none() {
            return Err(RequestError::JustificationRequired);
        }

        let mut request = Self {
            id: RequestId::new(),
            employee_id: params.employee_id,
            mode: params.mode,
            date_of_travel: params.date_of_travel,
            origin: params.origin,
            destination: params.destination,
            estimated_cost_minor: params.estimated_cost_minor,
            status: RequestStatus::Submitted,
            created_at: Timestamp::now(),
            transitions: Vec::new(),
            violation: snapshot,
            justification,
        };

        if auto_approve {
            request.do_transition(
                RequestStatus::Approved,
                "auto-approved: cost within policy limit",
            );
        }

        Ok(request)
    }

    /// The notice evaluation captured at submission. Immutable.
    pub fn violation(&self) -> &NoticeSnapshot {
        &self.violation
    }

    /// The submission justification, if one was given.
    pub fn justification(&self) -> Option<&str> {
        self.justification.as_deref()
    }

    /// Approve the request (SUBMITTED → APPROVED).
    pub fn approve(&mut self, reason: &str) -> Result<(), RequestError> {
        self.require_status(RequestStatus::Submitted, RequestStatus::Approved)?;
        self.do_transition(RequestStatus::Approved, reason);
        Ok(())
    }

    /// Reject the request (SUBMITTED → REJECTED).
    pub fn reject(&mut self, reason: &str) -> Result<(), RequestError> {
        self.require_status(RequestStatus::Submitted, RequestStatus::Rejected)?;
        self.do_transition(RequestStatus::Rejected, reason);
        Ok(())
    }

    /// Employee withdraws the request (SUBMITTED → CANCELLED).
    pub fn cancel(&mut self, reason: &str) -> Result<(), RequestError> {
        self.require_status(RequestStatus::Submitted, RequestStatus::Cancelled)?;
        self.do_transition(RequestStatus::Cancelled, reason);
        Ok(())
    }

    /// PNC books the ticket (APPROVED → BOOKED).
    pub fn book(&mut self, reason: &str) -> Result<(), RequestError> {
        self.require_status(RequestStatus::Approved, RequestStatus::Booked)?;
        self.do_transition(RequestStatus::Booked, reason);
        Ok(())
    }

    /// Finance reconciles and closes (BOOKED → CLOSED).
    pub fn close(&mut self, reason: &str) -> Result<(), RequestError> {
        self.require_status(RequestStatus::Booked, RequestStatus::Closed)?;
        self.do_transition(RequestStatus::Closed, reason);
        Ok(())
    }

    /// Whether the request is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Validate that the request is in the expected status.
    fn require_status(
        &self,
        expected: RequestStatus,
        target: RequestStatus,
    ) -> Result<(), RequestError> {
        if self.status.is_terminal() {
            return Err(RequestError::TerminalState {
                state: self.status.to_string(),
            });
        }
        if self.status != expected {
            return Err(RequestError::InvalidTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }

    /// Record a status transition.
    fn do_transition(&mut self, to: RequestStatus, reason: &str) {
        self.transitions.push(RequestTransitionRecord {
            from_status: self.status,
            to_status: to,
            timestamp: Timestamp::now(),
            reason: reason.to_string(),
        });
        self.status = to;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SubmitRequestParams {
        SubmitRequestParams {
            employee_id: UserId::new(),
            mode: TravelMode::Flight,
            date_of_travel: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            origin: "Karachi".to_string(),
            destination: "Lahore".to_string(),
            estimated_cost_minor: 45_000_00,
            justification: None,
        }
    }

    fn clear_snapshot() -> NoticeSnapshot {
        NoticeSnapshot {
            flagged: false,
            days_notice: Some(23),
            required_days: Some(15),
        }
    }

    fn flagged_snapshot() -> NoticeSnapshot {
        NoticeSnapshot {
            flagged: true,
            days_notice: Some(10),
            required_days: Some(15),
        }
    }

    fn submitted_request() -> TravelRequest {
        TravelRequest::submit(params(), clear_snapshot(), false).unwrap()
    }

    // ── Submission ───────────────────────────────────────────────────

    #[test]
    fn submit_clear_request() {
        let req = submitted_request();
        assert_eq!(req.status, RequestStatus::Submitted);
        assert!(!req.violation().flagged);
        assert!(req.transitions.is_empty());
    }

    #[test]
    fn flagged_submission_requires_justification() {
        let result = TravelRequest::submit(params(), flagged_snapshot(), false);
        assert!(matches!(result, Err(RequestError::JustificationRequired)));
    }

    #[test]
    fn blank_justification_does_not_satisfy_the_gate() {
        let mut p = params();
        p.justification = Some("   ".to_string());
        let result = TravelRequest::submit(p, flagged_snapshot(), false);
        assert!(matches!(result, Err(RequestError::JustificationRequired)));
    }

    #[test]
    fn flagged_submission_with_justification_succeeds() {
        let mut p = params();
        p.justification = Some("client escalation, travel unavoidable".to_string());
        let req = TravelRequest::submit(p, flagged_snapshot(), false).unwrap();
        assert!(req.violation().flagged);
        assert_eq!(req.violation().days_notice, Some(10));
        assert_eq!(
            req.justification(),
            Some("client escalation, travel unavoidable")
        );
    }

    #[test]
    fn clear_submission_keeps_optional_justification_optional() {
        // The data model permits an absent reason when nothing is flagged.
        let req = submitted_request();
        assert!(req.justification().is_none());
    }

    #[test]
    fn submit_rejects_blank_cities() {
        let mut p = params();
        p.origin = "".to_string();
        assert!(matches!(
            TravelRequest::submit(p, clear_snapshot(), false),
            Err(RequestError::EmptyField { field: "origin" })
        ));

        let mut p = params();
        p.destination = "  ".to_string();
        assert!(matches!(
            TravelRequest::submit(p, clear_snapshot(), false),
            Err(RequestError::EmptyField { field: "destination" })
        ));
    }

    #[test]
    fn auto_approve_moves_straight_to_approved() {
        let req = TravelRequest::submit(params(), clear_snapshot(), true).unwrap();
        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(req.transitions.len(), 1);
        assert_eq!(req.transitions[0].from_status, RequestStatus::Submitted);
        assert_eq!(req.transitions[0].to_status, RequestStatus::Approved);
    }

    // ── Happy-path lifecycle ─────────────────────────────────────────

    #[test]
    fn full_lifecycle_submit_through_close() {
        let mut req = submitted_request();
        req.approve("within budget").unwrap();
        req.book("PNR ABC123").unwrap();
        req.close("reconciled against invoice 778").unwrap();

        assert_eq!(req.status, RequestStatus::Closed);
        assert!(req.is_terminal());
        assert_eq!(req.transitions.len(), 3);
    }

    #[test]
    fn reject_from_submitted() {
        let mut req = submitted_request();
        req.reject("no budget this quarter").unwrap();
        assert_eq!(req.status, RequestStatus::Rejected);
        assert!(req.is_terminal());
    }

    #[test]
    fn cancel_from_submitted() {
        let mut req = submitted_request();
        req.cancel("trip no longer needed").unwrap();
        assert_eq!(req.status, RequestStatus::Cancelled);
        assert!(req.is_terminal());
    }

    // ── Invalid transitions ──────────────────────────────────────────

    #[test]
    fn cannot_book_unapproved_request() {
        let mut req = submitted_request();
        assert!(req.book("too eager").is_err());
    }

    #[test]
    fn cannot_close_unbooked_request() {
        let mut req = submitted_request();
        req.approve("ok").unwrap();
        assert!(req.close("not booked yet").is_err());
    }

    #[test]
    fn cannot_cancel_after_approval() {
        let mut req = submitted_request();
        req.approve("ok").unwrap();
        assert!(req.cancel("changed my mind").is_err());
    }

    #[test]
    fn terminal_states_accept_nothing() {
        let mut req = submitted_request();
        req.reject("no").unwrap();
        assert!(matches!(
            req.approve("please"),
            Err(RequestError::TerminalState { .. })
        ));
        assert!(req.book("please").is_err());
    }

    // ── Snapshot immutability ────────────────────────────────────────

    #[test]
    fn snapshot_survives_the_whole_lifecycle() {
        let mut p = params();
        p.justification = Some("urgent".to_string());
        let mut req = TravelRequest::submit(p, flagged_snapshot(), false).unwrap();

        req.approve("accepted despite short notice").unwrap();
        req.book("PNR XYZ987").unwrap();
        req.close("reconciled").unwrap();

        // The verdict recorded at submission is untouched.
        assert!(req.violation().flagged);
        assert_eq!(req.violation().days_notice, Some(10));
        assert_eq!(req.violation().required_days, Some(15));
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn request_serialization_roundtrip() {
        let req = submitted_request();
        let json = serde_json::to_string(&req).unwrap();
        let parsed: TravelRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, req.status);
        assert_eq!(parsed.id, req.id);
        assert_eq!(parsed.violation(), req.violation());
    }

    #[test]
    fn not_evaluated_snapshot_is_unflagged() {
        let snap = NoticeSnapshot::not_evaluated();
        assert!(!snap.flagged);
        assert!(snap.days_notice.is_none());
        assert!(snap.required_days.is_none());
    }
}
