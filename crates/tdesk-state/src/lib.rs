//! # tdesk-state — Lifecycle State Machines
//!
//! Implements the two state machines of the travel desk. Each transition is
//! an explicit method that validates the current state, appends a transition
//! record, and moves to the next state. Invalid transitions are structured
//! errors, never silent coercions.
//!
//! ## State Machines
//!
//! - **Document** (`document.rs`): identity-document verification,
//!   `Incomplete → PendingVerification → {Approved, Rejected}`, with
//!   re-upload resetting a rejected document to PendingVerification.
//!
//! - **Request** (`request.rs`): travel-request fulfillment,
//!   `Submitted → {Approved, Rejected, Cancelled}`, `Approved → Booked`,
//!   `Booked → Closed`. The notice-violation snapshot is fixed at
//!   submission and has no mutator — later policy edits never rewrite it.
//!
//! ## Design
//!
//! There are no string-typed state names: states are enums, transitions are
//! methods, and each transition appends a [`document::DocumentTransitionRecord`]
//! or [`request::RequestTransitionRecord`] carrying the UTC timestamp and
//! reason.

pub mod document;
pub mod request;

// ─── Document re-exports ────────────────────────────────────────────

pub use document::{
    DocumentError, DocumentKind, DocumentSet, DocumentStatus, DocumentTransitionRecord,
    UserDocument,
};

// ─── Request re-exports ─────────────────────────────────────────────

pub use request::{
    NoticeSnapshot, RequestError, RequestStatus, RequestTransitionRecord, SubmitRequestParams,
    TravelRequest,
};
