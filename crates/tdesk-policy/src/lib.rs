//! # tdesk-policy — Travel Policy Evaluation
//!
//! The rule-dense heart of the travel desk. Two evaluators, one config:
//!
//! - **Notice-period checker** (`notice.rs`): given a travel mode, a travel
//!   date, and per-mode minimum-advance-day thresholds, decides pass/fail.
//!   Fail-open: a mode with no configured threshold, or missing inputs,
//!   never violates.
//!
//! - **Verification gate** (`gate.rs`): given a user's identity-document
//!   statuses and the policy toggles, decides whether the user is past the
//!   onboarding wall. Fail-closed: a missing document counts as not
//!   approved. Recomputed live on every call — lock state is never stored.
//!
//! ## Design
//!
//! [`PolicyConfig`] is an explicit value threaded through every evaluation.
//! There is no ambient or global configuration: callers own the config and
//! pass it in, which makes every evaluation a pure function and every test
//! a plain function call.
//!
//! Monetary amounts are integer minor units. No floats for money.

pub mod approval;
pub mod config;
pub mod gate;
pub mod notice;
pub mod submit;

pub use approval::auto_approvable;
pub use config::{NoticePolicy, NoticePolicySet, PolicyConfig};
pub use gate::{is_locked, GateStatus};
pub use notice::{evaluate, evaluate_optional, is_violation, NoticeOutcome};
pub use submit::submit_request;
