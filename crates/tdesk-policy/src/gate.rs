//! # Verification Gate
//!
//! Decides whether a user is past the onboarding wall: feature access is
//! blocked until the identity documents the policy requires are approved.
//!
//! ## Rule
//!
//! ```text
//! passport_ok = !policy.passport_required || passport_photo approved
//! id_ok       = !policy.id_required       || id_proof approved
//! verified    = passport_ok && id_ok
//! locked      = policy.enforcement_enabled
//!               && !role.can(BypassVerificationGate)
//!               && !verified
//! ```
//!
//! Lock state is a pure function of the current documents and the current
//! policy — recomputed on every call, never stored. Turning
//! `enforcement_enabled` off unlocks every non-exempt user instantly
//! without touching any document.
//!
//! ## Fail-closed
//!
//! A missing document slot fails its sub-check. Contrast the notice
//! checker, which fails open.

use serde::{Deserialize, Serialize};

use tdesk_core::{Capability, Role};
use tdesk_state::{DocumentKind, DocumentSet};

use crate::config::PolicyConfig;

/// Full gate evaluation, for display on the onboarding wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStatus {
    /// Passport sub-check: not required, or approved.
    pub passport_ok: bool,
    /// ID-proof sub-check: not required, or approved.
    pub id_ok: bool,
    /// Both sub-checks pass.
    pub verified: bool,
    /// The final verdict: whether the user is blocked.
    pub locked: bool,
}

/// Evaluate the verification gate for a user.
pub fn evaluate(role: Role, documents: &DocumentSet, policy: &PolicyConfig) -> GateStatus {
    let passport_ok =
        !policy.passport_required || documents.is_approved(DocumentKind::PassportPhoto);
    let id_ok = !policy.id_required || documents.is_approved(DocumentKind::IdProof);
    let verified = passport_ok && id_ok;

    let locked = policy.enforcement_enabled
        && !role.can(Capability::BypassVerificationGate)
        && !verified;

    GateStatus {
        passport_ok,
        id_ok,
        verified,
        locked,
    }
}

/// Boolean form of [`evaluate`].
pub fn is_locked(role: Role, documents: &DocumentSet, policy: &PolicyConfig) -> bool {
    evaluate(role, documents, policy).locked
}
