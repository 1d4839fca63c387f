//! # Identity Document State Machine
//!
//! Models the verification lifecycle of the two identity documents every
//! user carries (passport photo, ID proof).
//!
//! ## States
//!
//! ```text
//! Incomplete ──upload──▶ PendingVerification ──approve──▶ Approved
//!                              │      ▲
//!                              │      └──reupload── Rejected
//!                              └──reject──▶ Rejected
//! ```
//!
//! A re-upload replaces the file and resets the document to
//! PendingVerification. Approved documents are final — there is no
//! transition out of Approved.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tdesk_core::Timestamp;

// ─── Document Kind ───────────────────────────────────────────────────

/// The two identity documents tracked per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Scanned passport photo page.
    PassportPhoto,
    /// Government-issued ID proof.
    IdProof,
}

impl DocumentKind {
    /// Return the snake_case string representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PassportPhoto => "passport_photo",
            Self::IdProof => "id_proof",
        }
    }

    /// Parse a kind from its snake_case string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "passport_photo" => Some(Self::PassportPhoto),
            "id_proof" => Some(Self::IdProof),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Document Status ─────────────────────────────────────────────────

/// The verification state of an identity document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Nothing uploaded yet.
    Incomplete,
    /// Uploaded, awaiting an approver's decision.
    PendingVerification,
    /// Accepted by an approver. Final.
    Approved,
    /// Refused by an approver; the user may re-upload.
    Rejected,
}

impl DocumentStatus {
    /// Whether this document counts toward verification.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Incomplete => "INCOMPLETE",
            Self::PendingVerification => "PENDING_VERIFICATION",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during document lifecycle transitions.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Attempted transition is not valid from the current status.
    #[error("invalid document transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Attempted target status.
        to: String,
    },

    /// A rejection must carry a non-empty reason for the user.
    #[error("rejection reason must not be empty")]
    EmptyRejectionReason,
}

// ─── Transition Record ───────────────────────────────────────────────

/// Record of a document status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTransitionRecord {
    /// Status before the transition.
    pub from_status: DocumentStatus,
    /// Status after the transition.
    pub to_status: DocumentStatus,
    /// When the transition occurred.
    pub timestamp: Timestamp,
    /// Reason for the transition.
    pub reason: String,
}

// ─── UserDocument ────────────────────────────────────────────────────

/// An identity document with its verification state and transition history.
///
/// Enforces valid state transitions with structured error reporting. The
/// verification gate reads only [`UserDocument::status`]; everything else
/// is audit detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    /// Which of the two per-user documents this is.
    pub kind: DocumentKind,
    /// Current verification status.
    pub status: DocumentStatus,
    /// Where the uploaded file lives, if anything was uploaded.
    pub file_url: Option<String>,
    /// Why the document was rejected, if it was.
    pub rejection_reason: Option<String>,
    /// Ordered log of all status transitions.
    pub transitions: Vec<DocumentTransitionRecord>,
}

impl UserDocument {
    /// Create an empty document slot (nothing uploaded).
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            status: DocumentStatus::Incomplete,
            file_url: None,
            rejection_reason: None,
            transitions: Vec::new(),
        }
    }

    /// First upload (INCOMPLETE → PENDING_VERIFICATION).
    pub fn upload(&mut self, file_url: String) -> Result<(), DocumentError> {
        if self.status != DocumentStatus::Incomplete {
            return Err(DocumentError::InvalidTransition {
                from: self.status.to_string(),
                to: DocumentStatus::PendingVerification.to_string(),
            });
        }
        self.file_url = Some(file_url);
        self.do_transition(DocumentStatus::PendingVerification, "uploaded");
        Ok(())
    }

    /// Replace the file (PENDING_VERIFICATION or REJECTED → PENDING_VERIFICATION).
    ///
    /// Clears any rejection reason. Approved documents are final and cannot
    /// be re-opened through this path.
    pub fn reupload(&mut self, file_url: String) -> Result<(), DocumentError> {
        if !matches!(
            self.status,
            DocumentStatus::PendingVerification | DocumentStatus::Rejected
        ) {
            return Err(DocumentError::InvalidTransition {
                from: self.status.to_string(),
                to: DocumentStatus::PendingVerification.to_string(),
            });
        }
        self.file_url = Some(file_url);
        self.rejection_reason = None;
        self.do_transition(DocumentStatus::PendingVerification, "re-uploaded");
        Ok(())
    }

    /// Upload or replace, dispatching on the current status.
    ///
    /// This is the single entry point the upload API uses: first upload when
    /// nothing exists, re-upload when a file is pending or was rejected.
    pub fn upload_or_replace(&mut self, file_url: String) -> Result<(), DocumentError> {
        match self.status {
            DocumentStatus::Incomplete => self.upload(file_url),
            _ => self.reupload(file_url),
        }
    }

    /// Approver accepts the document (PENDING_VERIFICATION → APPROVED).
    pub fn approve(&mut self, reason: &str) -> Result<(), DocumentError> {
        self.require_status(DocumentStatus::PendingVerification, DocumentStatus::Approved)?;
        self.rejection_reason = None;
        self.do_transition(DocumentStatus::Approved, reason);
        Ok(())
    }

    /// Approver refuses the document (PENDING_VERIFICATION → REJECTED).
    ///
    /// The reason is stored on the document so the user sees why.
    pub fn reject(&mut self, reason: &str) -> Result<(), DocumentError> {
        if reason.trim().is_empty() {
            return Err(DocumentError::EmptyRejectionReason);
        }
        self.require_status(DocumentStatus::PendingVerification, DocumentStatus::Rejected)?;
        self.rejection_reason = Some(reason.to_string());
        self.do_transition(DocumentStatus::Rejected, reason);
        Ok(())
    }

    /// Validate that the document is in the expected status.
    fn require_status(
        &self,
        expected: DocumentStatus,
        target: DocumentStatus,
    ) -> Result<(), DocumentError> {
        if self.status != expected {
            return Err(DocumentError::InvalidTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }

    /// Record a status transition.
    fn do_transition(&mut self, to: DocumentStatus, reason: &str) {
        self.transitions.push(DocumentTransitionRecord {
            from_status: self.status,
            to_status: to,
            timestamp: Timestamp::now(),
            reason: reason.to_string(),
        });
        self.status = to;
    }
}

// ─── DocumentSet ─────────────────────────────────────────────────────

/// The two per-user identity documents.
///
/// A `None` slot means the document record was never created — the
/// verification gate treats that exactly like a non-approved document
/// (fail-closed), never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSet {
    /// Passport photo slot.
    pub passport_photo: Option<UserDocument>,
    /// ID proof slot.
    pub id_proof: Option<UserDocument>,
}

impl DocumentSet {
    /// Create a set with both slots present and Incomplete.
    pub fn empty_slots() -> Self {
        Self {
            passport_photo: Some(UserDocument::new(DocumentKind::PassportPhoto)),
            id_proof: Some(UserDocument::new(DocumentKind::IdProof)),
        }
    }

    /// Borrow the document of the given kind, if the slot exists.
    pub fn get(&self, kind: DocumentKind) -> Option<&UserDocument> {
        match kind {
            DocumentKind::PassportPhoto => self.passport_photo.as_ref(),
            DocumentKind::IdProof => self.id_proof.as_ref(),
        }
    }

    /// Mutably borrow the document of the given kind, creating the slot
    /// (Incomplete) if it does not exist yet.
    pub fn get_or_create(&mut self, kind: DocumentKind) -> &mut UserDocument {
        let slot = match kind {
            DocumentKind::PassportPhoto => &mut self.passport_photo,
            DocumentKind::IdProof => &mut self.id_proof,
        };
        slot.get_or_insert_with(|| UserDocument::new(kind))
    }

    /// Whether the document of the given kind is approved.
    ///
    /// Missing slot ⇒ not approved.
    pub fn is_approved(&self, kind: DocumentKind) -> bool {
        self.get(kind).map(|d| d.status.is_approved()).unwrap_or(false)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
