//! # Roles & Capabilities
//!
//! The closed role set of the travel desk and the capability table that
//! drives all authorization decisions.
//!
//! Roles are deliberately NOT ordered by privilege: PNC (the booking desk)
//! and Finance hold disjoint capability sets, so a `>=` comparison would be
//! meaningless. Every authorization check goes through
//! [`Role::can`] — handlers and state machines never compare roles for
//! equality.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Roles in the travel desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits and cancels their own travel requests.
    Employee,
    /// The booking desk: fulfills approved requests.
    Pnc,
    /// Tracks spend and closes booked requests after reconciliation.
    Finance,
    /// Configures policy, verifies documents, manages users and templates.
    Admin,
}

/// A discrete permission a role may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Submit a new travel request.
    SubmitRequest,
    /// Cancel an own, still-pending request.
    CancelRequest,
    /// Approve or reject a submitted request.
    ApproveRequest,
    /// Mark an approved request as booked.
    BookTicket,
    /// Close a booked request after reconciliation.
    CloseRequest,
    /// View spend and status dashboards.
    ViewDashboard,
    /// Edit the policy configuration.
    ManagePolicies,
    /// Approve or reject identity documents.
    VerifyDocuments,
    /// Create and manage user accounts.
    ManageUsers,
    /// Edit mail templates.
    ManageMailTemplates,
    /// Exempt from the onboarding verification gate.
    BypassVerificationGate,
}

impl Role {
    /// The capability table. Authorization is a membership lookup here,
    /// nothing else.
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Self::Employee => &[SubmitRequest, CancelRequest],
            Self::Pnc => &[BookTicket, ViewDashboard],
            Self::Finance => &[CloseRequest, ViewDashboard],
            Self::Admin => &[
                SubmitRequest,
                CancelRequest,
                ApproveRequest,
                BookTicket,
                CloseRequest,
                ViewDashboard,
                ManagePolicies,
                VerifyDocuments,
                ManageUsers,
                ManageMailTemplates,
                BypassVerificationGate,
            ],
        }
    }

    /// Whether this role holds the given capability.
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Return the snake_case string representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Pnc => "pnc",
            Self::Finance => "finance",
            Self::Admin => "admin",
        }
    }

    /// Parse a role from its snake_case string form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownRole`] for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "employee" => Ok(Self::Employee),
            "pnc" => Ok(Self::Pnc),
            "finance" => Ok(Self::Finance),
            "admin" => Ok(Self::Admin),
            _ => Err(ValidationError::UnknownRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
