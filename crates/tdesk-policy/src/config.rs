//! # Policy Configuration
//!
//! The configuration every evaluation reads. Owned by the Admin role,
//! edited only through explicit policy actions, and always passed
//! explicitly — no crate in this workspace reads policy from a global.
//!
//! Iteration over per-mode policies uses a `BTreeMap` so listings and
//! serialized forms are deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tdesk_core::TravelMode;

/// Minimum-advance-notice rule for one travel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticePolicy {
    /// The mode this rule applies to.
    pub mode: TravelMode,
    /// Minimum whole calendar days between submission and travel.
    pub min_advance_days: u32,
}

/// The per-mode notice rules, at most one per mode.
///
/// A mode with no entry has no notice requirement: lookups that miss mean
/// "no violation", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoticePolicySet {
    rules: BTreeMap<TravelMode, u32>,
}

impl NoticePolicySet {
    /// Create an empty set (no mode has a notice requirement).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the rule for a mode.
    pub fn set(&mut self, mode: TravelMode, min_advance_days: u32) {
        self.rules.insert(mode, min_advance_days);
    }

    /// Remove the rule for a mode, returning the old threshold if present.
    pub fn remove(&mut self, mode: TravelMode) -> Option<u32> {
        self.rules.remove(&mode)
    }

    /// The minimum advance days required for a mode, if a rule exists.
    pub fn min_advance_days(&self, mode: TravelMode) -> Option<u32> {
        self.rules.get(&mode).copied()
    }

    /// All rules in deterministic (mode) order.
    pub fn rules(&self) -> impl Iterator<Item = NoticePolicy> + '_ {
        self.rules.iter().map(|(mode, days)| NoticePolicy {
            mode: *mode,
            min_advance_days: *days,
        })
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<NoticePolicy> for NoticePolicySet {
    fn from_iter<I: IntoIterator<Item = NoticePolicy>>(iter: I) -> Self {
        let mut set = Self::new();
        for rule in iter {
            set.set(rule.mode, rule.min_advance_days);
        }
        set
    }
}

/// Process-wide travel policy, threaded explicitly through every evaluation.
///
/// Replaced whole-object by policy edits; evaluators never cache derived
/// state, so an edit takes effect on the next evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Per-mode notice rules.
    pub notice: NoticePolicySet,
    /// Requests costing at most this many minor units are auto-approved.
    /// `None` disables auto-approval. Integer minor units — never a float.
    pub auto_approve_limit_minor: Option<u64>,
    /// Whether the verification gate requires an approved passport photo.
    pub passport_required: bool,
    /// Whether the verification gate requires an approved ID proof.
    pub id_required: bool,
    /// Master toggle for the verification gate. Off ⇒ nobody is locked.
    pub enforcement_enabled: bool,
}

impl PolicyConfig {
    /// The standard starting policy: 15-day flight notice, 7-day train,
    /// 3-day bus, both documents required, gate enforced, no auto-approval.
    pub fn standard() -> Self {
        let mut notice = NoticePolicySet::new();
        notice.set(TravelMode::Flight, 15);
        notice.set(TravelMode::Train, 7);
        notice.set(TravelMode::Bus, 3);
        Self {
            notice,
            auto_approve_limit_minor: None,
            passport_required: true,
            id_required: true,
            enforcement_enabled: true,
        }
    }

    /// A fully permissive policy: no notice rules, no documents required,
    /// gate off. Useful as a test and bootstrap baseline.
    pub fn permissive() -> Self {
        Self {
            notice: NoticePolicySet::new(),
            auto_approve_limit_minor: None,
            passport_required: false,
            id_required: false,
            enforcement_enabled: false,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::standard()
    }
}
