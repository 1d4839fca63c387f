//! # Notice-Period Checker
//!
//! Decides whether a travel request violates the per-mode advance-notice
//! rules.
//!
//! ## Rule
//!
//! With `days_notice` = whole calendar days from today until the travel
//! date, a request violates iff a rule exists for its mode and
//! `days_notice < min_advance_days`. Exactly `min_advance_days` out passes.
//! Past-dated travel (negative `days_notice`) violates by the same
//! inequality — there is no special case.
//!
//! ## Fail-open
//!
//! A mode without a configured rule never violates. Missing inputs (no
//! mode, no date) are not evaluated at all and never violate. Contrast the
//! verification gate, which fails closed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tdesk_core::{days_until, TravelMode};
use tdesk_state::NoticeSnapshot;

use crate::config::NoticePolicySet;

/// The verdict of a notice-period evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NoticeOutcome {
    /// A rule exists and the request satisfies it.
    Compliant {
        /// Calendar days of notice given.
        days_notice: i64,
        /// The threshold that was satisfied.
        required_days: u32,
    },
    /// A rule exists and the request falls short of it.
    Violation {
        /// Calendar days of notice given (may be negative).
        days_notice: i64,
        /// The threshold that was missed.
        required_days: u32,
    },
    /// No rule for this mode, or inputs were missing. Never a violation.
    NotEvaluated,
}

impl NoticeOutcome {
    /// Whether this outcome is a violation.
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violation { .. })
    }

    /// Freeze this outcome into the snapshot stored on the request.
    pub fn to_snapshot(self) -> NoticeSnapshot {
        match self {
            Self::Compliant {
                days_notice,
                required_days,
            } => NoticeSnapshot {
                flagged: false,
                days_notice: Some(days_notice),
                required_days: Some(required_days),
            },
            Self::Violation {
                days_notice,
                required_days,
            } => NoticeSnapshot {
                flagged: true,
                days_notice: Some(days_notice),
                required_days: Some(required_days),
            },
            Self::NotEvaluated => NoticeSnapshot::not_evaluated(),
        }
    }
}

/// Evaluate the notice rule for a mode and travel date.
///
/// `today` is passed explicitly so evaluation is a pure function — callers
/// own the clock.
pub fn evaluate(
    mode: TravelMode,
    date_of_travel: NaiveDate,
    today: NaiveDate,
    rules: &NoticePolicySet,
) -> NoticeOutcome {
    let Some(required_days) = rules.min_advance_days(mode) else {
        return NoticeOutcome::NotEvaluated;
    };

    let days_notice = days_until(date_of_travel, today);
    if days_notice < i64::from(required_days) {
        NoticeOutcome::Violation {
            days_notice,
            required_days,
        }
    } else {
        NoticeOutcome::Compliant {
            days_notice,
            required_days,
        }
    }
}

/// Evaluate with possibly missing inputs.
///
/// A submission form may not have both fields filled in yet; until it does,
/// nothing is evaluated and nothing violates.
pub fn evaluate_optional(
    mode: Option<TravelMode>,
    date_of_travel: Option<NaiveDate>,
    today: NaiveDate,
    rules: &NoticePolicySet,
) -> NoticeOutcome {
    match (mode, date_of_travel) {
        (Some(mode), Some(date)) => evaluate(mode, date, today, rules),
        _ => NoticeOutcome::NotEvaluated,
    }
}

/// Boolean form of [`evaluate`].
pub fn is_violation(
    mode: TravelMode,
    date_of_travel: NaiveDate,
    today: NaiveDate,
    rules: &NoticePolicySet,
) -> bool {
    evaluate(mode, date_of_travel, today, rules).is_violation()
}
