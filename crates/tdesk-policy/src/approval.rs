//! Auto-approval threshold.
//!
//! A request whose estimated cost is at or below the configured limit skips
//! the human approval step. No limit configured means nothing auto-approves.
//! Amounts are integer minor units, so the comparison is exact.

use crate::config::PolicyConfig;

/// Whether a request of the given estimated cost auto-approves under the
/// policy.
pub fn auto_approvable(estimated_cost_minor: u64, policy: &PolicyConfig) -> bool {
    match policy.auto_approve_limit_minor {
        Some(limit) => estimated_cost_minor <= limit,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_limit(limit: u64) -> PolicyConfig {
        PolicyConfig {
            auto_approve_limit_minor: Some(limit),
            ..PolicyConfig::permissive()
        }
    }

    #[test]
    fn at_or_below_the_limit_auto_approves() {
        let policy = with_limit(50_000_00);
        assert!(auto_approvable(49_999_99, &policy));
        assert!(auto_approvable(50_000_00, &policy));
    }

    #[test]
    fn above_the_limit_does_not() {
        let policy = with_limit(50_000_00);
        assert!(!auto_approvable(50_000_01, &policy));
    }

    #[test]
    fn no_limit_means_nothing_auto_approves() {
        let policy = PolicyConfig::permissive();
        assert!(!auto_approvable(0, &policy));
        assert!(!auto_approvable(1, &policy));
    }

    #[test]
    fn zero_limit_still_approves_zero_cost() {
        let policy = with_limit(0);
        assert!(auto_approvable(0, &policy));
        assert!(!auto_approvable(1, &policy));
    }
}
