//! Submission pipeline.
//!
//! The one place the three policy checks compose: evaluate the notice rule,
//! freeze the verdict into a snapshot, decide auto-approval, and construct
//! the request. API handlers and the CLI both go through here so nothing
//! submits a request with an unevaluated snapshot.

use chrono::NaiveDate;

use tdesk_state::{RequestError, SubmitRequestParams, TravelRequest};

use crate::approval::auto_approvable;
use crate::config::PolicyConfig;
use crate::notice;

/// Evaluate policy and submit a travel request.
///
/// `today` is the submission date, passed explicitly so the evaluation is a
/// pure function of its inputs.
///
/// # Errors
///
/// Propagates [`RequestError`] from construction: blank cities, or a
/// flagged submission lacking a justification.
pub fn submit_request(
    params: SubmitRequestParams,
    policy: &PolicyConfig,
    today: NaiveDate,
) -> Result<TravelRequest, RequestError> {
    let outcome = notice::evaluate(params.mode, params.date_of_travel, today, &policy.notice);
    let auto_approve = auto_approvable(params.estimated_cost_minor, policy);
    TravelRequest::submit(params, outcome.to_snapshot(), auto_approve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tdesk_core::{TravelMode, UserId};
    use tdesk_state::RequestStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    fn params(mode: TravelMode, days_out: i64) -> SubmitRequestParams {
        SubmitRequestParams {
            employee_id: UserId::new(),
            mode,
            date_of_travel: today() + Duration::days(days_out),
            origin: "Karachi".to_string(),
            destination: "Islamabad".to_string(),
            estimated_cost_minor: 30_000_00,
            justification: None,
        }
    }

    #[test]
    fn compliant_submission_records_a_clear_snapshot() {
        let req = submit_request(params(TravelMode::Flight, 20), &PolicyConfig::standard(), today())
            .unwrap();
        assert_eq!(req.status, RequestStatus::Submitted);
        assert!(!req.violation().flagged);
        assert_eq!(req.violation().days_notice, Some(20));
        assert_eq!(req.violation().required_days, Some(15));
    }

    #[test]
    fn short_notice_without_justification_is_refused() {
        let result = submit_request(params(TravelMode::Flight, 10), &PolicyConfig::standard(), today());
        assert!(matches!(result, Err(RequestError::JustificationRequired)));
    }

    #[test]
    fn short_notice_with_justification_is_flagged_but_accepted() {
        let mut p = params(TravelMode::Flight, 10);
        p.justification = Some("client escalation".to_string());
        let req = submit_request(p, &PolicyConfig::standard(), today()).unwrap();
        assert!(req.violation().flagged);
        assert_eq!(req.violation().days_notice, Some(10));
    }

    #[test]
    fn unconfigured_mode_submits_with_an_unevaluated_snapshot() {
        let req = submit_request(params(TravelMode::Other, 0), &PolicyConfig::standard(), today())
            .unwrap();
        assert!(!req.violation().flagged);
        assert!(req.violation().days_notice.is_none());
    }

    #[test]
    fn cheap_request_auto_approves() {
        let mut policy = PolicyConfig::standard();
        policy.auto_approve_limit_minor = Some(40_000_00);
        let req = submit_request(params(TravelMode::Flight, 20), &policy, today()).unwrap();
        assert_eq!(req.status, RequestStatus::Approved);
    }

    #[test]
    fn expensive_request_waits_for_a_human() {
        let mut policy = PolicyConfig::standard();
        policy.auto_approve_limit_minor = Some(20_000_00);
        let req = submit_request(params(TravelMode::Flight, 20), &policy, today()).unwrap();
        assert_eq!(req.status, RequestStatus::Submitted);
    }

    #[test]
    fn flagged_and_cheap_still_needs_justification_first() {
        // Auto-approval never silences the justification requirement.
        let mut policy = PolicyConfig::standard();
        policy.auto_approve_limit_minor = Some(40_000_00);
        let result = submit_request(params(TravelMode::Flight, 5), &policy, today());
        assert!(matches!(result, Err(RequestError::JustificationRequired)));

        let mut p = params(TravelMode::Flight, 5);
        p.justification = Some("urgent audit visit".to_string());
        let req = submit_request(p, &policy, today()).unwrap();
        assert_eq!(req.status, RequestStatus::Approved);
        assert!(req.violation().flagged);
    }
}
