//! # Notice Subcommand
//!
//! Evaluates a travel mode and date against the notice rules of a policy
//! file — the same evaluation the API runs at submission, runnable offline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Args;

use tdesk_core::{parse_date, TravelMode};
use tdesk_policy::{notice, NoticeOutcome};

use crate::policy::load_policy;

/// Arguments for the `tdesk notice` subcommand.
#[derive(Args, Debug)]
pub struct NoticeArgs {
    /// Travel mode: flight, train, bus, or other.
    #[arg(long)]
    pub mode: String,

    /// Calendar date of travel, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// Path to the policy YAML file.
    #[arg(long)]
    pub policy: PathBuf,

    /// Evaluate as of this date instead of today, YYYY-MM-DD.
    #[arg(long)]
    pub today: Option<String>,
}

/// Execute the notice subcommand.
///
/// Returns exit code: 0 when compliant or not evaluated, 1 on a violation.
pub fn run_notice(args: &NoticeArgs) -> Result<u8> {
    let mode = TravelMode::parse(&args.mode).context("invalid travel mode")?;
    let date_of_travel = parse_date(&args.date).context("invalid travel date")?;
    let today: NaiveDate = match &args.today {
        Some(s) => parse_date(s).context("invalid --today date")?,
        None => Utc::now().date_naive(),
    };
    let policy = load_policy(&args.policy)?;

    let outcome = notice::evaluate(mode, date_of_travel, today, &policy.notice);
    match outcome {
        NoticeOutcome::Compliant {
            days_notice,
            required_days,
        } => {
            println!(
                "OK: {mode} on {date_of_travel} gives {days_notice} day(s) notice, policy requires {required_days}"
            );
            Ok(0)
        }
        NoticeOutcome::Violation {
            days_notice,
            required_days,
        } => {
            println!(
                "VIOLATION: {mode} on {date_of_travel} gives {days_notice} day(s) notice, policy requires {required_days}"
            );
            Ok(1)
        }
        NoticeOutcome::NotEvaluated => {
            println!("NOT EVALUATED: no notice rule configured for {mode}");
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn policy_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
notice:
  flight: 15
auto_approve_limit_minor: null
passport_required: false
id_required: false
enforcement_enabled: false
"#,
        )
        .unwrap();
        file
    }

    fn args(mode: &str, date: &str, today: &str, policy: &std::path::Path) -> NoticeArgs {
        NoticeArgs {
            mode: mode.to_string(),
            date: date.to_string(),
            policy: policy.to_path_buf(),
            today: Some(today.to_string()),
        }
    }

    #[test]
    fn compliant_travel_exits_zero() {
        let file = policy_file();
        let code = run_notice(&args("flight", "2026-09-30", "2026-08-23", file.path())).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn short_notice_exits_one() {
        let file = policy_file();
        let code = run_notice(&args("flight", "2026-09-02", "2026-08-23", file.path())).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn unconfigured_mode_exits_zero() {
        let file = policy_file();
        let code = run_notice(&args("bus", "2026-08-23", "2026-08-23", file.path())).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn bad_mode_is_an_error() {
        let file = policy_file();
        assert!(run_notice(&args("zeppelin", "2026-09-30", "2026-08-23", file.path())).is_err());
    }

    #[test]
    fn bad_date_is_an_error() {
        let file = policy_file();
        assert!(run_notice(&args("flight", "30-09-2026", "2026-08-23", file.path())).is_err());
    }
}
