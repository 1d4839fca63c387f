//! # Policy Subcommand & Policy File Loading
//!
//! Loads YAML policy files and sanity-checks them before they are deployed
//! through `PUT /v1/policy`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use tdesk_policy::PolicyConfig;

/// Arguments for the `tdesk policy` subcommand.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: PolicyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// Parse and sanity-check a policy YAML file.
    Validate {
        /// Path to the policy file.
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

/// Load a [`PolicyConfig`] from a YAML file.
pub fn load_policy(path: &Path) -> Result<PolicyConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file {}", path.display()))?;
    let policy: PolicyConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse policy file {}", path.display()))?;
    Ok(policy)
}

/// Execute the policy subcommand.
///
/// Returns exit code: 0 when the file is valid, 1 otherwise.
pub fn run_policy(args: &PolicyArgs) -> Result<u8> {
    match &args.command {
        PolicyCommand::Validate { path } => {
            let policy = match load_policy(path) {
                Ok(policy) => policy,
                Err(e) => {
                    println!("FAIL: {e:#}");
                    return Ok(1);
                }
            };

            println!("Policy: {}", path.display());
            if policy.notice.is_empty() {
                println!("  notice rules: none (no mode ever violates)");
            } else {
                for rule in policy.notice.rules() {
                    println!(
                        "  notice: {} requires {} day(s) advance",
                        rule.mode, rule.min_advance_days
                    );
                }
            }
            match policy.auto_approve_limit_minor {
                Some(limit) => println!("  auto-approve limit: {limit} minor units"),
                None => println!("  auto-approve: disabled"),
            }
            println!(
                "  gate: enforcement={} passport_required={} id_required={}",
                policy.enforcement_enabled, policy.passport_required, policy.id_required
            );

            if policy.enforcement_enabled && !policy.passport_required && !policy.id_required {
                println!("  WARN: enforcement is on but no document is required — nobody can be locked");
            }

            println!("OK");
            Ok(0)
        }
    }
}
