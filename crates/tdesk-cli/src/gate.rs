//! # Gate Subcommand
//!
//! Evaluates the verification gate for a user snapshot against a policy
//! file. The snapshot is a JSON object with the user's role and document
//! set, e.g. as returned by `GET /v1/users/:id`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use tdesk_core::Role;
use tdesk_policy::gate;
use tdesk_state::DocumentSet;

use crate::policy::load_policy;

/// Arguments for the `tdesk gate` subcommand.
#[derive(Args, Debug)]
pub struct GateArgs {
    /// Path to a JSON user snapshot with `role` and `documents` fields.
    #[arg(long)]
    pub user: PathBuf,

    /// Path to the policy YAML file.
    #[arg(long)]
    pub policy: PathBuf,
}

#[derive(Deserialize)]
struct UserSnapshot {
    role: Role,
    documents: DocumentSet,
}

/// Execute the gate subcommand.
///
/// Returns exit code: 0 when the gate is open, 1 when locked.
pub fn run_gate(args: &GateArgs) -> Result<u8> {
    let raw = std::fs::read_to_string(&args.user)
        .with_context(|| format!("failed to read user snapshot {}", args.user.display()))?;
    let snapshot: UserSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse user snapshot {}", args.user.display()))?;
    let policy = load_policy(&args.policy)?;

    let status = gate::evaluate(snapshot.role, &snapshot.documents, &policy);
    println!(
        "passport_ok={} id_ok={} verified={}",
        status.passport_ok, status.id_ok, status.verified
    );
    if status.locked {
        println!("LOCKED: identity verification incomplete for role {}", snapshot.role);
        Ok(1)
    } else {
        println!("UNLOCKED");
        Ok(0)
    }
}
