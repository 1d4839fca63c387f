//! # tdesk-cli — Command-Line Tooling
//!
//! Offline evaluation of the same policy logic the API serves: check a
//! travel date against the notice rules, evaluate the verification gate for
//! a user snapshot, and validate policy files before deploying them.
//!
//! Policy files are YAML renditions of
//! [`tdesk_policy::PolicyConfig`]; user snapshots are JSON. Subcommands
//! return exit code 0 for "pass", 1 for "fail" (violation / locked /
//! invalid), and bubble operational errors up through anyhow.

pub mod gate;
pub mod notice;
pub mod policy;
