//! Route modules, one per API surface. Each exposes a `router()` that the
//! top-level [`crate::app`] merges.

pub mod dashboard;
pub mod mail_templates;
pub mod policy;
pub mod requests;
pub mod users;
