//! # tdesk-core — Foundational Types for the TDesk Stack
//!
//! This crate is the bedrock of the TDesk travel-request stack. It defines
//! the type-system primitives every other crate builds on. Every other crate
//! in the workspace depends on `tdesk-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `UserId`, `RequestId`,
//!    `TemplateId` — UUID newtypes, valid by construction. No bare strings
//!    or raw UUIDs crossing crate boundaries.
//!
//! 2. **Single `TravelMode` enum.** One definition, four variants,
//!    exhaustive `match` everywhere. Adding a mode forces every consumer
//!    to handle it.
//!
//! 3. **Roles dispatch through a capability table.** `Role::can(Capability)`
//!    is the only authorization primitive — no scattered role equality
//!    checks in handlers or state machines.
//!
//! 4. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Travel dates are calendar dates
//!    (`chrono::NaiveDate`) — notice-period arithmetic is whole calendar
//!    days by construction.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tdesk-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod role;
pub mod temporal;
pub mod travel;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use identity::{RequestId, TemplateId, UserId};
pub use role::{Capability, Role};
pub use temporal::{days_until, parse_date, Timestamp};
pub use travel::{TravelMode, TRAVEL_MODE_COUNT};
