//! Request middleware: traffic counters. Auth lives in [`crate::auth`].

pub mod stats;
