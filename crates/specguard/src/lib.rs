//! Specguard library.
//!
//! Holds the lock-directory check driven by the `specguard check` command.
//! The main entry point is the `specguard` binary.

pub mod check;

pub use check::{run_check, CheckConfig, CheckError, CheckReport, GroupOutcome, GroupReport};
