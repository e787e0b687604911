//! Diagnostic ID constants.
//!
//! Auto-generated from `spec/vuids.jsonc` at build time.
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete.

include!(concat!(env!("OUT_DIR"), "/generated_codes.rs"));

/// Every ID listed in `spec/vuids.jsonc`, in file order.
pub const ALL: &[&str] = include!(concat!(env!("OUT_DIR"), "/generated_all.rs"));
