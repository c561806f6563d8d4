//! Game history tracking resources
//!
//! Manages the confirmed-move ledger and its paired display rows.

pub mod history;

// Re-export all public items
pub use history::*;
