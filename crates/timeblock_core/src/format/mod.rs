//! Line rewrite engine.
//!
//! # Responsibility
//! - Turn free-form time expressions into `HH:MM - HH:MM` timeblocks.
//! - Keep one leading timeblock per task line.
//!
//! # Invariants
//! - Formatting is pure and idempotent.
//! - Unrecognized or invalid text is left exactly as written.

pub mod cleanup;
pub mod engine;
pub mod rules;
pub mod task;
