//! Time values and token parsing.
//!
//! # Responsibility
//! - Define canonical 24-hour clock values and timeblock pairs.
//! - Convert single textual time tokens into canonical values.
//!
//! # Invariants
//! - Every `CanonicalTime` holds `hour <= 23` and `minute <= 59`.
//! - Parsing never wraps out-of-range input; it fails instead.

pub mod canonical;
pub mod parser;
