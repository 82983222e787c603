//! Host application seams.
//!
//! # Responsibility
//! - Define storage as an injected collaborator rather than a global.
//! - Apply document formatting on save events and explicit commands.
//!
//! # See also
//! - `settings` for trigger scope configuration.

pub mod formatter;
pub mod store;
