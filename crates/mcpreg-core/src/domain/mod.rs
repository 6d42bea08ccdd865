//! Core entities for the registry
//!
//! The canonical shapes follow the v0.1 wire format; older revisions are
//! remapped at the API boundary.

mod envelope;
mod server;

pub use envelope::*;
pub use server::*;
