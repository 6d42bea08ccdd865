//! Opaque pagination cursors
//!
//! A cursor is base64 over the decimal form of a zero-based offset into the
//! materialized, filtered result sequence. Cursors are best-effort hints,
//! never authoritative: offsets shift if the store mutates between pages,
//! and decoding untrusted input must not fail.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Encode an offset into an opaque cursor string.
pub fn encode(offset: usize) -> String {
    STANDARD.encode(offset.to_string())
}

/// Decode a cursor back into an offset.
///
/// Invalid or foreign cursors degrade to offset 0 rather than erroring;
/// a garbage cursor restarts the listing from the beginning.
pub fn decode(cursor: &str) -> usize {
    STANDARD
        .decode(cursor)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}
