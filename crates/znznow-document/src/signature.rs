//! Signature image decoding.
//!
//! Submitted signatures arrive as data URIs produced by a canvas element:
//! `data:image/png;base64,<payload>`. The prefix is advisory; everything up
//! to the first comma is discarded and the remainder base64-decoded. A
//! string without a comma is treated as a bare payload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decode a submitted signature string into raw image bytes.
///
/// Returns `None` on any decode failure: a submission without a usable
/// signature still succeeds, it just renders and persists without one.
#[must_use]
pub fn decode_signature(data: &str) -> Option<Vec<u8>> {
    let payload = match data.split_once(',') {
        Some((_prefix, rest)) => rest,
        None => data,
    };

    match STANDARD.decode(payload) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            tracing::warn!(error = %err, "failed to decode signature image");
            None
        }
    }
}
