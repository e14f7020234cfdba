//! Slack request signature verification.
//!
//! Implements Slack's signed-secrets scheme: HMAC-SHA256 over the canonical
//! string `v0:{timestamp}:{body}` with constant-time comparison against the
//! signature header, plus a timestamp skew window to reject replays.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature (`v0=<hex>`), lowercased.
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Header carrying the request timestamp (unix seconds), lowercased.
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Signature scheme version Slack prefixes the canonical string with.
pub const SIGNATURE_VERSION: &str = "v0";

/// Maximum accepted distance between the request timestamp and the local
/// clock, in seconds. Requests outside this window are rejected as replays.
pub const MAX_TIMESTAMP_SKEW_SECS: i64 = 300;

/// Build the canonical string-to-sign: `v0:{timestamp}:{body}`.
///
/// Kept as a standalone function so the exact bytes Slack signs can be
/// asserted in tests without touching the HMAC machinery.
pub fn signing_base(timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut base = Vec::with_capacity(SIGNATURE_VERSION.len() + timestamp.len() + body.len() + 2);
    base.extend_from_slice(SIGNATURE_VERSION.as_bytes());
    base.push(b':');
    base.extend_from_slice(timestamp.as_bytes());
    base.push(b':');
    base.extend_from_slice(body);
    base
}

/// Verifies Slack webhook request signatures.
///
/// Every check fails closed: a missing, malformed, stale, or mismatched
/// input makes [`SignatureVerifier::verify`] return `false`. The verifier
/// has no side effects and never logs the secret or signature material.
#[derive(Clone)]
pub struct SignatureVerifier {
    signing_secret: String,
}

impl SignatureVerifier {
    /// Create a verifier for the given signing secret.
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
        }
    }

    /// Verify a request against its timestamp and signature headers.
    ///
    /// Returns `true` only when the timestamp is within
    /// [`MAX_TIMESTAMP_SKEW_SECS`] of the local clock and the signature
    /// header matches the HMAC-SHA256 of `v0:{timestamp}:{body}` under the
    /// configured secret.
    pub fn verify(&self, timestamp: &str, signature: &str, body: &[u8]) -> bool {
        self.verify_at(Utc::now().timestamp(), timestamp, signature, body)
    }

    /// Verify against an explicit "now", in unix seconds.
    ///
    /// The clock is a parameter so the skew window can be tested without
    /// manufacturing wall-clock-relative timestamps.
    pub fn verify_at(&self, now: i64, timestamp: &str, signature: &str, body: &[u8]) -> bool {
        let Ok(request_time) = timestamp.parse::<i64>() else {
            return false;
        };

        if (now - request_time).abs() > MAX_TIMESTAMP_SKEW_SECS {
            return false;
        }

        let Some(provided) = parse_signature(signature) else {
            return false;
        };

        let Some(expected) = self.compute_signature(timestamp, body) else {
            return false;
        };
        constant_time_compare(&provided, &expected)
    }

    /// Compute the expected HMAC-SHA256 digest for a timestamp/body pair.
    ///
    /// `None` (HMAC key rejection, which SHA-256 HMAC does not actually
    /// produce) is treated as verification failure by the caller.
    fn compute_signature(&self, timestamp: &str, body: &[u8]) -> Option<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes()).ok()?;
        mac.update(&signing_base(timestamp, body));
        Some(mac.finalize().into_bytes().to_vec())
    }
}

/// Parse Slack's `v0=<hex>` signature header into raw digest bytes.
///
/// Returns `None` for a missing prefix or invalid hex, so callers reject
/// malformed headers the same way they reject mismatched ones.
fn parse_signature(signature: &str) -> Option<Vec<u8>> {
    let prefix = format!("{}=", SIGNATURE_VERSION);
    let hex_digest = signature.strip_prefix(&prefix)?;
    hex::decode(hex_digest).ok()
}

/// Constant-time comparison of two digests.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;

    // Length is not secret; comparing it early is safe.
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

// Security: don't expose the signing secret in debug output
impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("signing_secret", &"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
