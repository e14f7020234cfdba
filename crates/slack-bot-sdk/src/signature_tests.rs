//! Tests for Slack request signature verification.

use super::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Fixed "now" used by the skew-window tests, unix seconds.
const NOW: i64 = 1_700_000_000;

/// Produce a well-formed `v0=<hex>` signature for a timestamp/body pair.
fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(&signing_base(timestamp, body));
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}

// ============================================================================
// Test: Canonical Signing String
// ============================================================================

#[test]
fn test_signing_base_layout() {
    // The exact bytes Slack signs: version, timestamp, body, colon-joined
    let base = signing_base("1531420618", b"command=%2Fexample&user_id=U123");

    assert_eq!(
        base,
        b"v0:1531420618:command=%2Fexample&user_id=U123".to_vec()
    );
}

#[test]
fn test_signing_base_preserves_raw_body_bytes() {
    // Arrange: a body that is not valid UTF-8
    let body = [0xff, 0xfe, 0x00, 0x42];

    // Act
    let base = signing_base("123", &body);

    // Assert: prefix then the untouched bytes
    assert!(base.starts_with(b"v0:123:"));
    assert_eq!(&base[7..], &body);
}

// ============================================================================
// Test: Valid Signature Verification
// ============================================================================

#[test]
fn test_verify_with_valid_signature() {
    // Arrange
    let secret = "8f742231b10e8888abcd99yyyzzz85a5";
    let verifier = SignatureVerifier::new(secret);
    let body = b"command=%2Flogoffqueuework&trigger_id=123.456&user_id=U123";
    let timestamp = NOW.to_string();
    let signature = sign(secret, &timestamp, body);

    // Act
    let is_valid = verifier.verify_at(NOW, &timestamp, &signature, body);

    // Assert
    assert!(is_valid, "Valid signature should pass verification");
}

#[test]
fn test_verify_accepts_timestamps_inside_skew_window() {
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let body = b"payload=%7B%7D";

    for offset in [-MAX_TIMESTAMP_SKEW_SECS, -60, 0, 60, MAX_TIMESTAMP_SKEW_SECS] {
        let timestamp = (NOW + offset).to_string();
        let signature = sign(secret, &timestamp, body);

        assert!(
            verifier.verify_at(NOW, &timestamp, &signature, body),
            "Offset {}s should be inside the skew window",
            offset
        );
    }
}

// ============================================================================
// Test: Tampering Detection
// ============================================================================

#[test]
fn test_verify_rejects_tampered_body() {
    // Arrange: sign one body, present another
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let timestamp = NOW.to_string();
    let original = b"payload=%7B%22type%22%3A%22view_submission%22%7D";
    let tampered = b"payload=%7B%22type%22%3A%22view_closed%22%7D";
    let signature = sign(secret, &timestamp, original);

    // Act
    let is_valid = verifier.verify_at(NOW, &timestamp, &signature, tampered);

    // Assert
    assert!(!is_valid, "Tampered body should fail verification");
}

#[test]
fn test_verify_rejects_wrong_secret() {
    // Arrange: signature produced under a different secret
    let verifier = SignatureVerifier::new("configured_secret");
    let timestamp = NOW.to_string();
    let body = b"command=%2Flogoffqueuework";
    let signature = sign("attacker_secret", &timestamp, body);

    // Act
    let is_valid = verifier.verify_at(NOW, &timestamp, &signature, body);

    // Assert
    assert!(!is_valid, "Signature under another secret should fail");
}

#[test]
fn test_verify_rejects_resigned_timestamp_mismatch() {
    // Arrange: valid signature for one timestamp presented with another
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let body = b"command=%2Flogoffqueuework";
    let signature = sign(secret, &NOW.to_string(), body);
    let other_timestamp = (NOW + 30).to_string();

    // Act
    let is_valid = verifier.verify_at(NOW, &other_timestamp, &signature, body);

    // Assert: timestamp participates in the signed string
    assert!(!is_valid, "Timestamp substitution should fail verification");
}

// ============================================================================
// Test: Replay Window
// ============================================================================

#[test]
fn test_verify_rejects_stale_timestamp_with_valid_signature() {
    // Arrange: correctly signed request, but older than the skew window
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let stale = (NOW - MAX_TIMESTAMP_SKEW_SECS - 1).to_string();
    let body = b"command=%2Flogoffqueuework";
    let signature = sign(secret, &stale, body);

    // Act
    let is_valid = verifier.verify_at(NOW, &stale, &signature, body);

    // Assert
    assert!(
        !is_valid,
        "Stale timestamp should be rejected even with a valid signature"
    );
}

#[test]
fn test_verify_rejects_future_timestamp_beyond_skew() {
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let future = (NOW + MAX_TIMESTAMP_SKEW_SECS + 1).to_string();
    let body = b"command=%2Flogoffqueuework";
    let signature = sign(secret, &future, body);

    assert!(
        !verifier.verify_at(NOW, &future, &signature, body),
        "Far-future timestamp should be rejected"
    );
}

#[test]
fn test_verify_rejects_non_numeric_timestamp() {
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let body = b"command=%2Flogoffqueuework";
    let signature = sign(secret, "not-a-number", body);

    assert!(
        !verifier.verify_at(NOW, "not-a-number", &signature, body),
        "Unparseable timestamp should fail closed"
    );
}

// ============================================================================
// Test: Signature Header Format
// ============================================================================

#[test]
fn test_verify_rejects_missing_version_prefix() {
    // Arrange: hex digest without the "v0=" prefix
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let timestamp = NOW.to_string();
    let body = b"command=%2Flogoffqueuework";
    let bare_hex = sign(secret, &timestamp, body)
        .strip_prefix("v0=")
        .map(str::to_string)
        .unwrap();

    // Act + Assert
    assert!(
        !verifier.verify_at(NOW, &timestamp, &bare_hex, body),
        "Missing v0= prefix should fail closed"
    );
}

#[test]
fn test_verify_rejects_invalid_hex() {
    let verifier = SignatureVerifier::new("test_signing_secret");
    let timestamp = NOW.to_string();

    assert!(!verifier.verify_at(NOW, &timestamp, "v0=not_valid_hex!!!", b"body"));
}

#[test]
fn test_verify_rejects_empty_signature() {
    let verifier = SignatureVerifier::new("test_signing_secret");
    let timestamp = NOW.to_string();

    assert!(!verifier.verify_at(NOW, &timestamp, "", b"body"));
}

#[test]
fn test_verify_rejects_truncated_digest() {
    // Well-formed hex of the wrong length must not match
    let verifier = SignatureVerifier::new("test_signing_secret");
    let timestamp = NOW.to_string();

    assert!(!verifier.verify_at(NOW, &timestamp, "v0=a1b2c3", b"body"));
}

// ============================================================================
// Test: Edge Cases
// ============================================================================

#[test]
fn test_verify_with_empty_body() {
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let timestamp = NOW.to_string();
    let signature = sign(secret, &timestamp, b"");

    assert!(
        verifier.verify_at(NOW, &timestamp, &signature, b""),
        "Empty body with a valid signature should pass"
    );
}

#[test]
fn test_verify_with_unicode_body() {
    let secret = "test_signing_secret";
    let verifier = SignatureVerifier::new(secret);
    let timestamp = NOW.to_string();
    let body = "payload=%7B%22text%22%3A%22Entretien%20technique%20☕%22%7D".as_bytes();
    let signature = sign(secret, &timestamp, body);

    assert!(verifier.verify_at(NOW, &timestamp, &signature, body));
}

// ============================================================================
// Test: Debug Output Security
// ============================================================================

#[test]
fn test_debug_output_does_not_expose_secret() {
    // Arrange
    let secret = "super_secret_signing_key";
    let verifier = SignatureVerifier::new(secret);

    // Act
    let debug_output = format!("{:?}", verifier);

    // Assert
    assert!(
        !debug_output.contains(secret),
        "Debug output should not contain the signing secret"
    );
    assert!(
        debug_output.contains("REDACTED"),
        "Debug output should indicate redaction"
    );
}
