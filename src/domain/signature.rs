//! HMAC-SHA256 signature verification for both confirmation channels.
//!
//! The gateway signs the client-confirmation path over `orderId|paymentId`
//! with the API key secret, and the webhook path over the raw JSON body with
//! a separate webhook secret. The two secrets must never be interchanged.
//!
//! All comparisons are constant-time to prevent timing attacks.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded HMAC-SHA256 of `payload` under `secret`.
///
/// Exposed so test fixtures and tooling can produce valid signatures; the
/// service itself only ever verifies.
pub fn compute_signature(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(payload);
    hex_encode(&mac.finalize().into_bytes())
}

/// Verifies the client-confirmation signature over `orderId|paymentId`.
///
/// Uses the gateway API key secret (not the webhook secret).
pub fn verify_checkout_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let payload = format!("{}|{}", order_id, payment_id);
    verify(payload.as_bytes(), signature, secret)
}

/// Verifies the webhook signature over the exact raw request body.
///
/// Uses the webhook signing secret (not the API key secret).
pub fn verify_webhook_signature(body: &[u8], signature: &str, secret: &str) -> bool {
    verify(body, signature, secret)
}

fn verify(payload: &[u8], signature_hex: &str, secret: &str) -> bool {
    let Some(provided) = hex_decode(signature_hex) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(payload);
    let expected = mac.finalize().into_bytes();

    constant_time_compare(&expected, &provided)
}

/// Constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Encode bytes to a lowercase hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decode a hex string to bytes. Returns `None` on odd length or non-hex
/// characters. Decodes over bytes, never character slices, so arbitrary
/// client-supplied input cannot hit a char boundary.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.trim();
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for pair in hex.as_bytes().chunks_exact(2) {
        let pair = std::str::from_utf8(pair).ok()?;
        bytes.push(u8::from_str_radix(pair, 16).ok()?);
    }
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKOUT_SECRET: &str = "key_secret_test_1234";
    const WEBHOOK_SECRET: &str = "whsec_test_5678";

    // ══════════════════════════════════════════════════════════════
    // Checkout Path Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn valid_checkout_signature_verifies() {
        let signature =
            compute_signature(b"order_A1|pay_B2", CHECKOUT_SECRET);

        assert!(verify_checkout_signature(
            "order_A1",
            "pay_B2",
            &signature,
            CHECKOUT_SECRET
        ));
    }

    #[test]
    fn checkout_signature_for_other_payment_fails() {
        let signature = compute_signature(b"order_A1|pay_B2", CHECKOUT_SECRET);

        assert!(!verify_checkout_signature(
            "order_A1",
            "pay_OTHER",
            &signature,
            CHECKOUT_SECRET
        ));
    }

    #[test]
    fn checkout_signature_with_wrong_secret_fails() {
        let signature = compute_signature(b"order_A1|pay_B2", "some_other_secret");

        assert!(!verify_checkout_signature(
            "order_A1",
            "pay_B2",
            &signature,
            CHECKOUT_SECRET
        ));
    }

    #[test]
    fn checkout_secret_is_not_interchangeable_with_webhook_secret() {
        let signature = compute_signature(b"order_A1|pay_B2", WEBHOOK_SECRET);

        assert!(!verify_checkout_signature(
            "order_A1",
            "pay_B2",
            &signature,
            CHECKOUT_SECRET
        ));
    }

    // ══════════════════════════════════════════════════════════════
    // Webhook Path Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn valid_webhook_signature_verifies() {
        let body = br#"{"event":"payment.captured"}"#;
        let signature = compute_signature(body, WEBHOOK_SECRET);

        assert!(verify_webhook_signature(body, &signature, WEBHOOK_SECRET));
    }

    #[test]
    fn tampered_webhook_body_fails() {
        let body = br#"{"event":"payment.captured"}"#;
        let tampered = br#"{"event":"payment.captured" }"#;
        let signature = compute_signature(body, WEBHOOK_SECRET);

        assert!(!verify_webhook_signature(
            tampered,
            &signature,
            WEBHOOK_SECRET
        ));
    }

    #[test]
    fn non_hex_signature_fails_cleanly() {
        assert!(!verify_webhook_signature(
            b"{}",
            "not-hex-at-all",
            WEBHOOK_SECRET
        ));
    }

    #[test]
    fn odd_length_signature_fails_cleanly() {
        assert!(!verify_webhook_signature(b"{}", "abc", WEBHOOK_SECRET));
    }

    #[test]
    fn empty_signature_fails() {
        assert!(!verify_webhook_signature(b"{}", "", WEBHOOK_SECRET));
    }

    #[test]
    fn multibyte_signature_fails_cleanly() {
        // Client-supplied JSON can carry arbitrary UTF-8; it must be
        // rejected, never panic on a char boundary.
        assert!(!verify_checkout_signature(
            "order_A1",
            "pay_B2",
            "€€",
            CHECKOUT_SECRET
        ));
        assert!(!verify_webhook_signature(b"{}", "ab€d", WEBHOOK_SECRET));
        assert!(!verify_webhook_signature(b"{}", "日本語のテキスト", WEBHOOK_SECRET));
    }

    // ══════════════════════════════════════════════════════════════
    // Hex Helpers
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn hex_encode_bytes() {
        assert_eq!(hex_encode(&[0x00, 0xff, 0x10]), "00ff10");
    }

    #[test]
    fn hex_decode_roundtrip() {
        let original = vec![0xde, 0xad, 0xbe, 0xef];
        let encoded = hex_encode(&original);
        assert_eq!(hex_decode(&encoded), Some(original));
    }

    #[test]
    fn hex_decode_rejects_invalid_input() {
        assert!(hex_decode("zz").is_none());
        assert!(hex_decode("abc").is_none());
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
    }

    #[test]
    fn constant_time_compare_equal() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
    }
}
