use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 digest of `raw_body` keyed by `secret`.
/// This is the value the provider places in `X-Razorpay-Signature`.
pub fn sign(raw_body: &[u8], secret: &str) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies `provided` against the digest of the exact raw request
/// bytes. Comparison is constant-time over the hex renderings; any
/// failure to even compute a digest counts as a mismatch.
pub fn verify(raw_body: &[u8], provided: &str, secret: &str) -> bool {
    let expected = sign(raw_body, secret);
    if expected.is_empty() {
        return false;
    }
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::{sign, verify};

    const SECRET: &str = "test_secret";

    #[test]
    fn round_trip() {
        let body = br#"{"event":"payment.authorized","id":"evt_1"}"#;
        let sig = sign(body, SECRET);
        assert!(verify(body, &sig, SECRET));
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let sig = sign(b"payload", SECRET);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn tampered_signature_rejected() {
        let body = b"payload bytes";
        let sig = sign(body, SECRET);
        // Flip one nibble at every position.
        for i in 0..sig.len() {
            let mut bad = sig.clone().into_bytes();
            bad[i] = if bad[i] == b'0' { b'1' } else { b'0' };
            let bad = String::from_utf8(bad).unwrap();
            assert!(!verify(body, &bad, SECRET), "mutation at {i} accepted");
        }
    }

    #[test]
    fn wrong_secret_rejected() {
        let body = b"payload bytes";
        let sig = sign(body, "other_secret");
        assert!(!verify(body, &sig, SECRET));
    }

    #[test]
    fn tampered_body_rejected() {
        let sig = sign(b"original", SECRET);
        assert!(!verify(b"original ", &sig, SECRET));
    }

    #[test]
    fn garbage_signature_rejected_without_panic() {
        assert!(!verify(b"payload", "", SECRET));
        assert!(!verify(b"payload", "not-hex-at-all", SECRET));
        assert!(!verify(b"payload", &"f".repeat(1024), SECRET));
    }

    #[test]
    fn empty_body_still_signs() {
        let sig = sign(b"", SECRET);
        assert!(verify(b"", &sig, SECRET));
    }
}
