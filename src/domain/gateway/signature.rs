//! Gateway notification signature verification.
//!
//! The gateway signs each notification with a SHA-512 digest over the exact
//! concatenation `order_id + status_code + gross_amount + server_key`. Field
//! order and encoding are a fixed wire contract and must be reproduced
//! byte-for-byte. Verification fails closed: any missing field is an invalid
//! signature, never a pass.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use super::notification::GatewayNotification;

/// Verifier for gateway notification signatures.
#[derive(Clone)]
pub struct SignatureVerifier {
    /// The pre-shared merchant server key.
    server_key: SecretString,
}

impl SignatureVerifier {
    /// Creates a new verifier with the given server key.
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: SecretString::new(server_key.into()),
        }
    }

    /// Verifies a notification's signature.
    ///
    /// Returns `false` if any of order_id, status_code, gross_amount, or
    /// signature_key is missing or empty, or if the digest does not match.
    /// No state-changing side effect may run before this returns `true`.
    pub fn verify(&self, notification: &GatewayNotification) -> bool {
        let (order_id, status_code, gross_amount, supplied) = match (
            non_empty(notification.order_id.as_deref()),
            non_empty(notification.status_code.as_deref()),
            non_empty(notification.gross_amount.as_deref()),
            non_empty(notification.signature_key.as_deref()),
        ) {
            (Some(o), Some(s), Some(g), Some(k)) => (o, s, g, k),
            _ => return false,
        };

        let expected = self.compute(order_id, status_code, gross_amount);
        constant_time_eq(expected.as_bytes(), supplied.to_lowercase().as_bytes())
    }

    /// Computes the hex-encoded SHA-512 signature for the given fields.
    ///
    /// Exposed so operational tooling and tests can produce fixtures; the
    /// concatenation order is part of the gateway contract.
    pub fn compute(&self, order_id: &str, status_code: &str, gross_amount: &str) -> String {
        let mut hasher = Sha512::new();
        hasher.update(order_id.as_bytes());
        hasher.update(status_code.as_bytes());
        hasher.update(gross_amount.as_bytes());
        hasher.update(self.server_key.expose_secret().as_bytes());
        hex_encode(&hasher.finalize())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Lowercase hex encoding without pulling in an extra crate.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Constant-time comparison of two byte slices.
///
/// Prevents timing attacks that could leak information about the expected
/// signature.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
