//! Credential handling

use std::fmt::Debug;

/// Seam between the directory and the credential format in the store.
pub trait CredentialScheme: Send + Sync + Debug {
    /// Prepare a password for storage
    fn protect(&self, password: &str) -> String;

    /// Compare a presented password against the stored credential
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// The legacy scheme: credentials are stored verbatim and compared with a
/// single equality check, without normalization or lockout. A hardened
/// deployment would swap in a salted-hash scheme behind the same trait;
/// the stored format predates any such mechanism.
#[derive(Debug, Default)]
pub struct PlaintextCredentials;

impl CredentialScheme for PlaintextCredentials {
    fn protect(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        password == stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_roundtrip() {
        let scheme = PlaintextCredentials;
        let stored = scheme.protect("123");
        assert_eq!(stored, "123");
        assert!(scheme.verify("123", &stored));
    }

    #[test]
    fn test_plaintext_is_exact() {
        let scheme = PlaintextCredentials;
        assert!(!scheme.verify("123 ", "123"));
        assert!(!scheme.verify("ABC", "abc"));
    }
}
