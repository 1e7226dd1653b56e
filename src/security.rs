use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password for storage
///
/// # Algorithm
/// `stored = hex(HMAC-SHA256(key = pepper, password))`
///
/// The pepper comes from `PASSWORD_PEPPER` and never enters the store, so a
/// dump of the user records alone cannot be brute-forced offline.
pub fn hash_password(password: &str, pepper: &str) -> Result<String> {
    let mut mac = keyed(pepper).ok_or(AppError::Hashing)?;
    mac.update(password.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a login attempt against a stored hash in constant time
pub fn verify_password(password: &str, stored_hash: &str, pepper: &str) -> bool {
    let stored = match hex::decode(stored_hash) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Stored password hash is not valid hex");
            return false;
        }
    };

    let Some(mut mac) = keyed(pepper) else {
        return false;
    };
    mac.update(password.as_bytes());
    mac.verify_slice(&stored).is_ok()
}

/// Compare the admin password prompt against `ADMIN_PASS`
pub fn verify_admin_password(input: &str, expected: &str) -> bool {
    match hash_password(expected, "") {
        Ok(reference) => verify_password(input, &reference, ""),
        Err(_) => false,
    }
}

fn keyed(key: &str) -> Option<HmacSha256> {
    match HmacSha256::new_from_slice(key.as_bytes()) {
        Ok(m) => Some(m),
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_hex_sha256() {
        let hash = hash_password("secret", "pepper").unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_password_deterministic() {
        assert_eq!(
            hash_password("secret", "p").unwrap(),
            hash_password("secret", "p").unwrap()
        );
    }

    #[test]
    fn test_hash_password_depends_on_pepper() {
        assert_ne!(
            hash_password("secret", "p1").unwrap(),
            hash_password("secret", "p2").unwrap()
        );
    }

    #[test]
    fn test_hash_password_known_value() {
        // Published HMAC-SHA256 vector
        assert_eq!(
            hash_password("The quick brown fox jumps over the lazy dog", "key").unwrap(),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_verify_password_valid() {
        let stored = hash_password("hunter2", "pep").unwrap();
        assert!(verify_password("hunter2", &stored, "pep"));
    }

    #[test]
    fn test_verify_password_wrong_password_or_pepper() {
        let stored = hash_password("hunter2", "pep").unwrap();
        assert!(!verify_password("hunter3", &stored, "pep"));
        assert!(!verify_password("hunter2", &stored, "other"));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        assert!(!verify_password("x", "not-hex", ""));
        assert!(!verify_password("x", "", ""));
    }

    #[test]
    fn test_verify_admin_password() {
        assert!(verify_admin_password("rahasia", "rahasia"));
        assert!(!verify_admin_password("rahasia ", "rahasia"));
        assert!(!verify_admin_password("", "rahasia"));
    }
}
