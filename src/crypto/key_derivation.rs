//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives the AES-256 key from the operator's password and a per-encryption
//! random salt. The primitive and parameters are pinned by the wire format:
//! the browser-side decryptor runs the same named construction, so both sides
//! must produce identical keys from identical (password, salt, iterations).

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

/// Salt length in bytes, fixed by the envelope format
pub const SALT_SIZE: usize = 16;

/// Derived key length in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// A derived encryption key
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        // Zero out the key when dropped
        for b in self.key.iter_mut() {
            unsafe {
                std::ptr::write_volatile(b, 0);
            }
        }
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive an AES-256 key from a password and salt
pub fn derive_key(password: &str, salt: &[u8], iterations: u32) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    DerivedKey { key }
}

/// Generate a fresh random salt from the OS CSPRNG
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}
