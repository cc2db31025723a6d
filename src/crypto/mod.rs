//! Cryptographic functions for casepack
//!
//! Provides AES-256-CBC encryption with PBKDF2-HMAC-SHA256 key derivation,
//! producing envelopes a CryptoJS-based viewer can decrypt in the browser.
//! The scheme is confidentiality-only: there is no authentication tag, and
//! adding one would break the deployed decryptor. Tampering shows up only as
//! a padding or parse failure after decryption.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{decrypt_bytes, decrypt_value, encrypt_bytes, encrypt_value, Envelope};
pub use key_derivation::{derive_key, generate_salt, DerivedKey};
pub use secure_memory::SecureString;
