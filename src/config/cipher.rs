//! Cipher parameter persistence
//!
//! All encrypted artifacts written to one output directory must share a
//! single parameter set, otherwise artifacts produced in separate runs stop
//! being decryptable with the same password. The rule is: reuse an existing
//! `encryption_config.json` verbatim; only when none exists may defaults (or
//! operator overrides) be chosen. A present-but-malformed config file fails
//! the run instead of silently falling back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CasepackError, CasepackResult};
use crate::storage::file_io::write_json_atomic;

/// Default PBKDF2 iteration count, matching the deployed browser decryptor
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Key size in bits; the scheme is fixed to AES-256
pub const KEY_SIZE_BITS: u32 = 256;

/// Wire identifier for the cipher/mode pair
pub const ALGORITHM: &str = "AES-CBC";

/// Persisted KDF and cipher parameters
///
/// Serialized with the field names the consuming viewer expects
/// (`iterations`, `keySize`, `algorithm`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CipherConfig {
    /// PBKDF2-HMAC-SHA256 iteration count
    pub iterations: u32,
    /// Key size in bits (always 256)
    pub key_size: u32,
    /// Cipher/mode identifier (always "AES-CBC")
    pub algorithm: String,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_size: KEY_SIZE_BITS,
            algorithm: ALGORITHM.to_string(),
        }
    }
}

impl CipherConfig {
    /// Create a config with a custom iteration count
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Validate the parameter set
    ///
    /// Only AES-256-CBC with a positive iteration count is representable on
    /// the decrypting side.
    pub fn validate(&self) -> CasepackResult<()> {
        if self.iterations == 0 {
            return Err(CasepackError::Config(
                "iterations must be a positive integer".to_string(),
            ));
        }
        if self.key_size != KEY_SIZE_BITS {
            return Err(CasepackError::Config(format!(
                "unsupported key size {} (only {} is supported)",
                self.key_size, KEY_SIZE_BITS
            )));
        }
        if self.algorithm != ALGORITHM {
            return Err(CasepackError::Config(format!(
                "unsupported algorithm '{}' (only '{}' is supported)",
                self.algorithm, ALGORITHM
            )));
        }
        Ok(())
    }

    /// Load the cipher config if one exists
    ///
    /// Returns `Ok(None)` when the file is absent. A file that exists but
    /// cannot be parsed or fails validation is an error, never a silent
    /// fallback.
    pub fn load(path: &Path) -> CasepackResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CasepackError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            CasepackError::Config(format!(
                "Malformed cipher config {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;

        Ok(Some(config))
    }

    /// Load the existing config, or fall back to the given default
    ///
    /// This is the single place where the reuse-else-default decision lives.
    /// Returns the config and whether it was reused from disk.
    pub fn load_or_init(path: &Path, default: Self) -> CasepackResult<(Self, bool)> {
        match Self::load(path)? {
            Some(existing) => Ok((existing, true)),
            None => {
                default.validate()?;
                Ok((default, false))
            }
        }
    }

    /// Save the config atomically
    pub fn save(&self, path: &Path) -> CasepackResult<()> {
        self.validate()?;
        write_json_atomic(path, self, true)
    }
}
