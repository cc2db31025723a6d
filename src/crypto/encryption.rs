//! AES-256-CBC envelope encryption
//!
//! Implements the three-part envelope format (ciphertext, iv, salt, all
//! base64) shared with the browser-side decryptor. Salt and IV are generated
//! fresh from the OS CSPRNG on every call; reusing either across two
//! encryptions under the same password would break the scheme's semantic
//! security guarantee.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::canonicalize;
use crate::config::CipherConfig;
use crate::error::{CasepackError, CasepackResult};

use super::key_derivation::{derive_key, generate_salt, SALT_SIZE};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Cipher block size and IV length in bytes
const BLOCK_SIZE: usize = 16;

/// The three-part encrypted artifact
///
/// Exactly these three fields, each a base64 string; this is the on-disk and
/// over-the-wire shape the viewer fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// AES-256-CBC ciphertext (base64)
    pub ciphertext: String,
    /// 16-byte initialization vector (base64)
    pub iv: String,
    /// 16-byte KDF salt (base64)
    pub salt: String,
}

/// Canonicalize and encrypt a JSON structure
pub fn encrypt_value(
    value: &Value,
    password: &str,
    config: &CipherConfig,
) -> CasepackResult<Envelope> {
    let canonical = canonicalize(value)?;
    let json = serde_json::to_string(&canonical)?;
    encrypt_bytes(json.as_bytes(), password, config)
}

/// Encrypt raw plaintext bytes into an envelope
pub fn encrypt_bytes(
    plaintext: &[u8],
    password: &str,
    config: &CipherConfig,
) -> CasepackResult<Envelope> {
    config.validate()?;

    // Fresh salt and IV per call, independently random
    let salt = generate_salt();
    let mut iv = [0u8; BLOCK_SIZE];
    OsRng.fill_bytes(&mut iv);

    let key = derive_key(password, &salt, config.iterations);

    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok(Envelope {
        ciphertext: STANDARD.encode(ciphertext),
        iv: STANDARD.encode(iv),
        salt: STANDARD.encode(salt),
    })
}

/// Decrypt an envelope back into a JSON value
///
/// Exists for verification and tests; the consuming viewer performs the same
/// steps in the browser.
pub fn decrypt_value(
    envelope: &Envelope,
    password: &str,
    config: &CipherConfig,
) -> CasepackResult<Value> {
    let plaintext = decrypt_bytes(envelope, password, config)?;
    let text = String::from_utf8(plaintext)
        .map_err(|_| CasepackError::Crypto("decrypted data is not valid UTF-8".to_string()))?;
    serde_json::from_str(&text)
        .map_err(|e| CasepackError::Crypto(format!("decrypted data is not valid JSON: {}", e)))
}

/// Decrypt an envelope into raw plaintext bytes
pub fn decrypt_bytes(
    envelope: &Envelope,
    password: &str,
    config: &CipherConfig,
) -> CasepackResult<Vec<u8>> {
    config.validate()?;

    let ciphertext = decode_field(&envelope.ciphertext, "ciphertext")?;
    let iv = decode_field(&envelope.iv, "iv")?;
    let salt = decode_field(&envelope.salt, "salt")?;

    if iv.len() != BLOCK_SIZE {
        return Err(CasepackError::Crypto(format!(
            "invalid iv length: expected {}, got {}",
            BLOCK_SIZE,
            iv.len()
        )));
    }
    if salt.len() != SALT_SIZE {
        return Err(CasepackError::Crypto(format!(
            "invalid salt length: expected {}, got {}",
            SALT_SIZE,
            salt.len()
        )));
    }
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CasepackError::Crypto(format!(
            "ciphertext length {} is not a positive multiple of the block size",
            ciphertext.len()
        )));
    }

    let key = derive_key(password, &salt, config.iterations);

    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), &iv)
        .map_err(|e| CasepackError::Crypto(format!("cipher init failed: {}", e)))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| {
            CasepackError::Crypto(
                "invalid padding: wrong password or corrupted ciphertext".to_string(),
            )
        })
}

fn decode_field(encoded: &str, name: &str) -> CasepackResult<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| CasepackError::Crypto(format!("invalid {} encoding: {}", name, e)))
}
