//! OpenSSL's legacy `EVP_BytesToKey` key derivation.
//!
//! The reference tool derives its AES-256-CBC key and IV straight from the
//! password with `EVP_BytesToKey(EVP_aes_256_cbc(), EVP_sha1(), NULL,
//! password, password_len, 5, key, iv)` — no salt, SHA-1, five iterations.
//! This is not a modern password KDF (no per-message salt, a fast hash,
//! iteration count far below anything recommended today), but ciphertext
//! produced by the original tool only decrypts correctly if this exact
//! derivation is reproduced.
use super::hash::sha1;

const KEY_BYTES: usize = 32;
const IV_BYTES: usize = 16;

/// Derives a 32-byte AES-256 key and 16-byte CBC IV from `password`.
pub fn evp_bytes_to_key(password: &[u8]) -> ([u8; KEY_BYTES], [u8; IV_BYTES]) {
    let mut material = Vec::with_capacity(KEY_BYTES + IV_BYTES);
    let mut prev: Vec<u8> = Vec::new();

    while material.len() < KEY_BYTES + IV_BYTES {
        let mut block = prev.clone();
        block.extend_from_slice(password);

        let mut digest = sha1(&block).to_vec();
        for _ in 1..5 {
            digest = sha1(&digest).to_vec();
        }

        material.extend_from_slice(&digest);
        prev = digest;
    }

    let mut key = [0u8; KEY_BYTES];
    let mut iv = [0u8; IV_BYTES];
    key.copy_from_slice(&material[..KEY_BYTES]);
    iv.copy_from_slice(&material[KEY_BYTES..KEY_BYTES + IV_BYTES]);
    (key, iv)
}
