use super::{
    aes::{self, Block, BLOCK_BYTES},
    padding::{Padding, Pkcs7},
};

/// AES-256 in CBC mode with PKCS#7 padding.
///
/// The reference implementation fed the cipher in 2048-byte chunks through
/// OpenSSL's streaming `EVP_EncryptUpdate`/`EVP_DecryptUpdate`. CBC chains
/// strictly block-to-block regardless of how the caller batches its calls, so
/// operating on the whole buffer at once produces byte-identical ciphertext.
pub fn encrypt(plaintext: &[u8], key: aes::Key, iv: [u8; BLOCK_BYTES]) -> Vec<u8> {
    let padded = Pkcs7.pad(plaintext.to_vec(), BLOCK_BYTES);
    let mut out = Vec::with_capacity(padded.len());
    let mut prev = iv;
    for chunk in padded.chunks(BLOCK_BYTES) {
        let mut block: Block = chunk.try_into().expect("padded to a multiple of the block size");
        xor_in_place(&mut block, &prev);
        let ciphertext = aes::encrypt(block, key);
        out.extend_from_slice(&ciphertext);
        prev = ciphertext;
    }
    out
}

/// Decrypts a CBC ciphertext produced by [`encrypt`]. Fails if the ciphertext
/// is not a multiple of the block size, or if the recovered padding is
/// invalid — both are reported identically so as not to leak a padding
/// oracle.
pub fn decrypt(ciphertext: &[u8], key: aes::Key, iv: [u8; BLOCK_BYTES]) -> Option<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_BYTES != 0 {
        return None;
    }
    let mut out = Vec::with_capacity(ciphertext.len());
    let mut prev = iv;
    for chunk in ciphertext.chunks(BLOCK_BYTES) {
        let block: Block = chunk.try_into().expect("checked multiple of block size above");
        let mut plain = aes::decrypt(block, key);
        xor_in_place(&mut plain, &prev);
        out.extend_from_slice(&plain);
        prev = block;
    }
    Pkcs7.unpad(out, BLOCK_BYTES).ok()
}

fn xor_in_place(block: &mut Block, other: &Block) {
    block.iter_mut().zip(other).for_each(|(a, b)| *a ^= b);
}
