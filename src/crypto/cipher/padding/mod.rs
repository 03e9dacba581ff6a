mod pkcs7;

pub use pkcs7::Pkcs7;

/// A scheme to pad messages to a multiple of some block size.
///
/// [Block ciphers](super::aes) expect input a multiple of the block size, but
/// messages rarely are, so a padding scheme extends the data to fit.
///
/// Exposing *why* unpadding failed is dangerous — it turns a decryption
/// oracle into a padding oracle. Callers of [`Padding::unpad`] should collapse
/// any error into a single "decryption failed" outcome, never distinguishing
/// "ciphertext corrupt" from "padding invalid".
pub trait Padding {
    type Err;

    /// Pad `data` to a multiple of `n` bytes.
    fn pad(&self, data: Vec<u8>, n: usize) -> Vec<u8>;

    /// Remove the padding added by [`pad`](Padding::pad). Returns an error if
    /// the padding is not well-formed.
    fn unpad(&self, data: Vec<u8>, n: usize) -> Result<Vec<u8>, Self::Err>;
}
