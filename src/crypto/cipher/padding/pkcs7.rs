use super::Padding;

/// PKCS#7 padding (RFC 5652 §6.3).
///
/// If `n - (len % n)` bytes of padding are needed, that many bytes are
/// appended, each holding that count as its value. If `len` is already a
/// multiple of `n`, a full block of padding is added — this is what makes
/// padding removal unambiguous.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pkcs7;

#[derive(Debug, thiserror::Error)]
#[error("invalid pkcs#7 padding")]
pub struct InvalidPadding;

impl Padding for Pkcs7 {
    type Err = InvalidPadding;

    fn pad(&self, mut data: Vec<u8>, n: usize) -> Vec<u8> {
        let pad_len = n - (data.len() % n);
        data.extend(std::iter::repeat(pad_len as u8).take(pad_len));
        data
    }

    fn unpad(&self, mut data: Vec<u8>, n: usize) -> Result<Vec<u8>, Self::Err> {
        let pad_len = match data.last() {
            Some(&b) if b != 0 && (b as usize) <= n && (b as usize) <= data.len() => b as usize,
            _ => return Err(InvalidPadding),
        };
        if !data[data.len() - pad_len..].iter().all(|&b| b as usize == pad_len) {
            return Err(InvalidPadding);
        }
        data.truncate(data.len() - pad_len);
        Ok(data)
    }
}
