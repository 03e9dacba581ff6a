//! SHA-1, specified by [FIPS 180-4](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf).
//!
//! Cryptographically broken for collision resistance, but still in use here
//! for one reason only: OpenSSL's `EVP_BytesToKey` defaulted to SHA-1 for
//! years, and [`super::kdf`] reproduces that derivation exactly to stay
//! compatible with ciphertext produced by the original tool.

const BLOCK_BYTES: usize = 64;

const H0: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

/// Hashes `input` and returns the 20-byte digest.
pub fn sha1(input: &[u8]) -> [u8; 20] {
    let mut h = H0;
    for block in pad(input) {
        compress(&mut h, &block);
    }
    let mut out = [0u8; 20];
    for (word, chunk) in h.iter().zip(out.chunks_mut(4)) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

fn compress(h: &mut [u32; 5], block: &[u8; BLOCK_BYTES]) {
    let mut w = [0u32; 80];
    for (i, word) in w.iter_mut().take(16).enumerate() {
        *word = u32::from_be_bytes(block[i * 4..i * 4 + 4].try_into().unwrap());
    }
    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *h;
    for (i, &wi) in w.iter().enumerate() {
        let (f, k) = match i {
            0..=19 => ((b & c) | ((!b) & d), 0x5A827999),
            20..=39 => (b ^ c ^ d, 0x6ED9EBA1),
            40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1BBCDC),
            _ => (b ^ c ^ d, 0xCA62C1D6),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(wi);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    h[0] = h[0].wrapping_add(a);
    h[1] = h[1].wrapping_add(b);
    h[2] = h[2].wrapping_add(c);
    h[3] = h[3].wrapping_add(d);
    h[4] = h[4].wrapping_add(e);
}

fn pad(input: &[u8]) -> Vec<[u8; BLOCK_BYTES]> {
    let bit_len = (input.len() as u64).wrapping_mul(8);
    let mut data = input.to_vec();
    data.push(0x80);
    while data.len() % BLOCK_BYTES != 56 {
        data.push(0);
    }
    data.extend_from_slice(&bit_len.to_be_bytes());

    data.chunks(BLOCK_BYTES)
        .map(|c| c.try_into().expect("padded to a multiple of the block size"))
        .collect()
}
