//! The fixed-size record that precedes every embedded payload.
//!
//! Laid out exactly as the original tool wrote it, so that this crate can
//! extract payloads it embedded: two 8-byte little-endian lengths followed by
//! a 32-byte IV region of which only the first 16 bytes (AES's block size)
//! are meaningful; the remainder is zero-padded for layout compatibility.
use crate::crypto::BLOCK_BYTES;
use crate::error::{Error, Result};

pub const HEADER_BYTES: usize = 48;
const IV_REGION_BYTES: usize = 32;

pub struct Header {
    pub length_uncompressed: u64,
    pub length_encrypted: u64,
    pub iv: [u8; BLOCK_BYTES],
}

impl Header {
    pub fn new(length_uncompressed: u64, length_encrypted: u64, iv: [u8; BLOCK_BYTES]) -> Self {
        Self {
            length_uncompressed,
            length_encrypted,
            iv,
        }
    }

    pub fn encode(&self) -> [u8; HEADER_BYTES] {
        let mut out = [0u8; HEADER_BYTES];
        out[0..8].copy_from_slice(&self.length_uncompressed.to_le_bytes());
        out[8..16].copy_from_slice(&self.length_encrypted.to_le_bytes());
        out[16..16 + BLOCK_BYTES].copy_from_slice(&self.iv);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_BYTES {
            return Err(Error::InvalidHeader);
        }
        let length_uncompressed = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
        let length_encrypted = u64::from_le_bytes(bytes[8..16].try_into().unwrap());
        let mut iv = [0u8; BLOCK_BYTES];
        iv.copy_from_slice(&bytes[16..16 + BLOCK_BYTES]);
        Ok(Self {
            length_uncompressed,
            length_encrypted,
            iv,
        })
    }
}

const _: () = assert!(16 + IV_REGION_BYTES == HEADER_BYTES);
