pub mod aes;
mod cbc;
mod padding;

pub use aes::{Block, Key as AesKey, BLOCK_BYTES};
pub use cbc::{decrypt as cbc_decrypt, encrypt as cbc_encrypt};
