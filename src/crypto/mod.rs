pub mod cipher;
pub mod hash;
pub mod kdf;

pub use cipher::{cbc_decrypt, cbc_encrypt, AesKey, BLOCK_BYTES};
pub use hash::sha256;
pub use kdf::evp_bytes_to_key;
