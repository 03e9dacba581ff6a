mod sha1;
mod sha256;

pub use sha1::sha1;
pub use sha256::sha256;
