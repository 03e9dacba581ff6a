use thiserror::Error;

/// Everything that can go wrong in an embed or extract call.
///
/// `InvalidHeader`, `DecryptFailed`, and `DecompressFailed` are deliberately
/// indistinguishable from the CLI's point of view (see `main.rs`) so that a
/// wrong password does not disclose which stage failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no image loaded")]
    NoImage,

    #[error("payload is empty")]
    EmptyPayload,

    #[error("image does not have enough capacity for this payload")]
    CapacityExhausted,

    #[error("header is not consistent with this image (likely wrong password)")]
    InvalidHeader,

    #[error("decryption failed")]
    DecryptFailed,

    #[error("decompression failed")]
    DecompressFailed,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
