use thiserror::Error;

use sampack_types::TypeError;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("invalid archive magic: expected {expected}, got {actual}")]
    InvalidMagic { expected: String, actual: String },

    #[error("unsupported archive version: {0}")]
    UnsupportedVersion(u32),

    #[error("archive checksum mismatch")]
    ChecksumMismatch,

    #[error("CRC32 mismatch in archive payload")]
    CrcMismatch,

    #[error("archive truncated: need at least {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("sample count mismatch: header says {expected}, payload holds {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("compression failed: {0}")]
    Compression(String),

    #[error("invalid sample: {0}")]
    InvalidSample(#[from] TypeError),

    #[error("sample not found: {0}")]
    SampleNotFound(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PackResult<T> = Result<T, PackError>;
