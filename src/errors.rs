// src/errors.rs

use thiserror::Error;

/// Kesalahan validasi saat menyusun token. Semua sinkron, tidak ada retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("secret must be provided to generate a token")]
    MissingSecret,

    #[error("stream id must be provided to generate a token")]
    MissingStreamId,

    #[error("start time must be a positive number of epoch seconds, or \"now\"")]
    InvalidStartTime,

    #[error("end time must be a positive number of epoch seconds")]
    InvalidEndTime,

    #[error("lifetime must be a positive number of seconds")]
    InvalidLifetime,

    #[error("either an end time or a lifetime is required")]
    MissingExpiration,

    #[error("token start time is equal to or after its expiration time")]
    StartAfterExpiration,

    #[error("token would already be expired")]
    AlreadyExpired,
}
