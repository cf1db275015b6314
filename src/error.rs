//! Error type shared by the key exchange, the cipher and the session layer.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Result type for all fallible operations in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by key generation, encryption and decryption.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested prime size cannot hold a prime
    #[error("invalid bit length {0}: must be at least 2")]
    InvalidBitLength(usize),

    /// The two simulated parties derived different shared secrets
    #[error("key mismatch: Diffie-Hellman parties derived different shared secrets")]
    KeyExchangeMismatch,

    /// Caller supplied an empty plaintext or ciphertext
    #[error("empty input: please enter {0}")]
    EmptyInput(&'static str),

    /// Ciphertext text is not a non-negative decimal integer
    #[error("invalid ciphertext {0:?}: expected a non-negative decimal integer")]
    InvalidCiphertext(String),

    /// Modulus or totient is zero
    #[error("invalid modulus: {0}")]
    InvalidModulus(&'static str),

    /// Exponent is not below the totient, so adjustment could never settle
    #[error("exponent out of range: must be smaller than the totient")]
    ExponentOutOfRange,

    /// No inverse of the decryption exponent exists modulo the totient
    #[error("non-invertible exponent")]
    NonInvertibleExponent,

    /// Recovered bytes are not valid UTF-8
    #[error("invalid encoding: {0}")]
    InvalidEncoding(#[from] FromUtf8Error),
}
