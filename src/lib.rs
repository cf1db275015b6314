pub mod error;
pub mod security;

pub use error::{Error, Result};
pub use security::{
    decrypt_message, encrypt_message, generate_dh_shared_secret, generate_rsa_keys, CipherSession,
    SessionConfig,
};
