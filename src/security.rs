pub mod codec;
pub mod diffie_hellman;
pub mod rsa;
pub mod session;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::{Error, Result};

// Re-export Diffie-Hellman functionality
pub use diffie_hellman::{
    generate_dh_shared_secret, DHParamsConfig, DiffieHellmanKeyPair, DiffieHellmanParams,
    SharedSecret,
};

// Re-export RSA functionality
pub use rsa::{
    adjust_exponent, generate_rsa_keys, mod_inverse, rsa_decrypt, rsa_encrypt, RSAKeyGenConfig,
    RSAModulus,
};

// Re-export codec functionality
pub use codec::{BigEndianCodec, MessageCodec};

// Re-export session functionality
pub use session::{
    decrypt_message, encrypt_message, parse_ciphertext, CipherSession, SessionConfig,
};

/// Build the secure random source used for every generation step.
/// A seed makes the stream reproducible; without one it is drawn from OS entropy.
pub(crate) fn secure_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_entropy(),
    }
}

/// Prime generation needs at least two bits.
pub(crate) fn check_bit_length(bits: usize) -> Result<()> {
    if bits < 2 {
        return Err(Error::InvalidBitLength(bits));
    }
    Ok(())
}
