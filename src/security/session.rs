//! An owned session combining one Diffie-Hellman shared secret with one RSA modulus.
//!
//! Each session carries its own `(n, phi, K)`; nothing is shared between sessions,
//! so independent sessions can live on different threads. The free functions
//! [`encrypt_message`] and [`decrypt_message`] expose the same operations for
//! callers that manage the key material themselves.
//!
//! *This is for demonstration only. DO NOT use in real systems.*

use log::debug;
use num_bigint_dig::BigUint;

use super::codec::{BigEndianCodec, MessageCodec};
use super::diffie_hellman::SharedSecret;
use super::rsa::{rsa_decrypt, rsa_encrypt, RSAModulus};
use super::secure_rng;
use crate::error::{Error, Result};

/// Configuration for a full session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Bit length of the Diffie-Hellman prime and private exponents.
    pub dh_prime_bits: usize,
    /// Bit length of each RSA prime factor.
    pub rsa_prime_bits: usize,
    /// Optional RNG seed for reproducibility in toy examples.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dh_prime_bits: 256,
            rsa_prime_bits: 256,
            seed: None,
        }
    }
}

/// Key material for one conversation: the shared secret `K` and the modulus.
#[derive(Debug, Clone)]
pub struct CipherSession<C = BigEndianCodec> {
    secret: BigUint,
    modulus: RSAModulus,
    codec: C,
}

impl CipherSession<BigEndianCodec> {
    /// Run the key exchange, then generate the modulus, both from one RNG stream.
    pub fn initialize(config: &SessionConfig) -> Result<Self> {
        let mut rng = secure_rng(config.seed);
        let secret = SharedSecret::generate_with_rng(config.dh_prime_bits, &mut rng)?;
        let modulus = RSAModulus::generate_with_rng(config.rsa_prime_bits, &mut rng)?;

        Ok(Self::from_parts(secret.into_value(), modulus, BigEndianCodec))
    }
}

impl<C: MessageCodec> CipherSession<C> {
    pub fn from_parts(secret: BigUint, modulus: RSAModulus, codec: C) -> Self {
        CipherSession {
            secret,
            modulus,
            codec,
        }
    }

    pub fn shared_secret(&self) -> &BigUint {
        &self.secret
    }

    pub fn modulus(&self) -> &RSAModulus {
        &self.modulus
    }

    /// Encrypt `message` with the raw shared secret.
    pub fn encrypt(&self, message: &str) -> Result<BigUint> {
        encrypt_with(&self.codec, message, &self.secret, &self.modulus.n)
    }

    /// Decrypt `ciphertext`, adjusting a copy of the shared secret as needed.
    pub fn decrypt(&self, ciphertext: &BigUint) -> Result<String> {
        decrypt_with(
            &self.codec,
            ciphertext,
            &self.secret,
            &self.modulus.phi,
            &self.modulus.n,
        )
    }

    /// Decrypt a ciphertext given as decimal text.
    pub fn decrypt_text(&self, ciphertext: &str) -> Result<String> {
        let ciphertext = parse_ciphertext(ciphertext)?;
        self.decrypt(&ciphertext)
    }
}

/// Encrypt a non-empty text message: `encode(message)^exponent mod n`.
///
/// The encoded message must be below `n`; this is not checked.
pub fn encrypt_message(message: &str, exponent: &BigUint, n: &BigUint) -> Result<BigUint> {
    encrypt_with(&BigEndianCodec, message, exponent, n)
}

/// Decrypt `ciphertext` and decode the result as UTF-8 text.
pub fn decrypt_message(
    ciphertext: &BigUint,
    exponent: &BigUint,
    phi: &BigUint,
    n: &BigUint,
) -> Result<String> {
    decrypt_with(&BigEndianCodec, ciphertext, exponent, phi, n)
}

/// Parse a ciphertext entered as a non-negative decimal integer.
pub fn parse_ciphertext(text: &str) -> Result<BigUint> {
    if text.is_empty() {
        return Err(Error::EmptyInput("ciphertext"));
    }
    text.parse::<BigUint>()
        .map_err(|_| Error::InvalidCiphertext(text.to_string()))
}

fn encrypt_with<C: MessageCodec + ?Sized>(
    codec: &C,
    message: &str,
    exponent: &BigUint,
    n: &BigUint,
) -> Result<BigUint> {
    if message.is_empty() {
        return Err(Error::EmptyInput("plaintext"));
    }
    debug!("encrypting {}-byte message", message.len());
    rsa_encrypt(&codec.encode_text(message), exponent, n)
}

fn decrypt_with<C: MessageCodec + ?Sized>(
    codec: &C,
    ciphertext: &BigUint,
    exponent: &BigUint,
    phi: &BigUint,
    n: &BigUint,
) -> Result<String> {
    debug!("decrypting {}-bit ciphertext", ciphertext.bits());
    let plaintext = rsa_decrypt(ciphertext, exponent, phi, n)?;
    codec.decode_text(&plaintext)
}
