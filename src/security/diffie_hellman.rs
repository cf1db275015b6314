//! DISCLAIMER: This library is a toy example of Diffie-Hellman Key Exchange in pure Rust.
//! It is *EXCLUSIVELY* for demonstration and educational purposes.
//! Absolutely DO NOT use it for real cryptographic or security-sensitive operations.
//! It is not audited, not vetted, and very likely insecure in practice.
//!
//! Both parties of the exchange live in the same process. The exchange runs once,
//! checks that the two sides agree, and hands back the shared secret so it can be
//! used as the exponent of the cipher in [`crate::security::rsa`].

use log::{debug, error, info};
use num_bigint_dig::{BigUint, RandBigInt, RandPrime};
use rand::Rng;

use super::{check_bit_length, secure_rng};
use crate::error::{Error, Result};

/// DiffieHellmanParams holds the prime `p` and generator `g`.
///
/// *This is for demonstration only. DO NOT use in real systems.*
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffieHellmanParams {
    /// A probable prime modulus.
    pub p: BigUint,
    /// The generator base. Always 2 and never checked to be a primitive root of `p`.
    pub g: BigUint,
}

/// One party's key pair:
/// - `private_key`: a random integer of the same bit length as `p`.
/// - `public_key`: `g^private_key mod p`.
#[derive(Debug, Clone)]
pub struct DiffieHellmanKeyPair {
    /// The prime modulus, same as in `DiffieHellmanParams`.
    pub p: BigUint,
    /// The private exponent.
    pub private_key: BigUint,
    /// The corresponding public value.
    pub public_key: BigUint,
}

/// What remains once both simulated parties agreed on a secret.
///
/// Private exponents are not kept; only the public transcript and the secret itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedSecret {
    pub params: DiffieHellmanParams,
    pub alice_public: BigUint,
    pub bob_public: BigUint,
    value: BigUint,
}

/// Configuration for generating toy Diffie-Hellman parameters.
#[derive(Debug, Clone)]
pub struct DHParamsConfig {
    /// Bit length of the prime `p` and of both private exponents.
    pub prime_bits: usize,
    /// Optional RNG seed for reproducibility in toy examples.
    pub seed: Option<u64>,
}

impl Default for DHParamsConfig {
    fn default() -> Self {
        Self {
            prime_bits: 256,
            seed: None,
        }
    }
}

impl DiffieHellmanParams {
    /// Generate toy Diffie-Hellman parameters (prime `p` and generator `g`).
    ///
    /// # Warnings
    /// - `p` is a probable prime, not a safe prime.
    /// - `g = 2` is assumed to be a primitive root without verification.
    pub fn generate(config: &DHParamsConfig) -> Result<Self> {
        let mut rng = secure_rng(config.seed);
        Self::generate_with_rng(config.prime_bits, &mut rng)
    }

    /// Same as [`DiffieHellmanParams::generate`], drawing from a caller-owned RNG.
    pub fn generate_with_rng<R: Rng + ?Sized>(prime_bits: usize, rng: &mut R) -> Result<Self> {
        check_bit_length(prime_bits)?;
        debug!("generating {}-bit Diffie-Hellman prime", prime_bits);

        let p = rng.gen_prime(prime_bits);
        let g = BigUint::from(2_u64);

        Ok(DiffieHellmanParams { p, g })
    }

    /// Create a key pair for one party.
    ///
    /// The private exponent is uniform in `[0, 2^bits)` where `bits` is the size of `p`.
    /// Zero is not excluded.
    pub fn generate_keypair<R: Rng + ?Sized>(&self, rng: &mut R) -> DiffieHellmanKeyPair {
        let private_key = rng.gen_biguint(self.p.bits());
        let public_key = self.g.modpow(&private_key, &self.p);

        DiffieHellmanKeyPair {
            p: self.p.clone(),
            private_key,
            public_key,
        }
    }

    /// Run the exchange between two simulated parties and verify they agree.
    pub fn exchange<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SharedSecret> {
        let alice = self.generate_keypair(rng);
        let bob = self.generate_keypair(rng);

        let alice_view = alice.compute_shared_secret(&bob.public_key);
        let bob_view = bob.compute_shared_secret(&alice.public_key);
        let value = confirm_agreement(alice_view, bob_view)?;

        Ok(SharedSecret {
            params: self.clone(),
            alice_public: alice.public_key,
            bob_public: bob.public_key,
            value,
        })
    }
}

impl DiffieHellmanKeyPair {
    /// Given another party's public key `other_pub`, compute the shared secret:
    ///   `S = other_pub^a mod p`.
    ///
    /// # Warnings
    /// - No checks for malicious inputs.
    /// - No key derivation function is applied on top. It's purely the raw group element.
    pub fn compute_shared_secret(&self, other_pub: &BigUint) -> BigUint {
        other_pub.modpow(&self.private_key, &self.p)
    }
}

impl SharedSecret {
    /// Generate parameters and run the exchange in one step.
    pub fn generate(config: &DHParamsConfig) -> Result<Self> {
        let mut rng = secure_rng(config.seed);
        Self::generate_with_rng(config.prime_bits, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(prime_bits: usize, rng: &mut R) -> Result<Self> {
        let params = DiffieHellmanParams::generate_with_rng(prime_bits, rng)?;
        let secret = params.exchange(rng)?;
        info!("Diffie-Hellman shared secret established ({} bits)", prime_bits);
        Ok(secret)
    }

    /// The agreed secret `K`.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }
}

/// Generate a Diffie-Hellman shared secret of `bit_length` bits from OS entropy.
///
/// Fails with [`Error::KeyExchangeMismatch`] if the two parties disagree, so an
/// unset secret can never reach the cipher.
pub fn generate_dh_shared_secret(bit_length: usize) -> Result<BigUint> {
    let config = DHParamsConfig {
        prime_bits: bit_length,
        seed: None,
    };
    SharedSecret::generate(&config).map(SharedSecret::into_value)
}

fn confirm_agreement(alice_view: BigUint, bob_view: BigUint) -> Result<BigUint> {
    if alice_view != bob_view {
        error!("Diffie-Hellman shared secrets do not match");
        return Err(Error::KeyExchangeMismatch);
    }
    Ok(alice_view)
}
