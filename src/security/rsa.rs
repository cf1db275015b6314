//! DISCLAIMER: This library is a toy example of RSA implemented in pure Rust.
//! It is *EXCLUSIVELY* for demonstration and educational purposes.
//! Absolutely DO NOT use it for real cryptographic or security-sensitive operations.
//! It is not audited, not vetted, and very likely insecure in practice.
//!
//! Unlike textbook RSA there is no fixed public exponent here. Both directions are
//! driven by an externally supplied exponent, normally the Diffie-Hellman shared
//! secret. Decryption adjusts that exponent until it is invertible modulo `phi`,
//! see [`adjust_exponent`].
//!
//! # Hazards
//! - Messages must satisfy `0 <= m < n`. Larger values are reduced modulo `n` and
//!   cannot be recovered. This is not checked.
//! - Encryption uses the exponent as given while decryption uses the adjusted one.
//!   When the raw exponent is not coprime to `phi` the two no longer match and the
//!   round trip silently fails.

use log::{debug, warn};
use num_bigint_dig::{BigInt, BigUint, RandPrime, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use super::{check_bit_length, secure_rng};
use crate::error::{Error, Result};

/// Modulus `n = p * q` together with its totient `phi = (p - 1)(q - 1)`.
/// DO NOT use this for real cryptographic operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAModulus {
    pub p: BigUint,
    pub q: BigUint,
    pub n: BigUint,
    pub phi: BigUint,
}

/// Configuration for modulus generation (toy parameters).
#[derive(Debug, Clone)]
pub struct RSAKeyGenConfig {
    /// Bit length of each prime factor.
    pub prime_bits: usize,
    /// Optional RNG seed for reproducibility in toy examples.
    pub seed: Option<u64>,
}

impl Default for RSAKeyGenConfig {
    fn default() -> Self {
        Self {
            prime_bits: 256,
            seed: None,
        }
    }
}

impl RSAModulus {
    /// Generate a modulus from two fresh probable primes.
    ///
    /// # Warnings
    /// `p != q` is not enforced. A collision is only logged.
    pub fn generate(config: &RSAKeyGenConfig) -> Result<Self> {
        let mut rng = secure_rng(config.seed);
        Self::generate_with_rng(config.prime_bits, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(prime_bits: usize, rng: &mut R) -> Result<Self> {
        check_bit_length(prime_bits)?;
        debug!("generating RSA modulus from two {}-bit primes", prime_bits);

        let p = rng.gen_prime(prime_bits);
        let q = rng.gen_prime(prime_bits);
        if p == q {
            warn!("RSA prime factors collided; totient will be wrong");
        }

        Self::from_primes(p, q)
    }

    /// Build a modulus from known primes. Primality is the caller's concern.
    pub fn from_primes(p: BigUint, q: BigUint) -> Result<Self> {
        let two = BigUint::from(2_u64);
        if p < two || q < two {
            return Err(Error::InvalidModulus("prime factors must be at least 2"));
        }

        let n = &p * &q;
        let phi = (&p - BigUint::one()) * (&q - BigUint::one());
        Ok(RSAModulus { p, q, n, phi })
    }

    pub fn encrypt(&self, message: &BigUint, exponent: &BigUint) -> Result<BigUint> {
        rsa_encrypt(message, exponent, &self.n)
    }

    pub fn decrypt(&self, ciphertext: &BigUint, exponent: &BigUint) -> Result<BigUint> {
        rsa_decrypt(ciphertext, exponent, &self.phi, &self.n)
    }
}

/// Generate a fresh modulus from OS entropy and return `(n, phi)`.
pub fn generate_rsa_keys(bit_length: usize) -> Result<(BigUint, BigUint)> {
    let config = RSAKeyGenConfig {
        prime_bits: bit_length,
        seed: None,
    };
    let modulus = RSAModulus::generate(&config)?;
    Ok((modulus.n, modulus.phi))
}

/// ciphertext = (message^exponent) mod n
///
/// The caller must keep `message < n`.
pub fn rsa_encrypt(message: &BigUint, exponent: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(Error::InvalidModulus("modulus is zero"));
    }
    if message >= n {
        warn!("message does not fit the modulus and will not decrypt");
    }
    Ok(message.modpow(exponent, n))
}

/// plaintext = (ciphertext^d) mod n, where `d` is the inverse of the adjusted
/// exponent modulo `phi`.
///
/// The adjustment is local to this call and never written back.
pub fn rsa_decrypt(
    ciphertext: &BigUint,
    exponent: &BigUint,
    phi: &BigUint,
    n: &BigUint,
) -> Result<BigUint> {
    if n.is_zero() {
        return Err(Error::InvalidModulus("modulus is zero"));
    }

    let adjusted = adjust_exponent(exponent, phi)?;
    if &adjusted != exponent {
        warn!("decryption exponent was adjusted to be invertible modulo phi");
    }

    let d = mod_inverse(&adjusted, phi).ok_or(Error::NonInvertibleExponent)?;
    Ok(ciphertext.modpow(&d, n))
}

/// Increment `exponent` until it is below `phi` and coprime to it.
///
/// Only values already below `phi` can settle, since the search only moves upward;
/// anything else is [`Error::ExponentOutOfRange`]. The result satisfies its own
/// guard, so applying this twice changes nothing.
pub fn adjust_exponent(exponent: &BigUint, phi: &BigUint) -> Result<BigUint> {
    if phi.is_zero() {
        return Err(Error::InvalidModulus("totient is zero"));
    }
    if exponent >= phi {
        return Err(Error::ExponentOutOfRange);
    }

    let mut e = exponent.clone();
    while &e >= phi || !e.gcd(phi).is_one() {
        e += BigUint::one();
    }
    Ok(e)
}

/// Finds the modular inverse of `a` modulo `m` using the Extended Euclidean Algorithm.
/// Returns `Some(x)` where x satisfies (a*x) mod m = 1, or `None` if no inverse exists.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let a_int = BigInt::from_biguint(Sign::Plus, a.clone());
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    let (g, x, _) = extended_gcd(&a_int, &m_int);
    if !g.is_one() {
        return None;
    }

    // Make sure we return a positive value in [0, m-1]
    let mut result = x % &m_int;
    if result.sign() == Sign::Minus {
        result += &m_int;
    }
    result.to_biguint()
}

/// Extended Euclidean Algorithm in BigInts.
/// Returns (gcd(a, b), x, y) such that a*x + b*y = gcd(a,b).
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        (a.clone(), BigInt::one(), BigInt::zero())
    } else {
        let (q, r) = a.div_rem(b);
        let (g, x, y) = extended_gcd(b, &r);
        (g, y.clone(), x - &q * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn textbook() -> RSAModulus {
        RSAModulus::from_primes(BigUint::from(61_u64), BigUint::from(53_u64)).unwrap()
    }

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_from_primes() {
        let modulus = textbook();
        assert_eq!(modulus.n, big(3233));
        assert_eq!(modulus.phi, big(3120));
    }

    #[test]
    fn test_textbook_vector() {
        let modulus = textbook();
        let enc = modulus.encrypt(&big(65), &big(17)).unwrap();
        assert_eq!(enc, big(2790));
        assert_eq!(modulus.decrypt(&enc, &big(17)).unwrap(), big(65));
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(&big(17), &big(3120)), Some(big(2753)));
        assert_eq!(mod_inverse(&big(7), &big(3120)), Some(big(1783)));
        assert_eq!(mod_inverse(&big(6), &big(3120)), None);
        assert_eq!(mod_inverse(&big(3), &big(0)), None);
    }

    #[test]
    fn test_adjust_exponent() {
        let phi = big(3120);
        assert_eq!(adjust_exponent(&big(17), &phi).unwrap(), big(17));
        assert_eq!(adjust_exponent(&big(16), &phi).unwrap(), big(17));
        assert_eq!(adjust_exponent(&big(6), &phi).unwrap(), big(7));
        assert_eq!(adjust_exponent(&big(0), &phi).unwrap(), big(1));
        assert_eq!(adjust_exponent(&big(3119), &phi).unwrap(), big(3119));
    }

    #[test]
    fn test_adjust_exponent_rejects_out_of_range() {
        let phi = big(3120);
        assert_eq!(adjust_exponent(&phi, &phi), Err(Error::ExponentOutOfRange));
        assert_eq!(
            adjust_exponent(&big(5000), &phi),
            Err(Error::ExponentOutOfRange)
        );
        assert_eq!(
            adjust_exponent(&big(5), &big(0)),
            Err(Error::InvalidModulus("totient is zero"))
        );
    }

    #[test]
    fn test_decrypt_uses_adjusted_exponent() {
        // 16 adjusts to 17, so encrypting with 17 and decrypting with 16 recovers the message.
        let modulus = textbook();
        let enc = modulus.encrypt(&big(65), &big(17)).unwrap();
        assert_eq!(modulus.decrypt(&enc, &big(16)).unwrap(), big(65));
    }

    #[test]
    fn test_raw_exponent_not_coprime_breaks_round_trip() {
        let modulus =
            RSAModulus::from_primes(BigUint::from(1_000_003_u64), BigUint::from(1_000_033_u64))
                .unwrap();
        let message = big(448_378_203_247);
        let raw = big(65536);

        let enc = modulus.encrypt(&message, &raw).unwrap();
        assert_eq!(enc, big(185_151_064_516));
        assert_eq!(modulus.decrypt(&enc, &raw).unwrap(), big(651_173_120_424));
    }

    #[test]
    fn test_message_not_below_modulus_does_not_round_trip() {
        let modulus = textbook();
        let message = big(3233 + 65);
        let enc = modulus.encrypt(&message, &big(17)).unwrap();
        let dec = modulus.decrypt(&enc, &big(17)).unwrap();
        assert_eq!(dec, big(65));
        assert_ne!(dec, message);
    }

    #[test]
    fn test_zero_modulus() {
        assert_eq!(
            rsa_encrypt(&big(1), &big(3), &big(0)),
            Err(Error::InvalidModulus("modulus is zero"))
        );
        assert_eq!(
            rsa_decrypt(&big(1), &big(3), &big(3120), &big(0)),
            Err(Error::InvalidModulus("modulus is zero"))
        );
    }

    #[test]
    fn test_generated_modulus() {
        let config = RSAKeyGenConfig {
            prime_bits: 64,
            seed: Some(42),
        };
        let modulus = RSAModulus::generate(&config).unwrap();

        assert_eq!(modulus.p.bits(), 64);
        assert_eq!(modulus.q.bits(), 64);
        assert_eq!(modulus.n, &modulus.p * &modulus.q);
        assert_eq!(
            modulus.phi,
            (&modulus.p - BigUint::one()) * (&modulus.q - BigUint::one())
        );
        assert_eq!(RSAModulus::generate(&config).unwrap(), modulus);
    }

    #[test]
    fn test_generate_rsa_keys() {
        let (n, phi) = generate_rsa_keys(32).unwrap();
        assert!(phi < n);
        assert_eq!(generate_rsa_keys(1), Err(Error::InvalidBitLength(1)));
    }

    #[test]
    fn test_round_trip_with_generated_modulus() {
        let modulus = RSAModulus::generate(&RSAKeyGenConfig {
            prime_bits: 128,
            seed: Some(9),
        })
        .unwrap();
        let exponent = adjust_exponent(&big(65536), &modulus.phi).unwrap();
        let message = big(0xdead_beef);

        let enc = modulus.encrypt(&message, &exponent).unwrap();
        assert_eq!(modulus.decrypt(&enc, &big(65536)).unwrap(), message);
    }

    proptest! {
        #[test]
        fn adjust_exponent_is_idempotent(phi in 2u64..100_000, seed in any::<u64>()) {
            let phi = big(phi);
            let exponent = big(seed) % &phi;
            let once = adjust_exponent(&exponent, &phi).unwrap();
            let twice = adjust_exponent(&once, &phi).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once >= exponent);
            prop_assert!(once < phi);
            prop_assert!(once.gcd(&phi).is_one());
        }

        #[test]
        fn adjusted_exponent_is_invertible(phi in 2u64..100_000, seed in any::<u64>()) {
            let phi = big(phi);
            let exponent = adjust_exponent(&(big(seed) % &phi), &phi).unwrap();
            let d = mod_inverse(&exponent, &phi).unwrap();
            prop_assert!(((&exponent * &d) % &phi).is_one());
        }
    }
}
