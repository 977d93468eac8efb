//! Miller-Rabin probable-prime test.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;

/// Default number of random Miller-Rabin rounds for values wider than 64 bits.
/// Each round at least quarters the false-positive probability.
pub const DEFAULT_ROUNDS: u32 = 20;

/// Screening primes, also the deterministic witness set: testing against the
/// first twelve primes is exact for every n < 3.18 * 10^23, which covers all
/// 64-bit inputs.
const SMALL_PRIMES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Is `n` a probable prime?
///
/// Inputs that fit in 64 bits get a deterministic answer. Wider inputs run
/// `rounds` Miller-Rabin rounds with random witnesses (at least one round),
/// so a composite slips through with probability at most `4^-rounds`.
pub fn is_probable_prime(n: &BigUint, rounds: u32) -> bool {
    if let Some(small) = n.to_u64() {
        if small < 2 {
            return false;
        }
        for &p in &SMALL_PRIMES {
            let p = p as u64;
            if small == p {
                return true;
            }
            if small % p == 0 {
                return false;
            }
        }
    } else {
        for &p in &SMALL_PRIMES {
            if (n % p).is_zero() {
                return false;
            }
        }
    }

    let one = BigUint::one();
    let n_minus_1 = n - &one;
    // Write n-1 as 2^r * d with d odd
    let r = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> r;

    if n.bits() <= 64 {
        return SMALL_PRIMES
            .iter()
            .all(|&a| passes_round(&BigUint::from(a), &d, r, n, &n_minus_1));
    }

    let mut rng = rand::thread_rng();
    (0..rounds.max(1)).all(|_| {
        let a = random_witness(n, &mut rng);
        passes_round(&a, &d, r, n, &n_minus_1)
    })
}

/// One Miller-Rabin round for witness `a`, where `n - 1 = 2^r * d`.
fn passes_round(a: &BigUint, d: &BigUint, r: u64, n: &BigUint, n_minus_1: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    let mut x = a.modpow(d, n);
    if x.is_one() || x == *n_minus_1 {
        return true;
    }
    for _ in 1..r {
        x = x.modpow(&two, n);
        if x == *n_minus_1 {
            return true;
        }
        if x.is_one() {
            return false;
        }
    }
    false
}

/// Random witness in `[2, n-2]`, by rejection over byte-filled candidates.
fn random_witness<R: Rng + ?Sized>(n: &BigUint, rng: &mut R) -> BigUint {
    let two = BigUint::from(2u32);
    let upper = n - &two;
    let num_bytes = n.to_bytes_be().len();
    let top_mask = {
        let lead_bits = n.bits() - (num_bytes as u64 - 1) * 8;
        if lead_bits >= 8 {
            0xFF
        } else {
            (1u8 << lead_bits) - 1
        }
    };
    loop {
        let mut bytes = vec![0u8; num_bytes];
        rng.fill(&mut bytes[..]);
        bytes[0] &= top_mask;
        let a = BigUint::from_bytes_be(&bytes);
        if a >= two && a <= upper {
            return a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prime(n: u64) -> bool {
        is_probable_prime(&BigUint::from(n), DEFAULT_ROUNDS)
    }

    #[test]
    fn test_small_primes() {
        for p in [2u64, 3, 5, 7, 11, 97, 104_729] {
            assert!(prime(p), "{} should be prime", p);
        }
    }

    #[test]
    fn test_small_composites() {
        for c in [0u64, 1, 4, 6, 9, 100, 561, 8051] {
            assert!(!prime(c), "{} should be composite", c);
        }
    }

    #[test]
    fn test_matches_trial_division_below_10k() {
        fn trial(n: u64) -> bool {
            n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
        }
        for n in 0..10_000u64 {
            assert_eq!(prime(n), trial(n), "disagreement at {}", n);
        }
    }

    #[test]
    fn test_strong_pseudoprimes_rejected() {
        // Strong pseudoprimes to several small bases.
        for c in [2_047u64, 3_215_031_751, 3_825_123_056_546_413_051] {
            assert!(!prime(c), "{} is composite", c);
        }
    }

    #[test]
    fn test_64_bit_boundary() {
        // Largest 64-bit prime and its composite neighbour.
        assert!(prime(18_446_744_073_709_551_557));
        assert!(!prime(u64::MAX));
    }

    #[test]
    fn test_wide_values() {
        // 2^89 - 1 is a Mersenne prime; 2^89 + 1 is divisible by 3.
        let m89 = (BigUint::one() << 89u32) - BigUint::one();
        assert!(is_probable_prime(&m89, DEFAULT_ROUNDS));
        let p89 = (BigUint::one() << 89u32) + BigUint::one();
        assert!(!is_probable_prime(&p89, DEFAULT_ROUNDS));
    }

    #[test]
    fn test_wide_composite_without_small_factors() {
        // ~80-bit product of primes that all escape small-prime screening.
        let c = BigUint::from(1_000_000_007u64)
            * BigUint::from(1_000_000_009u64)
            * BigUint::from(1_000_003u64);
        assert!(c.bits() > 64);
        assert!(!is_probable_prime(&c, DEFAULT_ROUNDS));
    }
}
