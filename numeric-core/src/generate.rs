//! Random corpus values.
//!
//! Each value is drawn by picking a bit length uniformly in `[0, MAX_BITS]`
//! and then drawing that many random bits; zero candidates are rejected and
//! the whole draw (bit length included) is repeated. The result is roughly
//! uniform over realized bit lengths, not over `[1, 2^64 - 1]`, so short
//! values are heavily over-represented. Statistics computed over generated
//! corpora depend on this.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Largest bit length a generated value may have.
pub const MAX_BITS: u32 = 64;

/// Values generated per rng stream in [`par_generate_corpus`].
const CHUNK_LEN: usize = 4096;

/// Uniform random integer in `[0, 2^bits)`.
pub fn random_bits<R: Rng + ?Sized>(bits: u32, rng: &mut R) -> BigUint {
    if bits == 0 {
        return BigUint::zero();
    }
    let num_bytes = (bits as usize + 7) / 8;
    let mut bytes = vec![0u8; num_bytes];
    rng.fill(&mut bytes[..]);

    // Clear the high bits of the leading byte that exceed `bits`.
    let excess_bits = (num_bytes * 8) as u32 - bits;
    if excess_bits > 0 {
        bytes[0] &= (1u8 << (8 - excess_bits)) - 1;
    }

    BigUint::from_bytes_be(&bytes)
}

/// Draw one non-zero value of at most [`MAX_BITS`] bits.
pub fn generate_value<R: Rng + ?Sized>(rng: &mut R) -> BigUint {
    loop {
        let bits = rng.gen_range(0..=MAX_BITS);
        let candidate = random_bits(bits, rng);
        if !candidate.is_zero() {
            return candidate;
        }
    }
}

/// Generate `len` values sequentially from `rng`.
pub fn generate_corpus<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<BigUint> {
    (0..len).map(|_| generate_value(rng)).collect()
}

/// Generate `len` values in parallel.
///
/// The corpus is split into fixed-size chunks, each with its own `StdRng`
/// derived from `seed` and the chunk index, so the output is a function of
/// `(len, seed)` alone and does not change with the size of the thread pool.
pub fn par_generate_corpus(len: usize, seed: u64) -> Vec<BigUint> {
    let chunks = (len + CHUNK_LEN - 1) / CHUNK_LEN;
    (0..chunks)
        .into_par_iter()
        .flat_map_iter(|chunk| {
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, chunk as u64));
            let start = chunk * CHUNK_LEN;
            let take = CHUNK_LEN.min(len - start);
            (0..take).map(move |_| generate_value(&mut rng))
        })
        .collect()
}

/// splitmix64 step, decorrelates the per-chunk streams.
fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    let mut z = seed.wrapping_add(chunk.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
