//! Random secret generation.
//!
//! Rejection sampling: draw a candidate of random length filled with
//! random printable bytes, keep it only if `valid_secret` accepts it.
//! A uniform printable string of length >= 6 misses one of the required
//! character classes often enough that a retry loop is needed, but it
//! terminates with probability 1 and in a handful of iterations in
//! practice.

use rand::Rng;

use super::validate::valid_secret;

/// Shortest secret the generator will emit.
const MIN_LEN: usize = 6;

/// Longest secret the generator will emit.
const MAX_LEN: usize = 15;

/// Generate a random secret that satisfies `valid_secret`.
pub fn generate_secret() -> String {
    let mut rng = rand::rng();
    loop {
        let len = rng.random_range(MIN_LEN..=MAX_LEN);
        let candidate: String = (0..len)
            .map(|_| rng.random_range(0x20u8..=0x7E) as char)
            .collect();
        if valid_secret(&candidate) {
            return candidate;
        }
    }
}
