//! Random input generation for differential runs.

use rand::Rng;

/// The 62-symbol alphabet inputs are drawn from: upper-case letters,
/// lower-case letters, digits.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Produce a string of exactly `len` characters, each drawn independently
/// and uniformly from [`ALPHABET`]. `len == 0` yields the empty string.
///
/// The random source is supplied by the caller so that a run can be
/// reproduced from a fixed seed.
pub fn random_input<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
