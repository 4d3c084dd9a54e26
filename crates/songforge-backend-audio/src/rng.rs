//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the backend flows through this module. Each generator
//! draws from its own stream, derived from the song seed and a component key,
//! so adding draws to one generator never shifts another generator's output.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Stream key for melody note choice.
pub const MELODY_STREAM: &str = "melody";
/// Stream key for snare and hi-hat noise.
pub const PERCUSSION_STREAM: &str = "percussion";
/// Stream key for phoneme tokens and vibrato rates.
pub const VOCAL_STREAM: &str = "vocal";

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for a specific component from the base seed using a string key.
///
/// Hashes the base seed (little-endian) followed by the UTF-8 key with BLAKE3
/// and keeps the first four bytes.
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates an RNG for a named component of a song.
pub fn create_component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(base_seed, key))
}
