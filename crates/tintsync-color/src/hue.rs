//! Deterministic base hue from a workspace identity.
//!
//! Every workspace gets a hue angle derived from its identifier and a
//! user-chosen seed. The mapping is a compatibility contract: changing it
//! re-tints every existing workspace, so the algorithm is pinned and
//! versioned by [`HUE_HASH_VERSION`].
//!
//! # Algorithm (version 1)
//!
//! 1. Input bytes are the UTF-8 identifier when `seed == 0`, otherwise the
//!    UTF-8 bytes of `"{identifier}:{seed}"` with the seed in decimal.
//! 2. Hash the bytes with 32-bit FNV-1a.
//! 3. `hue = hash % 360`.
//!
//! ```rust
//! use tintsync_color::hue;
//!
//! let h = hue("/home/me/project", 0);
//! assert!((0.0..360.0).contains(&h));
//! assert_eq!(h, hue("/home/me/project", 0));
//! ```

/// Version of the identifier → hue mapping.
pub const HUE_HASH_VERSION: u32 = 1;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Returns the base hue in `[0, 360)` for `identifier` and `seed`.
pub fn hue(identifier: &str, seed: i32) -> f64 {
    f64::from(identity_hash(identifier, seed) % 360)
}

/// The raw 32-bit hash behind [`hue`].
pub fn identity_hash(identifier: &str, seed: i32) -> u32 {
    let mut hasher = Fnv1a::new();
    hasher.write(identifier.as_bytes());
    if seed != 0 {
        hasher.write(b":");
        hasher.write(seed.to_string().as_bytes());
    }
    hasher.finish()
}

/// Streaming 32-bit FNV-1a.
struct Fnv1a(u32);

impl Fnv1a {
    fn new() -> Self {
        Self(FNV_OFFSET_BASIS)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u32::from(byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn finish(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_hashes_to_offset_basis() {
        assert_eq!(identity_hash("", 0), FNV_OFFSET_BASIS);
        assert_eq!(hue("", 0), f64::from(FNV_OFFSET_BASIS % 360));
    }

    #[test]
    fn known_fnv1a_vectors() {
        // Reference values for 32-bit FNV-1a.
        assert_eq!(identity_hash("a", 0), 0xe40c_292c);
        assert_eq!(identity_hash("foobar", 0), 0xbf9c_f968);
    }

    #[test]
    fn seed_is_appended_in_decimal() {
        assert_eq!(identity_hash("ws", 7), identity_hash("ws:7", 0));
        assert_eq!(identity_hash("ws", -100), identity_hash("ws:-100", 0));
    }

    #[test]
    fn hue_is_deterministic() {
        assert_eq!(hue("project", 3), hue("project", 3));
    }

    #[test]
    fn hue_range_for_extreme_seeds() {
        for seed in [-100, 999_999_999, i32::MIN, i32::MAX, 0, 1] {
            let h = hue("workspace", seed);
            assert!((0.0..360.0).contains(&h), "seed {seed} → {h}");
        }
    }

    #[test]
    fn multibyte_identifier_is_valid() {
        let h = hue("プロジェクト/日本語 🎨", 0);
        assert!((0.0..360.0).contains(&h));
        assert_eq!(h, hue("プロジェクト/日本語 🎨", 0));
    }

    #[test]
    fn seeds_spread_hues() {
        let hues: std::collections::HashSet<u32> =
            (0..50).map(|seed| hue("same-workspace", seed) as u32).collect();
        assert!(hues.len() > 25, "only {} distinct hues", hues.len());
    }
}
