//! Stable hashing and seeded pseudo-randomness.
//!
//! Everything visual (shape, texture, material, pin cells) derives from the
//! explicit FNV-1a hash below, never from the standard library's hasher,
//! whose output is unseeded and differs between processes. The exact
//! algorithms are part of the layout contract: any port that reproduces them
//! reproduces identical cities.

/// 64-bit FNV-1a over a byte slice.
///
/// Offset basis `0xcbf29ce484222325`, prime `0x100000001b3`.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Map a hash into `buckets` equal bins. Returns 0 for zero buckets rather
/// than dividing by zero.
pub fn hash_to_bucket(hash: u64, buckets: u32) -> u32 {
    if buckets == 0 {
        return 0;
    }
    (hash % buckets as u64) as u32
}

/// Small deterministic generator (xorshift64*), used where layout needs a
/// stream of values from one seed.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Seed zero is remapped; xorshift64* has a fixed point at zero.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x853c_49e6_748f_ea9b } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in `[0, bound)`; returns 0 for a zero bound.
    pub fn next_bounded(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        (self.next_u64() % bound as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv_empty_is_offset_basis() {
        assert_eq!(fnv1a64(b""), 0xcbf2_9ce4_8422_2325);
    }

    #[test]
    fn test_fnv_is_stable_and_discriminating() {
        assert_eq!(fnv1a64(b"/repo/src/main.rs"), fnv1a64(b"/repo/src/main.rs"));
        assert_ne!(fnv1a64(b"/repo/src/main.rs"), fnv1a64(b"/repo/src/lib.rs"));
        assert_ne!(fnv1a64(b"ab"), fnv1a64(b"ba"));
    }

    #[test]
    fn test_bucket_bounds() {
        for i in 0..100u64 {
            assert!(hash_to_bucket(fnv1a64(&i.to_le_bytes()), 7) < 7);
        }
        assert_eq!(hash_to_bucket(42, 0), 0);
    }

    #[test]
    fn test_rng_deterministic_per_seed() {
        let mut a = SeededRng::new(12345);
        let mut b = SeededRng::new(12345);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let mut c = SeededRng::new(54321);
        assert_ne!(a.next_u64(), c.next_u64());
    }

    #[test]
    fn test_rng_zero_seed_remapped() {
        let mut z = SeededRng::new(0);
        assert_ne!(z.next_u64(), 0);
        let f = z.next_f32();
        assert!((0.0..1.0).contains(&f));
    }
}
