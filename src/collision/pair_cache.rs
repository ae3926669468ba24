//! Bitset keyed by unordered pairs of physics ids.

/// Number of unordered pairs of distinct ids drawn from `0..ids`.
pub const fn triangular(ids: usize) -> usize {
    if ids < 2 {
        0
    } else {
        ids * (ids - 1) / 2
    }
}

/// Perfect hash of the unordered pair `{a, b}` with `a != b` into
/// `0..triangular(max(a, b) + 1)`.
pub fn pair_index(a: u8, b: u8) -> usize {
    debug_assert_ne!(a, b, "a body never pairs with itself");
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (lo, hi) = (lo as usize, hi as usize);
    hi * (hi - 1) / 2 + lo
}

/// One bit per unordered id pair.
///
/// Used once per update to guarantee each pair is tested at most once, and by
/// the world to remember which pairs are currently touching.
#[derive(Debug, Clone)]
pub struct PairCache {
    bits: Vec<u8>,
    dirty: bool,
}

impl PairCache {
    /// Allocates `ceil(max_pairs / 8)` zeroed bytes.
    pub fn create(max_pairs: usize) -> Self {
        Self {
            bits: vec![0; max_pairs.div_ceil(8)],
            dirty: false,
        }
    }

    /// Sized for every pair of ids in `0..max_ids`.
    pub fn for_ids(max_ids: usize) -> Self {
        Self::create(triangular(max_ids))
    }

    pub fn capacity(&self) -> usize {
        self.bits.len() * 8
    }

    pub fn get(&self, pair: usize) -> bool {
        self.bits
            .get(pair / 8)
            .map(|byte| byte & (1 << (pair % 8)) != 0)
            .unwrap_or(false)
    }

    pub fn set(&mut self, pair: usize) {
        debug_assert!(pair < self.capacity(), "pair index {pair} out of range");
        if let Some(byte) = self.bits.get_mut(pair / 8) {
            *byte |= 1 << (pair % 8);
            self.dirty = true;
        }
    }

    pub fn unset(&mut self, pair: usize) {
        if let Some(byte) = self.bits.get_mut(pair / 8) {
            *byte &= !(1 << (pair % 8));
        }
    }

    /// Clears every bit. Skipped when nothing was set since the last erase.
    pub fn erase(&mut self) {
        if !self.dirty {
            return;
        }
        self.bits.fill(0);
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the pair was already marked, marking it either way.
    pub fn checked_before(&mut self, a: u8, b: u8) -> bool {
        let pair = pair_index(a, b);
        let seen = self.get(pair);
        self.set(pair);
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn checked_before_reports_first_then_repeat() {
        let mut cache = PairCache::for_ids(16);
        assert!(!cache.checked_before(3, 7));
        assert!(cache.checked_before(3, 7));
        assert!(cache.checked_before(7, 3));

        cache.erase();
        assert!(!cache.checked_before(7, 3));
    }

    #[test]
    fn erase_is_skipped_on_idle_passes() {
        let mut cache = PairCache::for_ids(4);
        assert!(!cache.is_dirty());
        cache.erase();
        assert!(!cache.is_dirty());

        cache.set(pair_index(0, 1));
        assert!(cache.is_dirty());
        cache.erase();
        assert!(!cache.is_dirty());
        assert!(!cache.get(pair_index(0, 1)));
    }

    #[test]
    fn pair_index_is_a_bijection_over_the_bound() {
        let max = 64u16;
        let mut seen = HashSet::new();
        for hi in 1..max {
            for lo in 0..hi {
                let index = pair_index(lo as u8, hi as u8);
                assert!(index < triangular(max as usize));
                assert!(seen.insert(index), "collision at ({lo}, {hi})");
            }
        }
        assert_eq!(seen.len(), triangular(max as usize));
    }

    #[test]
    fn full_id_range_fits_the_cache() {
        let cache = PairCache::for_ids(256);
        assert!(pair_index(254, 255) < cache.capacity());
        assert_eq!(cache.capacity(), triangular(256).div_ceil(8) * 8);
    }

    #[test]
    fn unset_only_clears_one_pair() {
        let mut cache = PairCache::for_ids(8);
        cache.set(pair_index(1, 2));
        cache.set(pair_index(1, 3));
        cache.unset(pair_index(1, 2));
        assert!(!cache.get(pair_index(1, 2)));
        assert!(cache.get(pair_index(1, 3)));
    }
}
