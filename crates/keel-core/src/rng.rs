//! Deterministic xorshift generator for reproducible allocation patterns.
//!
//! [`Xorshift32`] is a plain value: each harness, thread or test owns its
//! own generator, so sequences never interfere and a failing stress run
//! can be replayed from its seed alone.
//!
//! Not suitable for anything security- or fairness-sensitive:
//! [`bounded`](Xorshift32::bounded) and [`range`](Xorshift32::range) use a
//! plain modulo and are biased for spans that are not powers of two.

/// Three-shift (13, 17, 5) xorshift generator over a single `u32`.
///
/// The state is never zero: zero is a fixed point of xorshift, so a zero
/// seed is remapped to [`Xorshift32::DEFAULT_SEED`].
///
/// ```
/// use keel_core::Xorshift32;
///
/// let mut a = Xorshift32::new(1);
/// assert_eq!(a.next_u32(), 270_369);
///
/// let mut b = Xorshift32::new(1);
/// assert_eq!(b.next_u32(), 270_369);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Seed used by [`Default`] and substituted for a zero seed.
    pub const DEFAULT_SEED: u32 = 1;

    /// Scale mapping a `u32` draw onto `[0, 1)` (about 2^-32).
    const UNIT_SCALE: f32 = 2.328_306_4e-10;

    /// Create a generator from `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            state: Self::sanitize(seed),
        }
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u32) {
        self.state = Self::sanitize(seed);
    }

    /// The current state. Feeding it to [`Xorshift32::new`] resumes the
    /// sequence from this point.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance one step and return the new state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// A draw in `[0, max)`.
    ///
    /// `max` must be non-zero.
    #[inline]
    pub fn bounded(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0, "bounded() requires max > 0");
        self.next_u32() % max
    }

    /// A draw in `[min, max]`, both ends inclusive.
    ///
    /// `min` must not exceed `max`. The full `0..=u32::MAX` span returns
    /// the raw draw.
    #[inline]
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "range() requires min <= max");
        let span = max.wrapping_sub(min).wrapping_add(1);
        if span == 0 {
            return self.next_u32();
        }
        self.next_u32() % span + min
    }

    /// A float in `[0, 1)`.
    #[inline]
    pub fn unit_f32(&mut self) -> f32 {
        (self.next_u32() as f32 * Self::UNIT_SCALE) % 1.0
    }

    /// A float in `[min, max]` for `min < max`.
    ///
    /// Float rounding can return `max` itself.
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        self.unit_f32() * (max - min) + min
    }

    fn sanitize(seed: u32) -> u32 {
        if seed == 0 {
            log::warn!(
                "xorshift seed 0 is degenerate, using {} instead",
                Self::DEFAULT_SEED
            );
            Self::DEFAULT_SEED
        } else {
            seed
        }
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl Iterator for Xorshift32 {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.next_u32())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seed_one_reference_sequence() {
        let mut rng = Xorshift32::new(1);
        assert_eq!(rng.next_u32(), 270_369);
        assert_eq!(rng.next_u32(), 67_634_689);
        assert_eq!(rng.next_u32(), 2_647_435_461);
    }

    #[test]
    fn default_matches_seed_one() {
        let mut a = Xorshift32::default();
        let mut b = Xorshift32::new(1);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn never_degenerates_to_zero() {
        let mut rng = Xorshift32::new(1);
        let first = rng.next_u32();
        for i in 1..12_345 {
            let v = rng.next_u32();
            assert_ne!(v, 0, "draw {i} hit the zero fixed point");
            assert_ne!(v, first, "draw {i} repeated the first value");
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut zero = Xorshift32::new(0);
        assert_eq!(zero.state(), Xorshift32::DEFAULT_SEED);
        assert_ne!(zero.next_u32(), 0);

        let mut rng = Xorshift32::new(99);
        rng.reseed(0);
        assert_eq!(rng, Xorshift32::default());
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut rng = Xorshift32::new(7);
        let first: Vec<u32> = (0..8).map(|_| rng.next_u32()).collect();
        rng.reseed(7);
        let second: Vec<u32> = (0..8).map(|_| rng.next_u32()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn state_checkpoint_resumes() {
        let mut rng = Xorshift32::new(1234);
        for _ in 0..10 {
            rng.next_u32();
        }
        let mut resumed = Xorshift32::new(rng.state());
        for _ in 0..10 {
            assert_eq!(rng.next_u32(), resumed.next_u32());
        }
    }

    #[test]
    fn bounded_stays_below_max() {
        let mut rng = Xorshift32::new(42);
        for _ in 0..10_000 {
            assert!(rng.bounded(17) < 17);
        }
        for _ in 0..100 {
            assert_eq!(rng.bounded(1), 0);
        }
    }

    #[test]
    fn range_is_inclusive() {
        let mut rng = Xorshift32::new(5);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..10_000 {
            let v = rng.range(10, 13);
            assert!((10..=13).contains(&v));
            seen_min |= v == 10;
            seen_max |= v == 13;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn range_degenerate_and_full_span() {
        let mut rng = Xorshift32::new(5);
        assert_eq!(rng.range(9, 9), 9);
        let mut a = Xorshift32::new(5);
        let mut b = Xorshift32::new(5);
        assert_eq!(a.range(0, u32::MAX), b.next_u32());
    }

    #[test]
    fn unit_f32_in_half_open_interval() {
        let mut rng = Xorshift32::new(3);
        for _ in 0..10_000 {
            let f = rng.unit_f32();
            assert!((0.0..1.0).contains(&f), "{f} outside [0, 1)");
        }
    }

    #[test]
    fn range_f32_respects_bounds() {
        let mut rng = Xorshift32::new(3);
        for _ in 0..10_000 {
            let f = rng.range_f32(-2.5, 4.0);
            assert!((-2.5..=4.0).contains(&f), "{f} outside [-2.5, 4.0]");
        }
    }

    #[test]
    fn iterator_yields_same_stream() {
        let mut manual = Xorshift32::new(11);
        let expected: Vec<u32> = (0..5).map(|_| manual.next_u32()).collect();
        let collected: Vec<u32> = Xorshift32::new(11).take(5).collect();
        assert_eq!(expected, collected);
    }

    #[test]
    fn per_thread_generators_are_independent() {
        let reference: Vec<u32> = Xorshift32::new(77).take(1_000).collect();
        let streams: Vec<Vec<u32>> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..4)
                .map(|_| s.spawn(|| Xorshift32::new(77).take(1_000).collect::<Vec<u32>>()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        for stream in streams {
            assert_eq!(stream, reference);
        }
    }

    proptest! {
        #[test]
        fn equal_seeds_equal_sequences(seed in any::<u32>(), n in 1usize..256) {
            let a: Vec<u32> = Xorshift32::new(seed).take(n).collect();
            let b: Vec<u32> = Xorshift32::new(seed).take(n).collect();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn bounded_in_range(seed in any::<u32>(), max in 1u32..=u32::MAX) {
            let mut rng = Xorshift32::new(seed);
            for _ in 0..64 {
                prop_assert!(rng.bounded(max) < max);
            }
        }

        #[test]
        fn range_in_bounds(seed in any::<u32>(), a in any::<u32>(), b in any::<u32>()) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let mut rng = Xorshift32::new(seed);
            for _ in 0..64 {
                let v = rng.range(min, max);
                prop_assert!(v >= min && v <= max);
            }
        }

        #[test]
        fn nonzero_seed_never_yields_zero(seed in 1u32..=u32::MAX) {
            let mut rng = Xorshift32::new(seed);
            for _ in 0..1_000 {
                prop_assert_ne!(rng.next_u32(), 0);
            }
        }
    }
}
