//! Sample denoising
//!
//! Resistive panels jitter while a finger settles. A ring of recent
//! conversions is accepted once every entry lies within a tolerance of the
//! ring mean. Until then the oldest entry is replaced with a fresh sample,
//! for a bounded number of checks.

use super::{FilteredSample, RawSample};

/// Ring length used by the touch driver
pub const DEFAULT_RING_LEN: usize = 8;

/// Default largest distance from the mean, in ADC counts
pub const DEFAULT_TOLERANCE: u16 = 40;

/// Default number of convergence checks
pub const DEFAULT_MAX_ATTEMPTS: u8 = 16;

/// Convergence limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DenoiseParams {
    pub tolerance: u16,
    /// Checks before giving up; each failed check draws one sample
    pub max_attempts: u8,
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Outcome of a denoising pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Convergence {
    /// Every ring entry within tolerance of this mean
    Converged(FilteredSample),
    /// Attempts ran out; mean from the last check
    BestEffort(FilteredSample),
}

impl Convergence {
    /// The filtered value, whichever way it was reached
    pub const fn value(self) -> FilteredSample {
        match self {
            Convergence::Converged(v) | Convergence::BestEffort(v) => v,
        }
    }

    pub const fn is_converged(self) -> bool {
        matches!(self, Convergence::Converged(_))
    }
}

/// Fixed-size ring of raw samples with a running sum
#[derive(Debug, Clone)]
pub struct DenoiseRing<const N: usize> {
    ring: [RawSample; N],
    sum: u32,
    oldest: usize,
}

impl<const N: usize> DenoiseRing<N> {
    /// Fill the ring with `N` fresh samples
    pub fn fill(mut next: impl FnMut() -> RawSample) -> Self {
        let mut ring = [0; N];
        let mut sum = 0u32;
        for slot in ring.iter_mut() {
            *slot = next();
            sum += *slot as u32;
        }
        Self {
            ring,
            sum,
            oldest: 0,
        }
    }

    /// Current samples, in slot order
    pub fn samples(&self) -> &[RawSample; N] {
        &self.ring
    }

    /// Truncated mean of the ring
    pub fn mean(&self) -> FilteredSample {
        if N == 0 {
            return 0;
        }
        (self.sum / N as u32) as FilteredSample
    }

    /// Check if every entry lies within `tolerance` of `mean`
    pub fn is_settled(&self, mean: FilteredSample, tolerance: u16) -> bool {
        self.ring.iter().all(|&s| s.abs_diff(mean) <= tolerance)
    }

    /// Overwrite the oldest entry
    pub fn replace_oldest(&mut self, sample: RawSample) {
        if N == 0 {
            return;
        }
        self.sum -= self.ring[self.oldest] as u32;
        self.ring[self.oldest] = sample;
        self.sum += sample as u32;
        self.oldest = (self.oldest + 1) % N;
    }

    /// Run convergence checks, drawing replacements from `next`
    pub fn settle(
        &mut self,
        params: DenoiseParams,
        mut next: impl FnMut() -> RawSample,
    ) -> Convergence {
        let mut mean = self.mean();
        for _ in 0..params.max_attempts {
            mean = self.mean();
            if self.is_settled(mean, params.tolerance) {
                return Convergence::Converged(mean);
            }
            self.replace_oldest(next());
        }
        Convergence::BestEffort(mean)
    }
}

/// Fill a ring from `next` and settle it
pub fn denoise<const N: usize>(
    params: DenoiseParams,
    mut next: impl FnMut() -> RawSample,
) -> Convergence {
    let mut ring = DenoiseRing::<N>::fill(&mut next);
    ring.settle(params, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Sample source that replays a script, then repeats a tail value
    struct Script<'a> {
        samples: &'a [u16],
        tail: u16,
        drawn: usize,
    }

    impl<'a> Script<'a> {
        fn new(samples: &'a [u16], tail: u16) -> Self {
            Self {
                samples,
                tail,
                drawn: 0,
            }
        }

        fn next(&mut self) -> u16 {
            let v = self.samples.get(self.drawn).copied().unwrap_or(self.tail);
            self.drawn += 1;
            v
        }
    }

    #[test]
    fn test_steady_samples_converge_first_check() {
        let mut src = Script::new(&[2000, 2010, 1990, 2005, 1995, 2000, 2003, 1997], 2000);
        let result = denoise::<8>(DenoiseParams::default(), || src.next());

        assert_eq!(result, Convergence::Converged(2000));
        assert_eq!(src.drawn, 8);
    }

    #[test]
    fn test_outlier_replaced_then_converges() {
        let mut src = Script::new(&[1000, 1000, 1000, 3000, 1000, 1000, 1000, 1000], 1000);
        let result = denoise::<8>(DenoiseParams::default(), || src.next());

        // slots 0..=3 replaced before the outlier is gone
        assert_eq!(result, Convergence::Converged(1000));
        assert_eq!(src.drawn, 12);
    }

    #[test]
    fn test_never_settles_gives_best_effort() {
        let mut flip = false;
        let params = DenoiseParams::default();
        let result = denoise::<8>(params, || {
            flip = !flip;
            if flip {
                0
            } else {
                4000
            }
        });

        assert_eq!(result, Convergence::BestEffort(2000));
        assert!(!result.is_converged());
        assert_eq!(result.value(), 2000);
    }

    #[test]
    fn test_draws_bounded_by_attempts() {
        let mut drawn = 0usize;
        let params = DenoiseParams {
            tolerance: 0,
            max_attempts: 16,
        };
        let _ = denoise::<8>(params, || {
            drawn += 1;
            (drawn as u16 % 2) * 100
        });

        assert_eq!(drawn, 8 + 16);
    }

    #[test]
    fn test_zero_attempts_is_best_effort() {
        let mut src = Script::new(&[], 500);
        let params = DenoiseParams {
            tolerance: 40,
            max_attempts: 0,
        };
        assert_eq!(denoise::<8>(params, || src.next()), Convergence::BestEffort(500));
        assert_eq!(src.drawn, 8);
    }

    #[test]
    fn test_replace_keeps_running_sum() {
        let mut ring = DenoiseRing::<4>::fill(|| 100);
        ring.replace_oldest(500);
        ring.replace_oldest(500);

        assert_eq!(ring.samples(), &[500, 500, 100, 100]);
        assert_eq!(ring.mean(), 300);
    }

    proptest! {
        #[test]
        fn settled_ring_needs_no_extra_samples(
            base in 100u16..3900,
            offsets in proptest::array::uniform8(0u16..=40),
        ) {
            // spread of at most 40 keeps every entry within 40 of the mean
            let samples: [u16; 8] = core::array::from_fn(|i| base + offsets[i]);
            let mut src = Script::new(&samples, base);
            let result = denoise::<8>(DenoiseParams::default(), || src.next());

            prop_assert!(result.is_converged());
            prop_assert_eq!(src.drawn, 8);
        }

        #[test]
        fn mean_stays_within_sample_range(samples in proptest::array::uniform8(0u16..=4095)) {
            let mut i = 0;
            let ring = DenoiseRing::<8>::fill(|| {
                i += 1;
                samples[i - 1]
            });
            let lo = *samples.iter().min().unwrap();
            let hi = *samples.iter().max().unwrap();
            prop_assert!(ring.mean() >= lo && ring.mean() <= hi);
        }
    }
}
