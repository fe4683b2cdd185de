//! Seeded noise generators.
//!
//! [`WhiteNoise`] is a xorshift32 generator producing uniform samples in
//! [-1, 1]. [`BandNoise`] runs it through a one-pole lowpass so the texture
//! layer adds hiss without raw full-spectrum harshness.
//!
//! Both take an explicit seed, so two instances with the same seed produce
//! identical sequences. That makes noise-dependent behavior reproducible in
//! tests without any platform entropy source.

use crate::OnePole;

/// Xorshift32 white noise generator.
///
/// Output range is [-1.0, 1.0]. Period is 2^32 - 1, far beyond audible
/// repetition at audio rates.
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    state: u32,
}

impl WhiteNoise {
    /// Create a generator from a seed.
    ///
    /// A zero seed would lock xorshift at zero forever, so it is replaced
    /// with a fixed nonzero constant.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Generate the next sample in [-1.0, 1.0].
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        // Xorshift32 (Marsaglia, "Xorshift RNGs", 2003)
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;

        // Reinterpret as signed and scale to [-1, 1]
        (self.state as i32 as f32) / (i32::MAX as f32)
    }

    /// Restart the sequence from a new seed.
    pub fn reseed(&mut self, seed: u32) {
        self.state = if seed == 0 { 0x9E37_79B9 } else { seed };
    }
}

/// Band-limited noise: white noise through a one-pole lowpass.
#[derive(Debug, Clone)]
pub struct BandNoise {
    source: WhiteNoise,
    lowpass: OnePole,
}

impl BandNoise {
    /// Create a band-limited generator with the given lowpass cutoff.
    pub fn new(seed: u32, sample_rate: f32, cutoff_hz: f32) -> Self {
        Self {
            source: WhiteNoise::new(seed),
            lowpass: OnePole::new(sample_rate, cutoff_hz),
        }
    }

    /// Generate the next band-limited sample.
    ///
    /// Output stays within [-1.0, 1.0] since the lowpass cannot exceed its
    /// input peak.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.lowpass.process(self.source.next_sample())
    }

    /// Set the lowpass cutoff in Hz.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.lowpass.set_frequency(cutoff_hz);
    }

    /// Update the sample rate, preserving the cutoff.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.lowpass.set_sample_rate(sample_rate);
    }

    /// Reseed the source and clear the filter state.
    pub fn reset(&mut self, seed: u32) {
        self.source.reseed(seed);
        self.lowpass.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = WhiteNoise::new(12345);
        let mut b = WhiteNoise::new(12345);

        for _ in 0..1000 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = WhiteNoise::new(1);
        let mut b = WhiteNoise::new(2);

        let mut any_different = false;
        for _ in 0..100 {
            if a.next_sample() != b.next_sample() {
                any_different = true;
            }
        }
        assert!(any_different);
    }

    #[test]
    fn zero_seed_still_produces_noise() {
        let mut noise = WhiteNoise::new(0);
        let mut nonzero = false;
        for _ in 0..100 {
            if noise.next_sample() != 0.0 {
                nonzero = true;
            }
        }
        assert!(nonzero, "Zero seed must not lock the generator");
    }

    #[test]
    fn white_output_in_range() {
        let mut noise = WhiteNoise::new(42);
        for _ in 0..10_000 {
            let s = noise.next_sample();
            assert!((-1.0..=1.0).contains(&s), "Out of range: {s}");
        }
    }

    #[test]
    fn white_roughly_zero_mean() {
        let mut noise = WhiteNoise::new(7);
        let sum: f32 = (0..100_000).map(|_| noise.next_sample()).sum();
        let mean = sum / 100_000.0;
        assert!(mean.abs() < 0.02, "Mean should be near zero, got {mean}");
    }

    #[test]
    fn band_limited_output_in_range() {
        let mut noise = BandNoise::new(42, 48000.0, 6000.0);
        for _ in 0..10_000 {
            let s = noise.next_sample();
            assert!((-1.0..=1.0).contains(&s), "Out of range: {s}");
        }
    }

    #[test]
    fn lowpass_reduces_sample_to_sample_jumps() {
        let mut white = WhiteNoise::new(99);
        let mut band = BandNoise::new(99, 48000.0, 2000.0);

        let mut white_jump = 0.0f32;
        let mut band_jump = 0.0f32;
        let mut white_prev = white.next_sample();
        let mut band_prev = band.next_sample();

        for _ in 0..10_000 {
            let w = white.next_sample();
            let b = band.next_sample();
            white_jump += (w - white_prev).abs();
            band_jump += (b - band_prev).abs();
            white_prev = w;
            band_prev = b;
        }

        assert!(
            band_jump < white_jump * 0.5,
            "Band-limited noise should be smoother: band {band_jump}, white {white_jump}"
        );
    }
}
