//! One-pole lowpass filter.
//!
//! The cheapest useful filter: a single multiply-add per sample with a
//! 6 dB/octave rolloff. Used here to band-limit the noise generator and to
//! damp high frequencies inside the reverb comb loops.

use libm::expf;

use crate::math::flush_denormal;

/// First-order IIR lowpass with cutoff specified in Hz.
///
/// Difference equation: `y[n] = x[n] + coeff * (y[n-1] - x[n])` where
/// `coeff = exp(-2*pi*fc/sr)`. At `coeff = 0` the filter passes input
/// unchanged; as `coeff -> 1` the output barely moves.
#[derive(Debug, Clone)]
pub struct OnePole {
    /// Filter state (previous output)
    state: f32,
    /// Feedback coefficient derived from cutoff
    coeff: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Cutoff frequency in Hz
    cutoff_hz: f32,
}

impl OnePole {
    /// Create a lowpass with the given cutoff frequency.
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
            sample_rate,
            cutoff_hz,
        };
        filter.recalculate_coeff();
        filter
    }

    /// Set the cutoff frequency in Hz.
    pub fn set_frequency(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
        self.recalculate_coeff();
    }

    /// Update the sample rate, preserving the cutoff frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Clear the filter state.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        self.state
    }

    fn recalculate_coeff(&mut self) {
        if self.sample_rate <= 0.0 {
            self.coeff = 0.0;
            return;
        }
        // Pole placement for a -3dB point at the cutoff frequency.
        let normalized = self.cutoff_hz.max(0.0) / self.sample_rate;
        self.coeff = expf(-core::f32::consts::TAU * normalized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_dc() {
        let mut filter = OnePole::new(48000.0, 1000.0);
        let mut out = 0.0;
        for _ in 0..48000 {
            out = filter.process(1.0);
        }
        assert!((out - 1.0).abs() < 1e-3, "DC should pass, got {out}");
    }

    #[test]
    fn attenuates_alternating_input() {
        let mut filter = OnePole::new(48000.0, 1000.0);
        // Nyquist-rate alternation is far above a 1 kHz cutoff.
        let mut peak: f32 = 0.0;
        let mut sign = 1.0;
        for _ in 0..4800 {
            let out = filter.process(sign);
            peak = peak.max(out.abs());
            sign = -sign;
        }
        assert!(peak < 0.25, "Nyquist tone should be attenuated, peak {peak}");
    }

    #[test]
    fn reset_clears_state() {
        let mut filter = OnePole::new(48000.0, 100.0);
        for _ in 0..100 {
            filter.process(1.0);
        }
        filter.reset();
        assert_eq!(filter.process(0.0), 0.0);
    }

    #[test]
    fn higher_cutoff_tracks_faster() {
        let mut slow = OnePole::new(48000.0, 100.0);
        let mut fast = OnePole::new(48000.0, 8000.0);
        let mut slow_out = 0.0;
        let mut fast_out = 0.0;
        for _ in 0..32 {
            slow_out = slow.process(1.0);
            fast_out = fast.process(1.0);
        }
        assert!(
            fast_out > slow_out,
            "Higher cutoff should settle faster: fast {fast_out}, slow {slow_out}"
        );
    }
}
