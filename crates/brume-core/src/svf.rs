//! State-variable highpass filter.
//!
//! Topology-preserving transform (TPT) state-variable filter, trimmed down
//! to its highpass output. The TPT structure stays stable under fast cutoff
//! sweeps, which matters here because the cutoff tracks a knob that can jump
//! by a full quantization step between blocks.
//!
//! Reference: Vadim Zavalishin, "The Art of VA Filter Design".

use libm::tanf;

use crate::math::flush_denormal;

/// Minimum cutoff frequency in Hz.
const MIN_CUTOFF: f32 = 20.0;

/// Two-pole (12 dB/octave) highpass filter.
#[derive(Debug, Clone)]
pub struct HighpassFilter {
    /// First integrator state
    ic1eq: f32,
    /// Second integrator state
    ic2eq: f32,
    /// Pre-warped gain g = tan(pi * fc / sr)
    g: f32,
    /// Damping k = 1 / Q
    k: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Cutoff frequency in Hz
    cutoff_hz: f32,
    /// Resonance (Q factor)
    resonance: f32,
}

impl HighpassFilter {
    /// Create a highpass filter with Butterworth response (Q = 0.707).
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 0.0,
            sample_rate,
            cutoff_hz,
            resonance: core::f32::consts::FRAC_1_SQRT_2,
        };
        filter.recalculate();
        filter
    }

    /// Set the cutoff frequency in Hz.
    ///
    /// Clamped to `[20, 0.49 * sample_rate]` to keep the prewarp stable.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz.clamp(MIN_CUTOFF, self.sample_rate * 0.49);
        self.recalculate();
    }

    /// Set the resonance (Q factor), clamped to `[0.5, 20]`.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.5, 20.0);
        self.recalculate();
    }

    /// Update the sample rate, preserving cutoff and resonance.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.cutoff_hz = self.cutoff_hz.clamp(MIN_CUTOFF, sample_rate * 0.49);
        self.recalculate();
    }

    /// Clear the integrator states.
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    /// Process one sample, returning the highpass output.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let v3 = input - self.ic2eq;
        let v1 = (self.g * v3 + self.ic1eq) / (1.0 + self.g * (self.g + self.k));
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        // hp = input - k*bp - lp
        input - self.k * v1 - v2
    }

    fn recalculate(&mut self) {
        if self.sample_rate <= 0.0 {
            self.g = 0.0;
            self.k = 2.0;
            return;
        }
        let fc = self.cutoff_hz.clamp(MIN_CUTOFF, self.sample_rate * 0.49);
        self.g = tanf(core::f32::consts::PI * fc / self.sample_rate);
        self.k = 1.0 / self.resonance;
    }
}
