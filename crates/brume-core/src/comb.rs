//! Comb filter for reverb algorithms.
//!
//! A feedback comb with a one-pole lowpass in the feedback path. Parallel
//! banks of these carry the body of a Schroeder-style reverb; the lowpass
//! models the absorption of high frequencies in real acoustic spaces.

use crate::DelayLine;
use crate::OnePole;
use crate::flush_denormal;

/// Comb filter with feedback and Hz-specified damping.
///
/// The damping cutoff is set in Hz so a single tone control can drive a
/// whole bank of combs with different loop lengths.
///
/// # Example
///
/// ```rust
/// use brume_core::DampedComb;
///
/// let mut comb = DampedComb::new(1000, 48000.0);
/// comb.set_feedback(0.8);
/// comb.set_damping_hz(6000.0);
///
/// let output = comb.process(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DampedComb {
    delay: DelayLine,
    damping: OnePole,
    feedback: f32,
}

impl DampedComb {
    /// Create a comb with the given loop length in samples.
    ///
    /// Starts with feedback 0.5 and damping at 8 kHz.
    pub fn new(delay_samples: usize, sample_rate: f32) -> Self {
        Self {
            delay: DelayLine::new(delay_samples),
            damping: OnePole::new(sample_rate, 8000.0),
            feedback: 0.5,
        }
    }

    /// Set the feedback amount (0.0 to ~0.98).
    ///
    /// Higher values create longer decay times.
    /// Values above 0.98 may cause instability.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    /// Get the current feedback value.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Set the damping lowpass cutoff in Hz.
    ///
    /// Lower values absorb more high frequencies per loop pass.
    #[inline]
    pub fn set_damping_hz(&mut self, cutoff_hz: f32) {
        self.damping.set_frequency(cutoff_hz);
    }

    /// Update the sample rate of the damping filter.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.damping.set_sample_rate(sample_rate);
    }

    /// Process a single sample through the comb filter.
    ///
    /// The output is the delayed signal, which is then fed back through
    /// the damping lowpass and into the delay line.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        // Read from the end of the delay line
        let output = self.delay.read(self.delay.capacity() - 1);

        // Damping in feedback path
        let damped = self.damping.process(output);
        self.delay
            .write(flush_denormal(input + damped * self.feedback));

        output
    }

    /// Clear the comb filter state.
    pub fn clear(&mut self) {
        self.delay.clear();
        self.damping.reset();
    }

    /// Get the loop length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
