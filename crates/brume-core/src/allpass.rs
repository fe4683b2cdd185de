//! Allpass filter for reverb diffusion.
//!
//! A Schroeder allpass that adds diffusion without coloring the frequency
//! response. A short series chain of these smears the comb bank output into
//! a dense, smooth tail.

use crate::DelayLine;
use crate::flush_denormal;

/// Schroeder allpass filter for diffusion.
///
/// Allpass filters pass all frequencies at equal amplitude but scramble
/// the phase, which turns discrete echoes into a diffuse wash.
///
/// # Example
///
/// ```rust
/// use brume_core::DiffusionAllpass;
///
/// let mut allpass = DiffusionAllpass::new(500);
/// let output = allpass.process(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DiffusionAllpass {
    delay: DelayLine,
    feedback: f32,
}

impl DiffusionAllpass {
    /// Create an allpass with the given loop length in samples.
    ///
    /// Feedback starts at 0.5, the usual choice for reverb diffusion.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            delay: DelayLine::new(delay_samples),
            feedback: 0.5,
        }
    }

    /// Set the feedback coefficient.
    ///
    /// The allpass is stable for |feedback| < 1.0.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Get the current feedback value.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Process a single sample.
    ///
    /// Schroeder allpass structure:
    /// output = -input + delayed
    /// delay_input = input + delayed * feedback
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay.read(self.delay.capacity() - 1);

        let output = -input + delayed;

        self.delay
            .write(flush_denormal(input + delayed * self.feedback));

        output
    }

    /// Clear the allpass filter state.
    pub fn clear(&mut self) {
        self.delay.clear();
    }

    /// Get the loop length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
