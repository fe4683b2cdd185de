//! Integer-tap delay line.
//!
//! Circular buffer with whole-sample reads. The reverb comb and allpass
//! loops always read at a fixed tap, so no interpolation is needed.
//!
//! # Memory
//!
//! The buffer is heap-allocated during construction but never reallocates.
//! No allocations occur during audio processing.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Circular delay buffer with integer-sample taps.
///
/// # Example
///
/// ```rust
/// use brume_core::DelayLine;
///
/// let mut delay = DelayLine::new(8);
/// delay.write(1.0);
/// for _ in 0..3 {
///     delay.write(0.0);
/// }
/// assert_eq!(delay.read(3), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    /// Circular buffer storage
    buffer: Vec<f32>,
    /// Write position in buffer
    write_pos: usize,
}

impl DelayLine {
    /// Create a delay line holding `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Delay size must be > 0");

        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Read the sample written `delay_samples` writes ago.
    ///
    /// A delay of 0 returns the most recently written sample. Delays beyond
    /// `capacity - 1` are clamped.
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.min(len - 1);

        // Points at the sample `delay` writes before the last one.
        let read_pos = (self.write_pos + len - delay - 1) % len;
        self.buffer[read_pos]
    }

    /// Write a sample and advance the write position.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Clear the delay line (sets all samples to 0).
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Maximum usable tap in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
