//! Peak limiter with exponential release ballistics.
//!
//! The input conditioner of the signal path. One pass at 0.9 tames the raw
//! input before the gain stages; a second pass at 1.1 restores a usable
//! ceiling after the dry and wet branches are summed.
//!
//! # Algorithm
//!
//! A peak envelope tracks the rectified input with instant attack and a
//! one-pole exponential release. When the envelope exceeds the threshold the
//! sample is scaled by `threshold / envelope`, which rides gain down smoothly
//! instead of flattening the waveform. A final hard clip at the threshold
//! makes the bound exact: the envelope-based gain alone can overshoot by a
//! hair during the release tail of a falling transient.
//!
//! # Reference
//!
//! Giannoulis, Massberg & Reiss, "Digital Dynamic Range Compressor Design -
//! A Tutorial and Analysis", JAES vol. 60 no. 6, 2012, sections IV and V for
//! the one-pole ballistics.

use libm::{expf, fabsf};

use brume_core::{flush_denormal, hard_clip};

/// Default release time in milliseconds.
const DEFAULT_RELEASE_MS: f32 = 80.0;

/// Peak limiter with a per-call threshold.
///
/// The threshold is an argument rather than a field because the same
/// ballistics serve two different ceilings in the chain. Each channel gets
/// its own instance; the envelope is stateful.
///
/// # Example
///
/// ```rust
/// use brume_effects::Limiter;
///
/// let mut limiter = Limiter::new(48000.0);
/// let mut block = [1.5f32; 64];
/// limiter.process_block(&mut block, 0.9);
/// assert!(block.iter().all(|s| s.abs() <= 0.9));
/// ```
#[derive(Debug, Clone)]
pub struct Limiter {
    /// Peak envelope (linear amplitude)
    envelope: f32,
    /// One-pole release coefficient
    release_coeff: f32,
    /// Release time in milliseconds
    release_ms: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Limiter {
    /// Create a limiter with the default 80 ms release.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            envelope: 0.0,
            release_coeff: release_coeff(DEFAULT_RELEASE_MS, sample_rate),
            release_ms: DEFAULT_RELEASE_MS,
            sample_rate,
        }
    }

    /// Set the release time in milliseconds, clamped to [10, 500].
    pub fn set_release_ms(&mut self, ms: f32) {
        self.release_ms = ms.clamp(10.0, 500.0);
        self.release_coeff = release_coeff(self.release_ms, self.sample_rate);
    }

    /// Update the sample rate, preserving the release time.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.release_coeff = release_coeff(self.release_ms, sample_rate);
    }

    /// Clear the envelope.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    /// Limit one sample to the given threshold.
    #[inline]
    pub fn process(&mut self, input: f32, threshold: f32) -> f32 {
        let level = fabsf(input);

        // Instant attack up, exponential release down.
        self.envelope = if level > self.envelope {
            level
        } else {
            flush_denormal(
                self.release_coeff * self.envelope + (1.0 - self.release_coeff) * level,
            )
        };

        let gain = if self.envelope > threshold && self.envelope > 1e-9 {
            threshold / self.envelope
        } else {
            1.0
        };

        // The envelope gain does the audible work; the clip makes the
        // ceiling exact.
        hard_clip(input * gain, threshold)
    }

    /// Limit a whole block in place.
    pub fn process_block(&mut self, buf: &mut [f32], threshold: f32) {
        for sample in buf.iter_mut() {
            *sample = self.process(*sample, threshold);
        }
    }
}

/// One-pole release coefficient: `exp(-1 / (release_ms * sr / 1000))`.
///
/// As `release_ms -> 0` the coefficient -> 0 (instant), as `release_ms -> inf`
/// the coefficient -> 1 (never releases).
#[inline]
fn release_coeff(release_ms: f32, sample_rate: f32) -> f32 {
    let tau = release_ms * sample_rate / 1000.0;
    if tau < 1.0 { 0.0 } else { expf(-1.0 / tau) }
}
