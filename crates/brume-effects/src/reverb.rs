//! Stereo reverb tank.
//!
//! A Freeverb-style topology: eight parallel damped combs into four series
//! allpasses per channel, with the right channel's loop lengths offset by a
//! fixed spread so the tail decorrelates across the stereo field.
//!
//! Unlike a mixer-style reverb there is no wet/dry control here; the chain
//! handles send level and re-mixing itself. The two exposed parameters are
//! exactly the ones the panel maps: tail feedback and the damping lowpass
//! cutoff.

use brume_core::{DampedComb, DiffusionAllpass};

/// Freeverb comb loop lengths (at 44.1 kHz reference).
/// Mutually prime to avoid coincident resonances.
const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Freeverb allpass loop lengths (at 44.1 kHz reference).
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];

/// Right-channel loop offset in samples (at the reference rate).
const STEREO_SPREAD: usize = 23;

/// Reference sample rate for the tuning constants.
const REFERENCE_RATE: f32 = 44100.0;

/// Scale loop lengths from the reference rate to the target rate.
fn scale_to_rate(samples: usize, target_rate: f32) -> usize {
    ((samples as f32 * target_rate / REFERENCE_RATE).round() as usize).max(1)
}

/// Stereo Freeverb tank with feedback and lowpass damping controls.
///
/// # Example
///
/// ```rust
/// use brume_effects::StereoReverb;
///
/// let mut reverb = StereoReverb::new(48000.0);
/// reverb.set_feedback(0.8);
/// reverb.set_lowpass_hz(8000.0);
///
/// let (left, right) = reverb.process(0.5, 0.5);
/// assert!(left.is_finite() && right.is_finite());
/// ```
pub struct StereoReverb {
    combs_l: [DampedComb; 8],
    combs_r: [DampedComb; 8],
    allpasses_l: [DiffusionAllpass; 4],
    allpasses_r: [DiffusionAllpass; 4],

    feedback: f32,
    lowpass_hz: f32,
}

impl StereoReverb {
    /// Create a reverb at the given sample rate.
    ///
    /// Starts with a short tail (feedback 0.5) and an open damping filter.
    pub fn new(sample_rate: f32) -> Self {
        let mut reverb = Self {
            combs_l: Self::build_combs(sample_rate, 0),
            combs_r: Self::build_combs(sample_rate, STEREO_SPREAD),
            allpasses_l: Self::build_allpasses(sample_rate, 0),
            allpasses_r: Self::build_allpasses(sample_rate, STEREO_SPREAD),
            feedback: 0.5,
            lowpass_hz: 19000.0,
        };
        reverb.apply_params();
        reverb
    }

    /// Set the tail feedback, clamped to [0.0, 0.98].
    ///
    /// Higher values lengthen the decay; the clamp keeps the comb bank
    /// strictly stable.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.98);
        self.apply_params();
    }

    /// Get the current feedback.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Set the damping lowpass cutoff in Hz.
    ///
    /// Lower cutoffs darken the tail faster than they darken the onset.
    pub fn set_lowpass_hz(&mut self, cutoff_hz: f32) {
        self.lowpass_hz = cutoff_hz;
        self.apply_params();
    }

    /// Get the current damping cutoff in Hz.
    pub fn lowpass_hz(&self) -> f32 {
        self.lowpass_hz
    }

    /// Process one stereo sample pair.
    ///
    /// Both tanks are fed the mono sum of the inputs; decorrelation comes
    /// from the offset loop lengths, not from split excitation.
    #[inline]
    pub fn process(&mut self, in_l: f32, in_r: f32) -> (f32, f32) {
        let tank_in = (in_l + in_r) * 0.5;

        let mut sum_l = 0.0f32;
        for comb in &mut self.combs_l {
            sum_l += comb.process(tank_in);
        }
        sum_l *= 0.125; // Scale by 1/8

        let mut sum_r = 0.0f32;
        for comb in &mut self.combs_r {
            sum_r += comb.process(tank_in);
        }
        sum_r *= 0.125;

        let mut out_l = sum_l;
        for allpass in &mut self.allpasses_l {
            out_l = allpass.process(out_l);
        }

        let mut out_r = sum_r;
        for allpass in &mut self.allpasses_r {
            out_r = allpass.process(out_r);
        }

        (out_l, out_r)
    }

    /// Clear all loop state, silencing the tail.
    pub fn clear(&mut self) {
        for comb in self.combs_l.iter_mut().chain(self.combs_r.iter_mut()) {
            comb.clear();
        }
        for allpass in self
            .allpasses_l
            .iter_mut()
            .chain(self.allpasses_r.iter_mut())
        {
            allpass.clear();
        }
    }

    /// Rebuild the loop structures for a new sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.combs_l = Self::build_combs(sample_rate, 0);
        self.combs_r = Self::build_combs(sample_rate, STEREO_SPREAD);
        self.allpasses_l = Self::build_allpasses(sample_rate, 0);
        self.allpasses_r = Self::build_allpasses(sample_rate, STEREO_SPREAD);
        self.apply_params();
    }

    fn build_combs(sample_rate: f32, spread: usize) -> [DampedComb; 8] {
        core::array::from_fn(|i| {
            let delay = scale_to_rate(COMB_TUNINGS_44K[i] + spread, sample_rate);
            DampedComb::new(delay, sample_rate)
        })
    }

    fn build_allpasses(sample_rate: f32, spread: usize) -> [DiffusionAllpass; 4] {
        core::array::from_fn(|i| {
            let delay = scale_to_rate(ALLPASS_TUNINGS_44K[i] + spread, sample_rate);
            DiffusionAllpass::new(delay)
        })
    }

    fn apply_params(&mut self) {
        for comb in self.combs_l.iter_mut().chain(self.combs_r.iter_mut()) {
            comb.set_feedback(self.feedback);
            comb.set_damping_hz(self.lowpass_hz);
        }
    }
}
