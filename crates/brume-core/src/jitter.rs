//! Randomized low-frequency modulation source.
//!
//! [`JitterLfo`] ramps linearly between uniformly-drawn targets in [0, 1],
//! holding each ramp for the duration of one randomly-chosen cycle. The
//! result wanders like a slow drunk walk rather than repeating like a
//! periodic LFO, which is what gives the texture crossfade its unsteady,
//! tape-like character.

/// Segmented random LFO with output in [0.0, 1.0].
///
/// Each segment ramps from the current value to a fresh uniform target.
/// Segment duration is `1 / rate` where the rate is drawn uniformly from
/// `[min_hz, max_hz]` per segment.
///
/// Deterministic for a given seed, like the noise generators.
#[derive(Debug, Clone)]
pub struct JitterLfo {
    /// Current output value
    value: f32,
    /// Per-sample increment for the active segment
    step: f32,
    /// Samples remaining in the active segment
    samples_left: u32,
    /// Slowest segment rate in Hz
    min_hz: f32,
    /// Fastest segment rate in Hz
    max_hz: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// LCG state for target and rate draws
    rng_state: u32,
}

impl JitterLfo {
    /// Create a jitter source.
    ///
    /// `min_hz` is floored at 0.01 Hz and `max_hz` at `min_hz`, so a
    /// degenerate range still produces a valid (constant-rate) oscillator.
    pub fn new(seed: u32, sample_rate: f32, min_hz: f32, max_hz: f32) -> Self {
        let min_hz = min_hz.max(0.01);
        let mut lfo = Self {
            value: 0.0,
            step: 0.0,
            samples_left: 0,
            min_hz,
            max_hz: max_hz.max(min_hz),
            sample_rate,
            rng_state: seed,
        };
        // Start mid-range instead of pinned at zero.
        lfo.value = lfo.next_uniform();
        lfo
    }

    /// Advance by one sample and return the new value in [0.0, 1.0].
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_left == 0 {
            self.begin_segment();
        }

        self.value += self.step;
        self.samples_left -= 1;

        // Float accumulation can drift a hair past the target.
        self.value = self.value.clamp(0.0, 1.0);
        self.value
    }

    /// Get the current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Update the sample rate. The active segment is restarted at the next
    /// `advance` call.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.samples_left = 0;
    }

    /// Set the segment rate range in Hz.
    pub fn set_rate_range(&mut self, min_hz: f32, max_hz: f32) {
        self.min_hz = min_hz.max(0.01);
        self.max_hz = max_hz.max(self.min_hz);
        self.samples_left = 0;
    }

    /// Pick a new target and rate, then set up the ramp towards it.
    fn begin_segment(&mut self) {
        let target = self.next_uniform();
        let rate = self.min_hz + self.next_uniform() * (self.max_hz - self.min_hz);

        let length = (self.sample_rate / rate) as u32;
        let length = length.max(1);

        self.step = (target - self.value) / length as f32;
        self.samples_left = length;
    }

    /// Uniform draw in [0.0, 1.0).
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        // Numerical Recipes LCG; the high 16 bits are the usable ones.
        self.rng_state = self
            .rng_state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        f32::from((self.rng_state >> 16) as u16) / 65_536.0
    }
}
