//! Parameter smoothing for zipper-free changes.
//!
//! Discrete control events (a quantized knob step, a mode toggle) would
//! otherwise land on the audio path as an audible click. [`SmoothedParam`]
//! low-passes the parameter trajectory so every change becomes a short
//! exponential glide.
//!
//! ## Usage
//!
//! ```rust
//! use brume_core::SmoothedParam;
//!
//! let mut drive = SmoothedParam::with_config(1.0, 48000.0, 50.0);
//!
//! // Set a new target - smoothing happens automatically
//! drive.set_target(6.0);
//!
//! // In the audio callback, advance once per sample
//! for _ in 0..24_000 {
//!     let _smoothed = drive.advance();
//! }
//! assert!((drive.get() - 6.0).abs() < 0.05);
//! ```

use libm::expf;

/// A parameter with built-in exponential smoothing.
///
/// One-pole lowpass over the target trajectory: natural-sounding transitions
/// at one multiply-add per sample.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Target value we're smoothing towards
    target: f32,
    /// Smoothing coefficient (1 = instant, ~0 = very slow)
    coeff: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Smoothing time in milliseconds
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a new smoothed parameter with initial value.
    ///
    /// Smoothing is disabled until [`set_sample_rate`](Self::set_sample_rate)
    /// and [`set_smoothing_time_ms`](Self::set_smoothing_time_ms) configure it.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0, // Instant until configured
            sample_rate: 48000.0,
            smoothing_time_ms: 0.0,
        }
    }

    /// Create a smoothed parameter with full configuration.
    ///
    /// # Arguments
    /// * `initial` - Initial parameter value
    /// * `sample_rate` - Sample rate in Hz
    /// * `smoothing_time_ms` - Smoothing time constant in milliseconds
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_coeff();
        param
    }

    /// Set the target value (the parameter smooths towards this).
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and immediately snap to it (no smoothing).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update sample rate and recalculate the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Set smoothing time in milliseconds.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.smoothing_time_ms = time_ms;
        self.recalculate_coeff();
    }

    /// Get the next smoothed value (advances by one sample).
    ///
    /// Call this once per sample in the audio processing loop.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        // One-pole lowpass: y[n] = y[n-1] + coeff * (target - y[n-1])
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Get the current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get the target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if the parameter has reached its target (within epsilon).
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Skip ahead to the target value immediately.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// Largest possible step the smoother can take from its current value.
    ///
    /// Bounds the per-sample output discontinuity: `|advance() - get()|` never
    /// exceeds `coeff * |target - current|`.
    #[inline]
    pub fn max_step(&self) -> f32 {
        self.coeff * (self.target - self.current).abs()
    }

    /// Recalculate the smoothing coefficient from sample rate and time.
    ///
    /// A one-pole lowpass has the difference equation
    /// `y[n] = y[n-1] + coeff * (target - y[n-1])`, a first-order IIR with
    /// pole at `(1-coeff)`. The time constant tau (time to reach 63.2% of
    /// the target) relates to the coefficient by
    /// `coeff = 1 - exp(-1 / (tau * sample_rate))` with
    /// `tau = smoothing_time_ms / 1000`. After 5 tau the parameter is at
    /// 99.3% of the target, settled for audio purposes.
    ///
    /// When `smoothing_time_ms` is 0, coeff is 1.0 for instant response.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let time_constant = self.smoothing_time_ms / 1000.0;
            let samples = time_constant * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_when_no_smoothing() {
        let mut param = SmoothedParam::new(1.0);
        param.set_sample_rate(48000.0);
        param.set_smoothing_time_ms(0.0);

        param.set_target(0.5);
        let val = param.advance();
        assert!((val - 0.5).abs() < 1e-6, "Should snap instantly");
    }

    #[test]
    fn converges_to_target() {
        let mut param = SmoothedParam::with_config(0.0, 48000.0, 10.0);
        param.set_target(1.0);

        // Run for 50ms (5x the time constant) - should be very close
        for _ in 0..(48000 * 50 / 1000) {
            param.advance();
        }

        assert!(
            (param.get() - 1.0).abs() < 0.01,
            "Should converge to target, got {}",
            param.get()
        );
    }

    #[test]
    fn gradual_approach() {
        let mut param = SmoothedParam::with_config(0.0, 48000.0, 10.0);
        param.set_target(1.0);

        // After one time constant (~10ms), should be about 63% of the way
        let samples_for_time_constant = (48000.0 * 0.010) as usize;
        for _ in 0..samples_for_time_constant {
            param.advance();
        }

        let expected = 1.0 - expf(-1.0); // ~0.632
        assert!(
            (param.get() - expected).abs() < 0.05,
            "After one time constant, expected ~{}, got {}",
            expected,
            param.get()
        );
    }

    #[test]
    fn step_bound_holds() {
        let mut param = SmoothedParam::with_config(0.0, 48000.0, 50.0);
        param.set_target(8.0);

        for _ in 0..10_000 {
            let before = param.get();
            let bound = param.max_step();
            let after = param.advance();
            assert!(
                (after - before).abs() <= bound + 1e-9,
                "Step {} exceeded bound {}",
                (after - before).abs(),
                bound
            );
        }
    }

    #[test]
    fn snap_settles() {
        let mut param = SmoothedParam::with_config(0.0, 48000.0, 100.0);
        param.set_target(1.0);
        param.advance();
        assert!(!param.is_settled());
        param.snap_to_target();
        assert!(param.is_settled());
        assert_eq!(param.get(), 1.0);
    }
}
