//! The fixed signal topology of the module.
//!
//! One [`TextureChain`] is the whole audio path: input conditioning, an
//! optional overdrive on either side of the reverb, highpass filtering,
//! band-limited noise texture, the stereo tank, and the randomized jitter
//! crossfade. The order is fixed; the panel only moves parameters.
//!
//! Per stereo sample the chain executes, in order:
//!
//! 1. Retain `dry = input * dry_level` for the final re-mix.
//! 2. Overdrive the input if the stage is enabled and placed pre-reverb.
//! 3. Highpass the (possibly overdriven) signal.
//! 4. Add one shared band-limited noise sample scaled by
//!    `NOISE_FACTOR * jitter_mix`.
//! 5. Feed `signal * wet_level` into the stereo reverb.
//! 6. Crossfade the reverb output against one shared jitter sample:
//!    `out = reverb * (1 - jitter_mix + jitter * jitter_mix)`.
//! 7. Add the retained dry signal.
//! 8. Overdrive the sum if the stage is enabled and placed post-reverb.
//!
//! Around that loop, whole-block conditioning: the raw input is limited to
//! 0.9 before the chain and the summed output to 1.1 after it.

use brume_core::{BandNoise, HighpassFilter, JitterLfo};

use crate::limiter::Limiter;
use crate::overdrive::Overdrive;
use crate::reverb::StereoReverb;

/// Input conditioning threshold, leaving headroom for the gain stages.
pub const PRE_LIMIT_THRESHOLD: f32 = 0.9;

/// Output conditioning threshold after the dry/wet sum.
pub const FINAL_LIMIT_THRESHOLD: f32 = 1.1;

/// Fixed scale on the injected noise before the jitter-mix macro.
pub const NOISE_FACTOR: f32 = 0.05;

/// Lowpass cutoff of the injected noise in Hz.
const NOISE_CUTOFF_HZ: f32 = 6000.0;

/// Jitter modulator segment rate range in Hz.
const JITTER_MIN_HZ: f32 = 1.0;
const JITTER_MAX_HZ: f32 = 25.0;

/// Which side of the reverb the overdrive stage sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrivePlacement {
    /// Shape the input before the highpass and tank.
    Pre,
    /// Shape the summed dry/wet output.
    #[default]
    Post,
}

/// The complete per-block stereo signal path.
///
/// All parameter setters are cheap and expected to be called only when a
/// control actually changed; per-sample smoothing happens inside the stages
/// that need it (the overdrive's drive), not here.
pub struct TextureChain {
    in_limiter_l: Limiter,
    in_limiter_r: Limiter,
    out_limiter_l: Limiter,
    out_limiter_r: Limiter,

    highpass_l: HighpassFilter,
    highpass_r: HighpassFilter,

    noise: BandNoise,
    reverb: StereoReverb,
    jitter: JitterLfo,
    overdrive: Overdrive,

    placement: DrivePlacement,
    dry_level: f32,
    wet_level: f32,
    jitter_mix: f32,
}

impl TextureChain {
    /// Build the chain at the given sample rate.
    ///
    /// The seeds make the noise and jitter trajectories reproducible; two
    /// chains built with the same seeds produce identical output for
    /// identical input and parameter moves.
    pub fn new(sample_rate: f32, noise_seed: u32, jitter_seed: u32) -> Self {
        Self {
            in_limiter_l: Limiter::new(sample_rate),
            in_limiter_r: Limiter::new(sample_rate),
            out_limiter_l: Limiter::new(sample_rate),
            out_limiter_r: Limiter::new(sample_rate),
            highpass_l: HighpassFilter::new(sample_rate, 40.0),
            highpass_r: HighpassFilter::new(sample_rate, 40.0),
            noise: BandNoise::new(noise_seed, sample_rate, NOISE_CUTOFF_HZ),
            reverb: StereoReverb::new(sample_rate),
            jitter: JitterLfo::new(jitter_seed, sample_rate, JITTER_MIN_HZ, JITTER_MAX_HZ),
            overdrive: Overdrive::new(sample_rate),
            placement: DrivePlacement::default(),
            dry_level: 1.0,
            wet_level: 0.0,
            jitter_mix: 0.0,
        }
    }

    /// Set the dry and wet levels of the final re-mix.
    pub fn set_mix_split(&mut self, dry: f32, wet: f32) {
        self.dry_level = dry.clamp(0.0, 1.0);
        self.wet_level = wet.clamp(0.0, 1.0);
    }

    /// Set the jitter-mix macro in [0, 1].
    ///
    /// Scales both the injected noise and the crossfade depth, and drives
    /// the overdrive amount.
    pub fn set_jitter_mix(&mut self, mix: f32) {
        self.jitter_mix = mix.clamp(0.0, 1.0);
        self.overdrive.set_amount(self.jitter_mix);
    }

    /// Set the reverb tail feedback.
    ///
    /// The tank clamps this to 0.98; see [`StereoReverb::set_feedback`].
    pub fn set_reverb_feedback(&mut self, feedback: f32) {
        self.reverb.set_feedback(feedback);
    }

    /// Feedback the tank is actually running at, after its clamp.
    pub fn reverb_feedback(&self) -> f32 {
        self.reverb.feedback()
    }

    /// Set the reverb damping lowpass cutoff in Hz.
    pub fn set_reverb_lowpass_hz(&mut self, cutoff_hz: f32) {
        self.reverb.set_lowpass_hz(cutoff_hz);
    }

    /// Set the pre-tank highpass cutoff in Hz (both channels).
    pub fn set_highpass_hz(&mut self, cutoff_hz: f32) {
        self.highpass_l.set_cutoff(cutoff_hz);
        self.highpass_r.set_cutoff(cutoff_hz);
    }

    /// Enable or disable the overdrive stage.
    pub fn set_overdrive_enabled(&mut self, enabled: bool) {
        self.overdrive.set_enabled(enabled);
    }

    /// Whether the overdrive stage is engaged.
    pub fn overdrive_enabled(&self) -> bool {
        self.overdrive.is_enabled()
    }

    /// Place the overdrive stage before or after the reverb.
    pub fn set_drive_placement(&mut self, placement: DrivePlacement) {
        self.placement = placement;
    }

    /// Current overdrive placement.
    pub fn drive_placement(&self) -> DrivePlacement {
        self.placement
    }

    /// Current dry level.
    pub fn dry_level(&self) -> f32 {
        self.dry_level
    }

    /// Current wet level.
    pub fn wet_level(&self) -> f32 {
        self.wet_level
    }

    /// Current jitter-mix macro.
    pub fn jitter_mix(&self) -> f32 {
        self.jitter_mix
    }

    /// Process one stereo block in place.
    ///
    /// Both slices must be the same length; the shorter one bounds the work
    /// if they differ.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        self.in_limiter_l.process_block(left, PRE_LIMIT_THRESHOLD);
        self.in_limiter_r.process_block(right, PRE_LIMIT_THRESHOLD);

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.process_sample(*l, *r);
            *l = out_l;
            *r = out_r;
        }

        self.out_limiter_l.process_block(left, FINAL_LIMIT_THRESHOLD);
        self.out_limiter_r
            .process_block(right, FINAL_LIMIT_THRESHOLD);
    }

    /// One stereo sample through steps 1-8.
    #[inline]
    fn process_sample(&mut self, in_l: f32, in_r: f32) -> (f32, f32) {
        // The drive smoother runs every sample regardless of placement or
        // enable state, so engagement always finds it settled.
        let drive = self.overdrive.advance();
        let engaged = self.overdrive.is_enabled();

        // 1. Retain the dry signal.
        let dry_l = in_l * self.dry_level;
        let dry_r = in_r * self.dry_level;

        // 2. Pre-reverb overdrive.
        let (mut wet_l, mut wet_r) = if engaged && self.placement == DrivePlacement::Pre {
            (
                Overdrive::shape(in_l, drive),
                Overdrive::shape(in_r, drive),
            )
        } else {
            (in_l, in_r)
        };

        // 3. Highpass ahead of the tank.
        wet_l = self.highpass_l.process(wet_l);
        wet_r = self.highpass_r.process(wet_r);

        // 4. Noise texture. One draw, shared by both channels.
        let texture = self.noise.next_sample() * (NOISE_FACTOR * self.jitter_mix);
        wet_l += texture;
        wet_r += texture;

        // 5. Into the tank at the wet send level.
        let (rev_l, rev_r) = self
            .reverb
            .process(wet_l * self.wet_level, wet_r * self.wet_level);

        // 6. Jitter crossfade. One draw, shared by both channels.
        let modulation = self.jitter.advance();
        let fade = 1.0 - self.jitter_mix + modulation * self.jitter_mix;
        let mut out_l = rev_l * fade;
        let mut out_r = rev_r * fade;

        // 7. Re-mix the dry signal.
        out_l += dry_l;
        out_r += dry_r;

        // 8. Post-reverb overdrive.
        if engaged && self.placement == DrivePlacement::Post {
            out_l = Overdrive::shape(out_l, drive);
            out_r = Overdrive::shape(out_r, drive);
        }

        (out_l, out_r)
    }

    /// Clear all stateful stages. Parameters are kept.
    pub fn reset(&mut self) {
        self.in_limiter_l.reset();
        self.in_limiter_r.reset();
        self.out_limiter_l.reset();
        self.out_limiter_r.reset();
        self.highpass_l.reset();
        self.highpass_r.reset();
        self.reverb.clear();
        self.overdrive.reset();
    }

    /// Propagate a new sample rate to every stage.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.in_limiter_l.set_sample_rate(sample_rate);
        self.in_limiter_r.set_sample_rate(sample_rate);
        self.out_limiter_l.set_sample_rate(sample_rate);
        self.out_limiter_r.set_sample_rate(sample_rate);
        self.highpass_l.set_sample_rate(sample_rate);
        self.highpass_r.set_sample_rate(sample_rate);
        self.noise.set_sample_rate(sample_rate);
        self.reverb.set_sample_rate(sample_rate);
        self.jitter.set_sample_rate(sample_rate);
        self.overdrive.set_sample_rate(sample_rate);
    }
}
